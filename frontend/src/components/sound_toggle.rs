use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct SoundToggleProps {
    pub enabled: bool,
    pub on_toggle: Callback<bool>,
}

#[function_component(SoundToggle)]
pub fn sound_toggle(props: &SoundToggleProps) -> Html {
    let enabled = props.enabled;
    let on_toggle = props.on_toggle.clone();

    html! {
        <button
            type="button"
            class={styles::BUTTON_ICON}
            aria-pressed={enabled.to_string()}
            title={if enabled { "Mute" } else { "Unmute" }}
            onclick={move |_| on_toggle.emit(!enabled)}
        >
            if enabled {
                <svg class={styles::ICON} xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                    <path d="M11 5L6 9H2v6h4l5 4V5z" />
                    <path d="M15.5 8.5a5 5 0 010 7M19 5a10 10 0 010 14" />
                </svg>
            } else {
                <svg class={styles::ICON} xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                    <path d="M11 5L6 9H2v6h4l5 4V5z" />
                    <path d="M23 9l-6 6M17 9l6 6" />
                </svg>
            }
        </button>
    }
}
