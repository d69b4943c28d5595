use shared::theme::Mood;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct MoodPickerProps {
    pub selected: Mood,
    pub disabled: bool,
    pub on_select: Callback<Mood>,
}

#[function_component(MoodPicker)]
pub fn mood_picker(props: &MoodPickerProps) -> Html {
    html! {
        <div class="flex flex-wrap justify-center gap-2" role="radiogroup" aria-label="Mood">
            { for Mood::all().map(|mood| {
                let theme = mood.theme();
                let selected = mood == props.selected;
                let on_select = props.on_select.clone();
                let class = if selected {
                    classes!(styles::MOOD_CHIP, "bg-gradient-to-r", theme.accent, "text-white", "shadow-md")
                } else {
                    classes!(styles::MOOD_CHIP, "bg-white", "dark:bg-gray-800", "text-gray-700", "dark:text-gray-300")
                };
                html! {
                    <button
                        type="button"
                        role="radio"
                        aria-checked={selected.to_string()}
                        disabled={props.disabled}
                        {class}
                        onclick={move |_| on_select.emit(mood)}
                    >
                        <span class="mr-1">{theme.emoji}</span>
                        {theme.label}
                    </button>
                }
            })}
        </div>
    }
}
