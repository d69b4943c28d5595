use std::rc::Rc;

use shared::constants::MAX_ENTRY_CHARS;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct EntryEditorProps {
    pub entries: Rc<Vec<String>>,
    pub max: usize,
    pub full: bool,
    /// Locks editing while the wheel is busy
    pub disabled: bool,
    /// Returns whether the entry was accepted
    pub on_add: Callback<String, bool>,
    pub on_remove: Callback<usize>,
    pub on_shuffle: Callback<()>,
    pub on_clear: Callback<()>,
    pub on_load_presets: Callback<()>,
}

#[function_component(EntryEditor)]
pub fn entry_editor(props: &EntryEditorProps) -> Html {
    let draft = use_state(String::new);

    let handle_submit = {
        let draft = draft.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if on_add.emit((*draft).clone()) {
                draft.set(String::new());
            }
        })
    };

    let full = props.full;
    let count_class = if full { styles::TEXT_ERROR } else { styles::TEXT_SMALL };

    html! {
        <div class={styles::CARD}>
            <div class="flex items-center justify-between mb-3">
                <h3 class={styles::CARD_TITLE}>{"Entries"}</h3>
                <span class={count_class}>{format!("{}/{}", props.entries.len(), props.max)}</span>
            </div>

            <form onsubmit={handle_submit} class="flex gap-2">
                <input
                    id="new-entry"
                    type="text"
                    value={(*draft).clone()}
                    class={styles::INPUT_INLINE}
                    maxlength={MAX_ENTRY_CHARS.to_string()}
                    placeholder="Add an option"
                    disabled={props.disabled || full}
                    oninput={let draft = draft.clone(); move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        draft.set(input.value());
                    }}
                />
                <button type="submit" class={styles::BUTTON_PRIMARY} disabled={props.disabled || full}>
                    {"Add"}
                </button>
            </form>

            <ul class="mt-4 max-h-72 overflow-y-auto divide-y divide-gray-100 dark:divide-gray-700">
                { for props.entries.iter().enumerate().map(|(index, entry)| {
                    let on_remove = props.on_remove.clone();
                    html! {
                        <li key={entry.clone()} class="flex items-center justify-between py-2">
                            <span class={classes!(styles::TEXT_BODY, "truncate", "pr-2")}>{entry.clone()}</span>
                            <button
                                type="button"
                                class={styles::BUTTON_ICON}
                                disabled={props.disabled}
                                aria-label={format!("Remove {}", entry)}
                                onclick={move |_| on_remove.emit(index)}
                            >
                                {"✕"}
                            </button>
                        </li>
                    }
                })}
            </ul>

            if props.entries.is_empty() {
                <p class={classes!(styles::TEXT_HINT, "text-center", "py-4")}>{"No entries yet"}</p>
            }

            <div class="mt-4 flex flex-wrap gap-2">
                <button
                    type="button"
                    class={styles::BUTTON_SECONDARY}
                    disabled={props.disabled || props.entries.len() < 2}
                    onclick={let cb = props.on_shuffle.clone(); move |_| cb.emit(())}
                >
                    {"Shuffle"}
                </button>
                <button
                    type="button"
                    class={styles::BUTTON_SECONDARY}
                    disabled={props.disabled}
                    onclick={let cb = props.on_load_presets.clone(); move |_| cb.emit(())}
                >
                    {"Load presets"}
                </button>
                <button
                    type="button"
                    class={styles::BUTTON_DANGER}
                    disabled={props.disabled || props.entries.is_empty()}
                    onclick={let cb = props.on_clear.clone(); move |_| cb.emit(())}
                >
                    {"Clear"}
                </button>
            </div>
        </div>
    }
}
