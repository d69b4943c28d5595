use shared::SpinResult;
use yew::prelude::*;

// Result display component
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub result: Option<SpinResult>,
    pub show_result: bool,
    pub emoji: &'static str,
    /// Tailwind gradient of the active mood
    pub accent: &'static str,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    if !props.show_result {
        return html! {};
    }

    let Some(result) = &props.result else {
        return html! {};
    };

    html! {
        <div class="mt-8 mb-4 flex flex-col items-center justify-center">
            <div class={classes!(
                "flex",
                "items-center",
                "justify-center",
                "gap-3",
                "px-6",
                "py-4",
                "rounded-xl",
                "bg-gradient-to-r",
                "text-white",
                "font-bold",
                "text-xl",
                "shadow-lg",
                "border-2",
                "border-white/40",
                "transform",
                "transition-all",
                "duration-500",
                "animate-bounce",
                props.accent
            )}>
                <span>{props.emoji}</span>
                <span class="break-all">{result.winning_entry.clone()}</span>
            </div>
            <div class="text-sm text-gray-600 dark:text-gray-400 mt-3 bg-gray-100 dark:bg-gray-800 px-4 py-2 rounded-full">
                {format!("Slice {} · landed at {:.1}°", result.winning_index + 1, result.final_rotation_degrees.rem_euclid(360.0))}
            </div>
        </div>
    }
}

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub has_enough_entries: bool,
    pub accent: &'static str,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning {
        "Spinning..."
    } else if !props.has_enough_entries {
        "Need 2+ entries"
    } else {
        "Spin"
    };

    // Too few entries stays clickable so the user gets told why
    let is_disabled = props.is_spinning;

    let button_class = if is_disabled {
        classes!("bg-gradient-to-r", "from-gray-400", "to-gray-500", "opacity-75", "cursor-not-allowed", "text-white")
    } else if !props.has_enough_entries {
        classes!("bg-gradient-to-r", "from-blue-400", "to-gray-400", "opacity-80", "text-white")
    } else {
        classes!(
            "bg-gradient-to-r",
            props.accent,
            "text-white",
            "shadow-lg",
            "hover:shadow-xl",
            "transform",
            "hover:-translate-y-0.5",
            "active:translate-y-0",
            "animate-pulse-subtle"
        )
    };

    let spin_icon_class = if props.is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class="relative">
            <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class)}>
                <button
                    onclick={props.onclick.clone()}
                    disabled={is_disabled}
                    title="Space or Enter"
                    class={classes!(
                        "relative",
                        "w-full",
                        "px-8",
                        "py-4",
                        "font-bold",
                        "text-lg",
                        "transition-all",
                        "duration-300",
                        "border-2",
                        "border-transparent",
                        "hover:border-white",
                        "focus:outline-none",
                        "focus:ring-4",
                        "focus:ring-yellow-300",
                        "focus:ring-opacity-50",
                        "bg-transparent",
                    )}
                >
                    <div class="flex items-center justify-center relative z-10">
                        <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                            <circle cx="12" cy="12" r="10" />
                            <path d="M12 6v6l4 2" />
                        </svg>
                        <span>{button_text}</span>
                    </div>
                </button>
            </div>

            <div class={classes!(
                "absolute",
                "inset-0",
                "rounded-full",
                "filter",
                "blur-md",
                "bg-yellow-400",
                "pointer-events-none",
                "transition-opacity",
                "duration-300",
                if is_disabled { "opacity-0" } else { "opacity-30" }
            )}></div>
        </div>
    }
}

// Transient notice line under the wheel
#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub message: Option<AttrValue>,
}

#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div class="mb-6 text-center" role="status">
                <p class="text-red-500 bg-red-50 dark:bg-red-900/20 p-3 rounded-lg animate-fadeIn">{message.to_string()}</p>
            </div>
        },
        None => html! {},
    }
}
