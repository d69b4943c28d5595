use shared::history::SpinHistory;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct SpinHistoryPanelProps {
    pub history: SpinHistory,
}

/// Recent results of this visit, newest first.
#[function_component(SpinHistoryPanel)]
pub fn spin_history_panel(props: &SpinHistoryPanelProps) -> Html {
    html! {
        <div class={styles::CARD}>
            <div class="flex items-center justify-between mb-3">
                <h3 class={styles::CARD_TITLE}>{"Recent spins"}</h3>
                if !props.history.is_empty() {
                    <span class={styles::TEXT_SMALL}>{props.history.len().to_string()}</span>
                }
            </div>
            if props.history.is_empty() {
                <p class={styles::TEXT_HINT}>{"Spin the wheel to start a history"}</p>
            } else {
                <ol class="space-y-2">
                    { for props.history.iter().enumerate().map(|(i, result)| {
                        let wins = props.history.wins_for(&result.winning_entry);
                        html! {
                            <li class={classes!("flex", "items-center", "justify-between", "text-sm", if i == 0 { "font-semibold" } else { "" })}>
                                <span class={classes!(styles::TEXT_BODY, "truncate", "pr-2")}>{result.winning_entry.clone()}</span>
                                if wins > 1 {
                                    <span class={styles::TEXT_HINT}>{format!("×{}", wins)}</span>
                                }
                            </li>
                        }
                    })}
                </ol>
            }
        </div>
    }
}
