mod confetti_canvas;
mod spinner_utils;
mod wheel_canvas;

use std::cell::Cell;
use std::f64::consts::TAU;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use shared::constants::{DUPLICATE_ENTRY_NOTICE, ENTRY_LIMIT_NOTICE, INSUFFICIENT_ENTRIES_NOTICE};
use shared::entries::EntryList;
use shared::error::{EntryError, SpinError};
use shared::lifecycle::{SpinOutcome, SpinPhase};
use shared::theme::Mood;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, KeyboardEvent};
use yew::prelude::*;

use crate::components::{EntryEditor, MoodPicker, SoundToggle, SpinHistoryPanel};
use crate::config::get_spin_config;
use crate::hooks::{now_ms, use_spinner};
use crate::storage::{save_entries, save_mood, save_sound_enabled, Preferences};
use crate::styles;

use confetti_canvas::ConfettiCanvas;
use spinner_utils::{Notice, ResultDisplay, SpinButton};
use wheel_canvas::WheelCanvas;

const NOTICE_MS: u32 = 3500;

/// 0..=1 sine pulse with the given period, for shimmer and glow effects.
pub(crate) fn now_pulse(period_ms: f64) -> f64 {
    ((now_ms() * TAU / period_ms).sin() + 1.0) / 2.0
}

fn entry_notice(err: &EntryError) -> String {
    match err {
        EntryError::DuplicateEntryRejected(_) => DUPLICATE_ENTRY_NOTICE.to_string(),
        EntryError::EntryLimitExceeded { .. } => ENTRY_LIMIT_NOTICE.to_string(),
        other => other.to_string(),
    }
}

fn spin_notice(err: &SpinError) -> String {
    match err {
        SpinError::InsufficientEntries { .. } => INSUFFICIENT_ENTRIES_NOTICE.to_string(),
        other => other.to_string(),
    }
}

/// Keys typed into form controls belong to them, not to the wheel.
fn from_form_control(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT" | "BUTTON"))
        .unwrap_or(false)
}

#[function_component(SpinnerPage)]
pub fn spinner_page() -> Html {
    // Page styles
    {
        use_effect_with((), move |_| {
            let style_element = window()
                .and_then(|w| w.document())
                .and_then(|document| {
                    let head = document.head()?;
                    let style = document.create_element("style").ok()?;
                    style.set_text_content(Some(styles::SPINNER_CSS));
                    head.append_child(&style).ok()?;
                    Some(style)
                });

            move || {
                if let Some(style) = style_element {
                    style.remove();
                }
            }
        });
    }

    let config = use_memo((), |_| get_spin_config());
    let prefs = {
        let max_entries = config.max_entries;
        use_memo((), move |_| Preferences::load(max_entries))
    };

    let entries = use_state(|| prefs.entries.clone());
    let mood = use_state(|| prefs.mood);
    let sound = use_state(|| prefs.sound_enabled);
    let sound_flag = use_memo((), |_| Cell::new(prefs.sound_enabled));

    let spinner = use_spinner(*config, sound_flag.clone());

    let notice = use_state(|| None::<AttrValue>);
    let notice_timer = use_mut_ref(|| None::<Timeout>);

    let show_notice = {
        let notice = notice.clone();
        let notice_timer = notice_timer.clone();
        Callback::from(move |message: String| {
            log::debug!("notice: {}", message);
            notice.set(Some(message.into()));
            let clear = notice.setter();
            // replacing the previous timeout cancels it
            *notice_timer.borrow_mut() = Some(Timeout::new(NOTICE_MS, move || clear.set(None)));
        })
    };

    let update_entries = {
        let entries = entries.clone();
        move |list: EntryList| {
            save_entries(&list);
            entries.set(list);
        }
    };

    let on_spin = {
        let spinner = spinner.clone();
        let entries = entries.clone();
        let notice = notice.clone();
        let show_notice = show_notice.clone();
        Callback::from(move |_: ()| match spinner.spin(entries.as_slice()) {
            Ok(SpinOutcome::Started { target_rotation }) => {
                log::debug!("spin started towards {:.1}", target_rotation);
                notice.set(None);
            }
            Ok(SpinOutcome::Ignored) => {}
            Err(err) => show_notice.emit(spin_notice(&err)),
        })
    };

    // Space/Enter spins; the listener reads the latest callback through a ref
    let latest_spin = use_mut_ref(|| on_spin.clone());
    *latest_spin.borrow_mut() = on_spin.clone();
    {
        let latest_spin = latest_spin.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                EventListener::new(&window, "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if event.repeat() || !matches!(event.key().as_str(), " " | "Enter") {
                        return;
                    }
                    if from_form_control(event) {
                        return;
                    }
                    event.prevent_default();
                    let spin = latest_spin.borrow().clone();
                    spin.emit(());
                })
            });

            move || drop(listener)
        });
    }

    let on_add = {
        let entries = entries.clone();
        let update_entries = update_entries.clone();
        let show_notice = show_notice.clone();
        Callback::from(move |raw: String| {
            let mut list = (*entries).clone();
            match list.add(&raw) {
                Ok(()) => {
                    update_entries(list);
                    true
                }
                Err(err) => {
                    show_notice.emit(entry_notice(&err));
                    false
                }
            }
        })
    };

    let on_remove = {
        let entries = entries.clone();
        let update_entries = update_entries.clone();
        Callback::from(move |index: usize| {
            let mut list = (*entries).clone();
            if list.remove(index).is_some() {
                update_entries(list);
            }
        })
    };

    let on_shuffle = {
        let entries = entries.clone();
        let update_entries = update_entries.clone();
        Callback::from(move |_: ()| {
            let mut list = (*entries).clone();
            list.shuffle(&mut rand::thread_rng());
            update_entries(list);
        })
    };

    let on_clear = {
        let entries = entries.clone();
        let update_entries = update_entries.clone();
        Callback::from(move |_: ()| {
            let mut list = (*entries).clone();
            list.clear();
            update_entries(list);
        })
    };

    let on_load_presets = {
        let mood = mood.clone();
        let max_entries = config.max_entries;
        let update_entries = update_entries.clone();
        Callback::from(move |_: ()| update_entries(EntryList::from_preset(*mood, max_entries)))
    };

    let on_mood = {
        let mood = mood.clone();
        Callback::from(move |selected: Mood| {
            save_mood(selected);
            mood.set(selected);
        })
    };

    let on_sound = {
        let sound = sound.clone();
        let sound_flag = sound_flag.clone();
        Callback::from(move |enabled: bool| {
            sound_flag.set(enabled);
            save_sound_enabled(enabled);
            sound.set(enabled);
        })
    };

    let wheel_entries = use_memo((*entries).clone(), |list| list.as_slice().to_vec());
    let theme = mood.theme();
    let frame = spinner.frame;
    let busy = spinner.is_busy();

    // Only highlight a winner that is still on the wheel in the same slot
    let winner = spinner
        .result
        .as_ref()
        .filter(|r| wheel_entries.get(r.winning_index) == Some(&r.winning_entry))
        .map(|r| r.winning_index);
    let show_result = matches!(frame.phase, SpinPhase::Revealing | SpinPhase::Settled);

    html! {
        <div class={styles::PAGE}>
            <div class="flex items-center justify-center gap-3 mb-6">
                <h1 class="text-3xl font-bold text-center text-gray-900 dark:text-white">
                    <span class={classes!("bg-clip-text", "text-transparent", "bg-gradient-to-r", theme.accent)}>
                        {format!("{} Mood Spinner", theme.emoji)}
                    </span>
                </h1>
                <SoundToggle enabled={*sound} on_toggle={on_sound} />
            </div>

            <div class="mb-6">
                <MoodPicker selected={*mood} disabled={busy} on_select={on_mood} />
            </div>

            <div class={styles::PAGE_GRID}>
                <EntryEditor
                    entries={wheel_entries.clone()}
                    max={entries.max()}
                    full={entries.is_full()}
                    disabled={busy}
                    {on_add}
                    {on_remove}
                    {on_shuffle}
                    {on_clear}
                    {on_load_presets}
                />

                <div class={styles::WHEEL_CARD}>
                    <div class="relative mx-auto mb-8 flex justify-center items-center">
                        <div class="w-full max-w-[450px] mx-auto">
                            <WheelCanvas
                                rotation={frame.rotation_degrees}
                                phase={frame.phase}
                                entries={wheel_entries.clone()}
                                mood={*mood}
                                {winner}
                            />
                        </div>
                    </div>

                    <Notice message={(*notice).clone()} />

                    <div class="flex justify-center mt-4">
                        <div class="w-full max-w-[300px]">
                            <SpinButton
                                is_spinning={busy}
                                has_enough_entries={entries.can_spin()}
                                accent={theme.accent}
                                onclick={let on_spin = on_spin.clone(); Callback::from(move |_: MouseEvent| on_spin.emit(()))}
                            />
                        </div>
                    </div>

                    <ResultDisplay
                        result={spinner.result.clone()}
                        {show_result}
                        emoji={theme.emoji}
                        accent={theme.accent}
                    />
                </div>

                <SpinHistoryPanel history={spinner.history.clone()} />
            </div>

            <ConfettiCanvas burst={spinner.burst} palette={theme.slice_colors} />
        </div>
    }
}
