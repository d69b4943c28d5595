use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shared::error::{ConfigError, EffectError, SpinError};
use shared::history::SpinHistory;
use shared::lifecycle::{LifecycleTimer, Scheduler, SoundCue, SpinEffects, SpinLifecycle, SpinOutcome, WheelFrame};
use shared::selection::SpinRandom;
use shared::{SpinConfig, SpinResult};
use web_sys::window;
use yew::prelude::*;

use crate::audio::AudioCues;

pub type WebLifecycle = SpinLifecycle<SmallRng, TimeoutScheduler, WebEffects>;

/// Anything a browser timeout can call back into.
pub trait TimerTarget {
    fn fire(&mut self, timer: LifecycleTimer);
}

impl<R: SpinRandom, S: Scheduler, E: SpinEffects> TimerTarget for SpinLifecycle<R, S, E> {
    fn fire(&mut self, timer: LifecycleTimer) {
        self.on_timer(timer);
    }
}

/// Turns lifecycle timers into browser timeouts. The timeout only holds a weak
/// reference, so a torn-down wheel is never called back.
#[derive(Default)]
pub struct TimeoutScheduler {
    target: Option<Weak<RefCell<dyn TimerTarget>>>,
}

impl TimeoutScheduler {
    pub fn bind(&mut self, target: Weak<RefCell<dyn TimerTarget>>) {
        self.target = Some(target);
    }
}

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&mut self, delay_ms: u32, timer: LifecycleTimer) -> Timeout {
        let target = self.target.clone();
        if target.is_none() {
            log::warn!("{:?} scheduled before the scheduler was bound", timer);
        }
        Timeout::new(delay_ms, move || {
            let Some(target) = target.as_ref().and_then(Weak::upgrade) else {
                return;
            };
            match target.try_borrow_mut() {
                Ok(mut target) => target.fire(timer),
                Err(_) => log::error!("{:?} fired while the wheel was borrowed", timer),
            };
        })
    }
}

/// Builds a wheel whose timers call back into it. An invalid `config` falls
/// back to the defaults.
pub fn bind_lifecycle<R, E>(
    random: R,
    effects: E,
    config: SpinConfig,
) -> Result<Rc<RefCell<SpinLifecycle<R, TimeoutScheduler, E>>>, ConfigError>
where
    R: SpinRandom + 'static,
    E: SpinEffects + 'static,
{
    let config = match config.validate() {
        Ok(()) => config,
        Err(err) => {
            log::warn!("spin config rejected ({}), using defaults", err);
            SpinConfig::default()
        }
    };
    let lifecycle = Rc::new(RefCell::new(SpinLifecycle::new(
        random,
        TimeoutScheduler::default(),
        effects,
        config,
    )?));
    let target: Weak<RefCell<dyn TimerTarget>> = Rc::downgrade(&lifecycle) as Weak<RefCell<SpinLifecycle<R, TimeoutScheduler, E>>>;
    lifecycle.borrow_mut().scheduler_mut().bind(target);
    Ok(lifecycle)
}

pub struct WebEffects {
    cues: AudioCues,
    sound_enabled: Rc<Cell<bool>>,
    bursts: u32,
    burst: UseStateSetter<u32>,
}

impl SpinEffects for WebEffects {
    fn sound_enabled(&self) -> bool {
        self.sound_enabled.get()
    }

    fn play_cue(&mut self, cue: SoundCue) -> Result<(), EffectError> {
        self.cues.play(cue)
    }

    fn celebrate(&mut self, _result: &SpinResult) {
        self.bursts = self.bursts.wrapping_add(1);
        self.burst.set(self.bursts);
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct RecentSpins(pub SpinHistory);

impl Reducible for RecentSpins {
    type Action = SpinResult;

    fn reduce(self: Rc<Self>, result: SpinResult) -> Rc<Self> {
        let mut history = self.0.clone();
        history.record(result);
        Rc::new(Self(history))
    }
}

#[derive(Clone)]
pub struct SpinnerHandle {
    /// Latest animation frame of the wheel
    pub frame: WheelFrame,
    pub result: Option<SpinResult>,
    pub history: SpinHistory,
    /// Bumped once per celebration
    pub burst: u32,
    lifecycle: Option<Rc<RefCell<WebLifecycle>>>,
}

impl SpinnerHandle {
    pub fn spin(&self, entries: &[String]) -> Result<SpinOutcome, SpinError> {
        let Some(lifecycle) = &self.lifecycle else {
            log::warn!("no wheel to spin");
            return Ok(SpinOutcome::Ignored);
        };
        match lifecycle.try_borrow_mut() {
            Ok(mut lifecycle) => lifecycle.spin(entries, now_ms()),
            Err(_) => {
                log::warn!("wheel busy, dropping spin request");
                Ok(SpinOutcome::Ignored)
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.frame.phase.accepts_spin()
    }
}

pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default()
}

/// Owns one wheel for the lifetime of the calling component: its lifecycle,
/// timers, animation loop and sound. Everything is released on unmount.
#[hook]
pub fn use_spinner(config: SpinConfig, sound_enabled: Rc<Cell<bool>>) -> SpinnerHandle {
    let frame = use_state_eq(|| WheelFrame::resting(0.0));
    let result = use_state(|| None::<SpinResult>);
    let burst = use_state(|| 0u32);
    let history = use_reducer(RecentSpins::default);

    let lifecycle = {
        let result = result.setter();
        let burst = burst.setter();
        let history = history.dispatcher();
        use_state(move || {
            let effects = WebEffects {
                cues: AudioCues::default(),
                sound_enabled,
                bursts: 0,
                burst,
            };
            let lifecycle = match bind_lifecycle(SmallRng::from_entropy(), effects, config) {
                Ok(lifecycle) => lifecycle,
                Err(err) => {
                    log::error!("could not build the wheel: {}", err);
                    return None;
                }
            };
            lifecycle.borrow_mut().on_spin_complete(move |spin| {
                result.set(Some(spin.clone()));
                history.dispatch(spin.clone());
            });
            Some(lifecycle)
        })
    };

    {
        let lifecycle = (*lifecycle).clone();
        let frame = frame.setter();
        use_effect_with((), move |_| {
            let slot: Rc<RefCell<Option<AnimationFrame>>> = Rc::default();
            if let Some(lifecycle) = &lifecycle {
                schedule_frame(Rc::downgrade(lifecycle), frame, slot.clone());
            }

            move || {
                slot.borrow_mut().take();
                if let Some(lifecycle) = &lifecycle {
                    if let Ok(mut lifecycle) = lifecycle.try_borrow_mut() {
                        lifecycle.teardown();
                    }
                }
            }
        });
    }

    SpinnerHandle {
        frame: *frame,
        result: (*result).clone(),
        history: history.0.clone(),
        burst: *burst,
        lifecycle: (*lifecycle).clone(),
    }
}

fn schedule_frame(
    lifecycle: Weak<RefCell<WebLifecycle>>,
    frame: UseStateSetter<WheelFrame>,
    slot: Rc<RefCell<Option<AnimationFrame>>>,
) {
    let next = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        let Some(strong) = lifecycle.upgrade() else {
            return;
        };
        let current = match strong.try_borrow() {
            Ok(lifecycle) => Some(lifecycle.frame(timestamp)),
            Err(_) => None,
        };
        if let Some(current) = current {
            frame.set(current);
        }
        schedule_frame(lifecycle, frame, next);
    });
    *slot.borrow_mut() = Some(handle);
}
