use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shared::confetti::ConfettiBurst;
use shared::constants::CONFETTI_PARTICLES;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfettiCanvasProps {
    /// A new burst starts every time this changes; 0 means none yet
    pub burst: u32,
    pub palette: &'static [&'static str],
}

/// Full-screen overlay that plays one confetti burst per trigger.
#[function_component(ConfettiCanvas)]
pub fn confetti_canvas(props: &ConfettiCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let palette = props.palette;
        use_effect_with(props.burst, move |burst| {
            let slot: Rc<RefCell<Option<AnimationFrame>>> = Rc::default();

            if *burst > 0 {
                if let Some((canvas, context)) = prepare(&canvas_ref) {
                    let confetti = ConfettiBurst::spawn(
                        &mut SmallRng::from_entropy(),
                        CONFETTI_PARTICLES,
                        canvas.width() as f64,
                        canvas.height() as f64,
                        palette.len(),
                    );
                    log::debug!("confetti burst {}", burst);
                    animate(Stage { canvas, context, palette, confetti, last: None }, slot.clone());
                }
            }

            move || {
                slot.borrow_mut().take();
            }
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            class="fixed inset-0 w-full h-full pointer-events-none z-50"
            aria-hidden="true"
        />
    }
}

struct Stage {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    palette: &'static [&'static str],
    confetti: ConfettiBurst,
    last: Option<f64>,
}

fn prepare(canvas_ref: &NodeRef) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
    let window = window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let context = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    Some((canvas, context))
}

fn animate(mut stage: Stage, slot: Rc<RefCell<Option<AnimationFrame>>>) {
    let next = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        let dt = stage.last.map(|last| timestamp - last).unwrap_or(16.0);
        stage.last = Some(timestamp);
        stage.confetti.step(dt);
        draw(&stage);

        if stage.confetti.is_finished() {
            log::debug!("confetti finished");
            return;
        }
        animate(stage, next);
    });
    *slot.borrow_mut() = Some(handle);
}

fn draw(stage: &Stage) {
    let context = &stage.context;
    context.clear_rect(0.0, 0.0, stage.canvas.width() as f64, stage.canvas.height() as f64);

    for particle in stage.confetti.particles() {
        let color = stage.palette.get(particle.color).copied().unwrap_or("#ffffff");
        context.save();
        context.set_global_alpha(particle.life.clamp(0.0, 1.0));
        let _ = context.translate(particle.x, particle.y);
        let _ = context.rotate(particle.angle);
        context.set_fill_style_str(color);
        context.fill_rect(
            -particle.width / 2.0,
            -particle.height / 2.0,
            particle.width,
            particle.height,
        );
        context.restore();
    }
}
