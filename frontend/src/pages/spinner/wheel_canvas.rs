use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::rc::Rc;

use shared::entries::display_label;
use shared::lifecycle::SpinPhase;
use shared::selection::slice_span;
use shared::theme::{Mood, MoodTheme};
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::now_pulse;

const CANVAS_SIZE: f64 = 450.0;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub rotation: f64,
    pub phase: SpinPhase,
    pub entries: Rc<Vec<String>>,
    pub mood: Mood,
    /// Slice to highlight once the wheel has stopped
    pub winner: Option<usize>,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let rotation = props.rotation;
        let phase = props.phase;
        let entries = props.entries.clone();
        let mood = props.mood;
        let winner = props.winner;

        use_effect_with(
            (rotation, phase, entries, mood, winner),
            move |(rotation, phase, entries, mood, winner)| {
                if let Some(context) = canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .and_then(|canvas| canvas.get_context("2d").ok().flatten())
                    .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
                {
                    let scene = Scene {
                        rotation: *rotation,
                        spinning: *phase == SpinPhase::Spinning,
                        entries,
                        theme: mood.theme(),
                        winner: winner.filter(|_| matches!(phase, SpinPhase::Revealing | SpinPhase::Settled)),
                        dark: is_dark_mode(),
                    };
                    draw_wheel(&context, &scene);
                }
                || ()
            },
        );
    }

    let spinning = props.phase == SpinPhase::Spinning;
    let glow = props.mood.theme().glow(if spinning { 0.45 } else { 0.2 });

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width="450"
                height="450"
                class="w-full max-w-[450px] h-auto rounded-full shadow-lg transition-all duration-300"
                style={format!("filter: drop-shadow(0px 5px {}px {});", if spinning { 20 } else { 15 }, glow)}
            />
        </div>
    }
}

struct Scene<'a> {
    rotation: f64,
    spinning: bool,
    entries: &'a [String],
    theme: &'static MoodTheme,
    winner: Option<usize>,
    dark: bool,
}

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

fn draw_wheel(context: &CanvasRenderingContext2d, scene: &Scene) {
    let center = CANVAS_SIZE / 2.0;
    let radius = center - 24.0;
    let count = scene.entries.len();

    context.clear_rect(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE);

    // Outer glow, pulsing while spinning
    let glow_alpha = if scene.spinning { 0.2 + now_pulse(300.0) * 0.1 } else { 0.15 };
    context.begin_path();
    context.set_fill_style_str(&scene.theme.glow(glow_alpha));
    let _ = context.arc(center, center, radius + 15.0, 0.0, TAU);
    context.fill();

    context.begin_path();
    context.set_fill_style_str(if scene.dark { "#1a1c2e" } else { "#f0f2ff" });
    let _ = context.arc(center, center, radius, 0.0, TAU);
    context.fill();

    if count == 0 {
        draw_placeholder(context, center, scene.dark);
    } else {
        context.save();
        let _ = context.translate(center, center);
        let _ = context.rotate(scene.rotation.to_radians());
        draw_slices(context, scene, radius);
        context.restore();
    }

    draw_hub(context, center, radius, scene);
    draw_pointer(context, center, radius, scene);
}

fn draw_placeholder(context: &CanvasRenderingContext2d, center: f64, dark: bool) {
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_font("600 18px 'Segoe UI', Roboto, system-ui, sans-serif");
    context.set_fill_style_str(if dark { "#9ca3af" } else { "#6b7280" });
    let _ = context.fill_text("Add some entries", center, center);
}

/// Slices are laid out clockwise from the pointer at the top, matching
/// `slice_span`, with the context already rotated to the wheel's angle.
fn draw_slices(context: &CanvasRenderingContext2d, scene: &Scene, radius: f64) {
    let count = scene.entries.len();
    let (font_px, max_chars) = match count {
        0..=8 => (20, 16),
        9..=16 => (16, 14),
        17..=28 => (13, 12),
        _ => (11, 10),
    };

    for (index, entry) in scene.entries.iter().enumerate() {
        let (from, to) = slice_span(index, count);
        let start = from.to_radians() - FRAC_PI_2;
        let end = to.to_radians() - FRAC_PI_2;

        context.begin_path();
        context.move_to(0.0, 0.0);
        let _ = context.arc(0.0, 0.0, radius, start, end);
        context.close_path();
        context.set_fill_style_str(scene.theme.slice_color(index, count));
        context.fill();

        if scene.spinning {
            // shimmer
            let shimmer = 0.1 + now_pulse(400.0 + index as f64 * 35.0) * 0.12;
            context.set_fill_style_str(&format!("rgba(255, 255, 255, {:.3})", shimmer));
            context.fill();
        }

        if scene.winner == Some(index) {
            context.set_fill_style_str("rgba(255, 255, 255, 0.28)");
            context.fill();
            context.set_stroke_style_str("#ffffff");
            context.set_line_width(4.0);
            context.stroke();
        }

        // Divider
        context.begin_path();
        context.set_stroke_style_str(if scene.dark { "rgba(255, 255, 255, 0.5)" } else { "rgba(255, 255, 255, 0.85)" });
        context.set_line_width(2.0);
        context.move_to(0.0, 0.0);
        context.line_to(radius * start.cos(), radius * start.sin());
        context.stroke();

        // Label along the slice's center line, reading outwards
        let middle = (start + end) / 2.0;
        context.save();
        let _ = context.rotate(middle);
        context.set_text_align("right");
        context.set_text_baseline("middle");
        context.set_font(&format!("bold {}px 'Segoe UI', Roboto, system-ui, sans-serif", font_px));
        context.set_fill_style_str("#ffffff");
        context.set_shadow_color("rgba(0, 0, 0, 0.55)");
        context.set_shadow_blur(3.0);
        context.set_shadow_offset_x(1.0);
        context.set_shadow_offset_y(1.0);
        let _ = context.fill_text(&display_label(entry, max_chars), radius - 18.0, 0.0);
        context.restore();
    }
}

fn draw_hub(context: &CanvasRenderingContext2d, center: f64, radius: f64, scene: &Scene) {
    let inner_radius = radius * 0.16;

    context.begin_path();
    context.set_stroke_style_str(&scene.theme.glow(if scene.spinning { 0.4 + now_pulse(400.0) * 0.2 } else { 0.5 }));
    context.set_line_width(if scene.spinning { 5.0 } else { 4.0 });
    let _ = context.arc(center, center, radius - 2.0, 0.0, TAU);
    context.stroke();

    context.begin_path();
    context.set_fill_style_str(if scene.dark { "#2d3142" } else { "#ffffff" });
    let _ = context.arc(center, center, inner_radius, 0.0, TAU);
    context.fill();
    context.set_stroke_style_str(scene.theme.pointer);
    context.set_line_width(3.0);
    context.stroke();

    // Star in the hub
    let points = 8;
    context.begin_path();
    context.set_fill_style_str(scene.theme.pointer);
    for i in 0..points * 2 {
        let angle = i as f64 * PI / points as f64;
        let r = if i % 2 == 0 { inner_radius * 0.7 } else { inner_radius * 0.3 };
        let (x, y) = (center + r * angle.cos(), center + r * angle.sin());
        if i == 0 {
            context.move_to(x, y);
        } else {
            context.line_to(x, y);
        }
    }
    context.close_path();
    context.fill();
}

fn draw_pointer(context: &CanvasRenderingContext2d, center: f64, radius: f64, scene: &Scene) {
    let width = 18.0;
    let height = 28.0;
    let corner = 5.0;
    let tip_y = center - radius + 8.0;
    let top_y = center - radius - height + 8.0;

    context.set_shadow_color(&scene.theme.glow(if scene.spinning { 0.9 } else { 0.6 }));
    context.set_shadow_blur(if scene.spinning { 10.0 } else { 4.0 });
    context.set_shadow_offset_x(0.0);
    context.set_shadow_offset_y(0.0);

    context.begin_path();
    context.move_to(center, tip_y);
    context.line_to(center - width + corner, top_y + corner);
    context.quadratic_curve_to(center - width, top_y + corner, center - width, top_y);
    context.line_to(center + width - corner, top_y);
    context.quadratic_curve_to(center + width, top_y, center + width, top_y + corner);
    context.close_path();
    context.set_fill_style_str(scene.theme.pointer);
    context.fill();
    context.set_stroke_style_str("rgba(0, 0, 0, 0.25)");
    context.set_line_width(1.5);
    context.stroke();

    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
}
