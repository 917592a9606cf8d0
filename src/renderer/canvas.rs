//! HTML canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCmd, Surface};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Replays display lists onto a 2D canvas context
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    /// Grab the 2D context and size the backing store to the logical surface
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn replay(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Save => ctx.save(),
            DrawCmd::Restore => ctx.restore(),
            DrawCmd::Translate(offset) => {
                ctx.translate(offset.x as f64, offset.y as f64).ok();
            }
            DrawCmd::Rotate(angle) => {
                ctx.rotate(*angle as f64).ok();
            }
            DrawCmd::Alpha(alpha) => ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64),
            DrawCmd::Shadow { color, blur } => {
                ctx.set_shadow_color(&color.to_css());
                ctx.set_shadow_blur(*blur as f64);
            }
            DrawCmd::VerticalGradient {
                pos,
                size,
                top,
                bottom,
            } => {
                let y0 = pos.y as f64;
                let y1 = (pos.y + size.y) as f64;
                let gradient = ctx.create_linear_gradient(0.0, y0, 0.0, y1);
                gradient.add_color_stop(0.0, &top.to_css()).ok();
                gradient.add_color_stop(1.0, &bottom.to_css()).ok();
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(pos.x as f64, y0, size.x as f64, size.y as f64);
            }
            DrawCmd::FillRect { pos, size, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::StrokeRect {
                pos,
                size,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.stroke_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::FillTriangle { points, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.begin_path();
                ctx.move_to(points[0].x as f64, points[0].y as f64);
                ctx.line_to(points[1].x as f64, points[1].y as f64);
                ctx.line_to(points[2].x as f64, points[2].y as f64);
                ctx.close_path();
                ctx.fill();
            }
            DrawCmd::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.begin_path();
                if ctx
                    .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .is_ok()
                {
                    ctx.fill();
                }
            }
            DrawCmd::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
        }
    }
}

impl Surface for Canvas2d {
    fn draw(&mut self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            self.replay(cmd);
        }
    }
}
