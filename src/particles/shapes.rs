//! Per-kind draw routines for game-cell particles.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::{Particle, ShapeKind};

pub(super) fn draw_particle(ctx: &CanvasRenderingContext2d, p: &Particle, glow: f64, alpha: f64) {
    ctx.save();
    ctx.set_global_alpha(alpha);
    ctx.set_shadow_color(&p.color);
    ctx.set_shadow_blur(glow);
    ctx.set_fill_style_str(&p.color);
    match p.kind {
        ShapeKind::Coin => draw_coin(ctx, p),
        ShapeKind::Block => draw_block(ctx, p),
        ShapeKind::Powerup => draw_powerup(ctx, p),
    }
    ctx.restore();
}

// Disc with a radial highlight fading to transparent at the rim.
fn draw_coin(ctx: &CanvasRenderingContext2d, p: &Particle) {
    let (x, y, r) = (p.x, p.y, p.size);
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, TAU).ok();
    ctx.fill();

    let Ok(grad) = ctx.create_radial_gradient(x, y, r * 0.2, x, y, r) else {
        return;
    };
    grad.add_color_stop(0.0, "#fff6").ok();
    grad.add_color_stop(0.7, &p.color).ok();
    grad.add_color_stop(1.0, "#0000").ok();
    ctx.set_global_alpha(0.5);
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, TAU).ok();
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.fill();
}

// Square with a faint cross-hatch at quarter spacing.
fn draw_block(ctx: &CanvasRenderingContext2d, p: &Particle) {
    let (x, y, s) = (p.x, p.y, p.size);
    ctx.begin_path();
    ctx.rect(x - s, y - s, s * 2.0, s * 2.0);
    ctx.fill();

    ctx.set_global_alpha(0.2);
    ctx.set_stroke_style_str("#fff");
    for i in hatch_offsets(s) {
        ctx.begin_path();
        ctx.move_to(x - s, y + i);
        ctx.line_to(x + s, y + i);
        ctx.move_to(x + i, y - s);
        ctx.line_to(x + i, y + s);
        ctx.stroke();
    }
}

// Upward triangle with a vertical and a base guide line.
fn draw_powerup(ctx: &CanvasRenderingContext2d, p: &Particle) {
    let (x, y, s) = (p.x, p.y, p.size);
    ctx.begin_path();
    ctx.move_to(x, y - s);
    ctx.line_to(x - s, y + s);
    ctx.line_to(x + s, y + s);
    ctx.close_path();
    ctx.fill();

    let g = s * 0.7;
    ctx.set_global_alpha(0.3);
    ctx.set_stroke_style_str("#fff");
    ctx.begin_path();
    ctx.move_to(x, y - g);
    ctx.line_to(x, y + g);
    ctx.move_to(x - g, y + g);
    ctx.line_to(x + g, y + g);
    ctx.stroke();
}

/// Offsets `-s, -s/2, 0, s/2` used for the block hatch lines.
pub(super) fn hatch_offsets(s: f64) -> impl Iterator<Item = f64> {
    (0..4).map(move |k| -s + k as f64 * s / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hatch_spans_block_in_quarters() {
        let offs: Vec<f64> = hatch_offsets(10.0).collect();
        assert_eq!(offs, vec![-10.0, -5.0, 0.0, 5.0]);
    }
}
