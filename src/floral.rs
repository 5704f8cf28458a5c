//! Traditional rangoli: a square dot grid with a floral or geometric motif on top.

use crate::document::{Color, PathData, Primitive, Style};
use crate::generators::{Canvas, on_circle, ring_angle};
use crate::params::FloralStyle;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

const LOTUS_COLORS: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7"];
const PEACOCK_COLORS: [&str; 5] = ["#8E44AD", "#3498DB", "#E74C3C", "#F39C12", "#27AE60"];
const FLOWER_COLORS: [&str; 6] = ["#FF1744", "#FF9800", "#FFEB3B", "#4CAF50", "#2196F3", "#9C27B0"];

fn pick(palette: &[&str], index: u32) -> Color {
    Color::named(palette[index as usize % palette.len()])
}

/// Square grid of `grid_size × grid_size` dots centered on the canvas, row-major.
pub fn dot_grid(canvas: Canvas, grid_size: u32) -> Vec<Vec2> {
    let spacing = canvas.width.min(canvas.height) / (grid_size + 2);
    let offset = (grid_size.saturating_sub(1) * spacing / 2) as f32;
    let start = canvas.center() - Vec2::splat(offset);

    (0..grid_size)
        .flat_map(|row| {
            (0..grid_size).map(move |col| {
                start + Vec2::new((col * spacing) as f32, (row * spacing) as f32)
            })
        })
        .collect()
}

/// Full traditional pattern: faint grid dots, then the motif for `style`.
pub fn traditional(
    canvas: Canvas,
    style: FloralStyle,
    grid_size: u32,
    dot_size: u32,
    iterations: u32,
) -> Vec<Primitive> {
    let dots = dot_grid(canvas, grid_size);
    let mut out: Vec<Primitive> = dots
        .iter()
        .map(|&center| Primitive::Circle {
            center,
            radius: 2.0,
            style: Style::filled(Color::named("gray")).with_opacity(0.3),
        })
        .collect();

    let center = canvas.center();
    let radius = dot_size * 2;
    match style {
        FloralStyle::Lotus => out.extend(lotus(center, radius as f32, iterations)),
        FloralStyle::Peacock => out.extend(peacock(center, radius as f32, iterations)),
        FloralStyle::Flower => out.extend(flower(center, radius, iterations)),
        FloralStyle::Geometric => {
            out.extend(geometric_grid(&dots, grid_size, dot_size, iterations))
        }
    }
    out
}

/// Rings of pointed petals; ring `i` has `6 + 2i` petals at radius `radius + 15i`.
pub fn lotus(center: Vec2, radius: f32, layers: u32) -> Vec<Primitive> {
    let mut out = Vec::new();
    for i in 0..layers {
        let r = radius + (i * 15) as f32;
        let petals = 6 + i * 2;
        let color = pick(&LOTUS_COLORS, i);

        for j in 0..petals {
            let angle = ring_angle(j, petals);
            let tip = on_circle(center, r, angle);
            let left = on_circle(center, r * 0.7, angle - 0.3);
            let right = on_circle(center, r * 0.7, angle + 0.3);

            out.push(Primitive::Path {
                data: PathData::new(center)
                    .quad_to(left, tip)
                    .quad_to(right, center),
                style: Style::stroke(Color::named("black"), 1.0)
                    .with_fill(color.clone())
                    .with_opacity(0.7),
            });
        }
    }
    out
}

/// Eight feathers: a stem each plus one mirrored curve pair per iteration.
pub fn peacock(center: Vec2, radius: f32, iterations: u32) -> Vec<Primitive> {
    const FEATHERS: u32 = 8;

    let mut out = Vec::new();
    let stem = radius + 20.0;
    for i in 0..FEATHERS {
        let angle = ring_angle(i, FEATHERS);
        let color = pick(&PEACOCK_COLORS, i);
        let tip = on_circle(center, stem, angle);

        out.push(Primitive::Line {
            from: center,
            to: tip,
            style: Style::stroke(color.clone(), 3.0),
        });

        let eye = on_circle(center, stem * 0.8, angle);
        for j in 0..iterations {
            let spread = (10 + j * 8) as f32;
            let left = on_circle(eye, spread, angle + FRAC_PI_2);
            let right = on_circle(eye, spread, angle - FRAC_PI_2);

            out.push(Primitive::Path {
                data: PathData::new(eye).quad_to(left, tip).quad_to(right, eye),
                style: Style::stroke(color.clone(), 1.5).with_opacity(0.8),
            });
        }
    }
    out
}

/// Layers of six rotated elliptical petals around a filled center disc.
///
/// Each layer sits 25px further out and is turned by a further 0.5 rad.
pub fn flower(center: Vec2, radius: u32, layers: u32) -> Vec<Primitive> {
    const PETALS: u32 = 6;

    let mut out = Vec::new();
    for layer in 0..layers {
        let r = (radius + layer * 25) as f32;
        let color = pick(&FLOWER_COLORS, layer);
        let radii = Vec2::new((15 + layer * 5) as f32, (8 + layer * 2) as f32);

        for i in 0..PETALS {
            let angle = ring_angle(i, PETALS) + layer as f32 * 0.5;
            out.push(Primitive::Ellipse {
                center: on_circle(center, r, angle),
                radii,
                rotation: angle.to_degrees(),
                style: Style::stroke(Color::named("black"), 1.0)
                    .with_fill(color.clone())
                    .with_opacity(0.6),
            });
        }
    }

    out.push(Primitive::Circle {
        center,
        radius: (radius / 3) as f32,
        style: Style::stroke(Color::named("orange"), 2.0).with_fill(Color::named("yellow")),
    });
    out
}

/// Lattice over the dot grid.
///
/// Horizontal and vertical links are always drawn; diagonals appear from four
/// iterations on, rings around every other dot from three.
pub fn geometric_grid(
    dots: &[Vec2],
    grid_size: u32,
    dot_size: u32,
    iterations: u32,
) -> Vec<Primitive> {
    let g = grid_size as usize;
    let at = |row: usize, col: usize| dots.get(row * g + col).copied();
    let mut out = Vec::new();

    let mut link = |a: Option<Vec2>, b: Option<Vec2>, style: Style| {
        if let (Some(from), Some(to)) = (a, b) {
            out.push(Primitive::Line { from, to, style });
        }
    };

    let ink = || Style::stroke(Color::named("black"), 2.0);
    for row in 0..g {
        for col in 0..g.saturating_sub(1) {
            link(at(row, col), at(row, col + 1), ink());
        }
    }
    for row in 0..g.saturating_sub(1) {
        for col in 0..g {
            link(at(row, col), at(row + 1, col), ink());
        }
    }
    if iterations > 3 {
        for row in 0..g.saturating_sub(1) {
            for col in 0..g.saturating_sub(1) {
                link(
                    at(row, col),
                    at(row + 1, col + 1),
                    Style::stroke(Color::named("#E74C3C"), 1.5).with_opacity(0.7),
                );
            }
        }
    }

    if iterations > 2 {
        out.extend(dots.iter().step_by(2).map(|&center| Primitive::Circle {
            center,
            radius: (dot_size / 2) as f32,
            style: Style::stroke(Color::named("#3498DB"), 1.5),
        }));
    }
    out
}
