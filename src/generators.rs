//! Closed-form geometric generators and the small turtle motifs they place.
//!
//! All placement uses `center + radius * (cos θ, sin θ)` with θ in radians.
//! Apart from [`mini_kolam`], nothing here touches the grammar or interpreter.

use crate::config::TurtleConfig;
use crate::document::{Color, Primitive, Style};
use crate::error::{KolamError, Result};
use crate::interpreter::{KolamInterpreter, StrokePolicy, TraceStyle};
use crate::turtle::{BendStyle, KolamOp, TurtleState};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Symbols of the expanded string drawn by one mini-kolam.
pub const MINI_KOLAM_SYMBOLS: usize = 50;

/// Symbols drawn per section of the combined view.
pub const COMBINED_SYMBOLS: usize = 101;

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center snapped to whole pixels.
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }
}

/// Point at `angle` radians on the circle of `radius` around `center`.
pub fn on_circle(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle) * radius
}

/// Angle of the `index`-th of `count` evenly spaced positions.
pub fn ring_angle(index: u32, count: u32) -> f32 {
    TAU * index as f32 / count as f32
}

/// `sides` evenly spaced vertices on a circle, the first at angle 0.
pub fn polygon_vertices(center: Vec2, radius: f32, sides: u32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| on_circle(center, radius, ring_angle(i, sides)))
        .collect()
}

/// Regular polygon with star connectors and vertex dots.
///
/// Connectors join vertex pairs `(i, j)` with `j >= i + 2` and `i + j` even,
/// skipping the wrap-around pair `(0, sides - 1)`, which is an edge.
pub fn polygon(canvas: Canvas, sides: u32, radius: f32, dot_size: f32) -> Result<Vec<Primitive>> {
    if sides < 3 {
        return Err(KolamError::invalid(
            "polygon_sides",
            format!("a polygon needs at least 3 sides, got {sides}"),
        ));
    }

    let points = polygon_vertices(canvas.center(), radius, sides);
    let mut out = vec![Primitive::Polygon {
        points: points.clone(),
        style: Style::stroke(Color::named("navy"), 2.0),
    }];

    let n = sides as usize;
    for i in 0..n {
        for j in (i + 2)..n {
            if (i == 0 && j == n - 1) || (i + j) % 2 != 0 {
                continue;
            }
            out.push(Primitive::Line {
                from: points[i],
                to: points[j],
                style: Style::stroke(Color::named("purple"), 1.5),
            });
        }
    }

    out.extend(points.into_iter().map(|center| Primitive::Circle {
        center,
        radius: dot_size / 2.0,
        style: Style::filled(Color::named("blue")),
    }));

    Ok(out)
}

/// A small single-color motif: the first [`MINI_KOLAM_SYMBOLS`] symbols walked
/// at 45° from `origin`. Only `F` and `A` draw.
pub fn mini_kolam(symbols: &str, origin: Vec2, size: f32, color: Color) -> Result<Vec<Primitive>> {
    let config = TurtleConfig {
        step_length: size,
        symbol_limit: Some(MINI_KOLAM_SYMBOLS),
        ..TurtleConfig::default()
    };
    let mut interpreter = KolamInterpreter::new(config)
        .with_stroke(StrokePolicy::Solid(color))
        .with_trace(TraceStyle::Segments);
    interpreter.set_op('F', KolamOp::Forward);
    interpreter.set_op('A', KolamOp::Arc(90.0));

    let trace = interpreter.interpret(symbols, TurtleState::new(origin, 45.0))?;
    Ok(trace.primitives)
}

/// Polygon outline of radius `size` with up to five mini-kolams at 0.6 × `size`.
pub fn inscribed_polygon(
    canvas: Canvas,
    symbols: &str,
    vertices: u32,
    size: f32,
    dot_size: u32,
) -> Result<Vec<Primitive>> {
    if vertices < 3 {
        return Err(KolamError::invalid(
            "polygon_sides",
            format!("a polygon needs at least 3 vertices, got {vertices}"),
        ));
    }

    const COLORS: [&str; 5] = ["red", "blue", "green", "orange", "purple"];
    let center = canvas.center();
    let mut out = vec![Primitive::Polygon {
        points: polygon_vertices(center, size, vertices),
        style: Style::stroke(Color::named("purple"), 3.0),
    }];

    let motif = (dot_size / 2).max(1) as f32;
    for i in 0..vertices.min(5) {
        let origin = on_circle(center, size * 0.6, ring_angle(i, vertices));
        let color = Color::named(COLORS[i as usize % COLORS.len()]);
        out.extend(mini_kolam(symbols, origin, motif, color)?);
    }

    Ok(out)
}

/// Outer circle plus three inner rings, each ringed with eight hue-rotated mini-kolams.
///
/// Inner rings whose radius would be 20px or less are skipped.
pub fn concentric_circles(
    canvas: Canvas,
    symbols: &str,
    radius: u32,
    dot_size: u32,
) -> Result<Vec<Primitive>> {
    const RINGS: u32 = 3;
    const MOTIFS: u32 = 8;

    let center = canvas.center();
    let mut out = vec![Primitive::Circle {
        center,
        radius: radius as f32,
        style: Style::stroke(Color::named("blue"), 3.0),
    }];

    for i in 0..RINGS {
        let ring = radius - (i + 1) * (radius / (RINGS + 1));
        if ring <= 20 {
            continue;
        }
        let ring = ring as f32;
        out.push(Primitive::Circle {
            center,
            radius: ring,
            style: Style::stroke(Color::named("lightblue"), 1.0).with_opacity(0.7),
        });

        let motif = (dot_size / (i + 2)).max(5) as f32;
        for j in 0..MOTIFS {
            let origin = on_circle(center, ring, ring_angle(j, MOTIFS));
            let color = Color::hsl((j * 45) as f32, 70.0, 50.0);
            out.extend(mini_kolam(symbols, origin, motif, color)?);
        }
    }

    Ok(out)
}

/// Suzhi, Sikku and Kambi walks side by side, each under a text label.
pub fn combined(canvas: Canvas, symbols: &str, dot_size: f32) -> Result<Vec<Primitive>> {
    let (w, h) = (canvas.width, canvas.height);
    let sections = [
        (Vec2::new((w / 4) as f32, (h / 2) as f32), "Suzhi", "red"),
        (Vec2::new((w / 2) as f32, (h / 2) as f32), "Sikku", "green"),
        (Vec2::new((3 * w / 4) as f32, (h / 2) as f32), "Kambi", "blue"),
    ];

    let mut out = Vec::new();
    for (center, label, color) in sections {
        out.push(Primitive::Text {
            position: center - Vec2::new(30.0, 100.0),
            content: label.to_owned(),
            font_size: 16.0,
            font_family: "Arial".to_owned(),
            style: Style::filled(Color::named(color)),
        });

        let config = TurtleConfig {
            step_length: dot_size,
            stroke_width: 3.0,
            symbol_limit: Some(COMBINED_SYMBOLS),
            ..TurtleConfig::default()
        };
        let mut interpreter = KolamInterpreter::new(config)
            .with_stroke(StrokePolicy::Solid(Color::named(color)))
            .with_trace(TraceStyle::Segments);
        interpreter.populate_standard_symbols(BendStyle::Hook, false);

        let trace = interpreter.interpret(symbols, TurtleState::new(center, 45.0))?;
        out.extend(trace.primitives);
    }

    Ok(out)
}

/// Half the rhombus side, in whole pixels.
fn rhombus_half(side: u32) -> f32 {
    (side / 2) as f32
}

/// Diamond of the given side centered on the canvas, drawn faintly.
pub fn rhombus_outline(canvas: Canvas, side: u32) -> Primitive {
    let c = canvas.center();
    let half = rhombus_half(side);
    Primitive::Polygon {
        points: vec![
            c - Vec2::new(0.0, half),
            c + Vec2::new(half, 0.0),
            c + Vec2::new(0.0, half),
            c - Vec2::new(half, 0.0),
        ],
        style: Style::stroke(Color::named("gray"), 2.0).with_opacity(0.5),
    }
}

/// Turtle start for rhombus-bounded walks: the lower-left corner of the rhombus box.
pub fn rhombus_start(canvas: Canvas, side: u32) -> Vec2 {
    let half = rhombus_half(side);
    canvas.center() + Vec2::new(-half, half)
}
