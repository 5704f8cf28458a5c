//! Coordinate-driven mode: user-supplied points drawn without any grammar.

use crate::document::{Color, PathData, Primitive, Style};
use crate::error::{KolamError, Result};
use crate::params::ConnectStyle;
use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A user-supplied canvas point, `{"x": .., "y": ..}` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Parses a JSON array of `{x, y}` objects.
///
/// Values may be numbers or numeric strings. A missing field, a non-object
/// entry or a non-numeric value fails with
/// [`KolamError::MalformedCoordinateInput`] naming the offending index.
pub fn parse_points(value: &Value) -> Result<Vec<Point>> {
    let entries = value
        .as_array()
        .ok_or_else(|| KolamError::invalid("coordinates", "expected an array of points"))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let obj = entry
                .as_object()
                .ok_or_else(|| KolamError::malformed(i, "expected an object with x and y"))?;
            let x = numeric_field(obj.get("x"), i, "x")?;
            let y = numeric_field(obj.get("y"), i, "y")?;
            Ok(Point::new(x, y))
        })
        .collect()
}

/// Serde hook applying the [`parse_points`] rules to a point list field.
pub(crate) fn deserialize_points<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<Point>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_points(&value).map_err(serde::de::Error::custom)
}

fn numeric_field(value: Option<&Value>, index: usize, field: &str) -> Result<f32> {
    let value = value.ok_or_else(|| KolamError::malformed(index, format!("missing `{field}`")))?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .map(|n| n as f32)
        .ok_or_else(|| KolamError::malformed(index, format!("`{field}` must be numeric")))
}

/// Emits the primitives joining `points` in the given style.
///
/// An empty point list yields no primitives.
pub fn connect(points: &[Point], style: ConnectStyle) -> Vec<Primitive> {
    let points: Vec<Vec2> = points.iter().copied().map(Vec2::from).collect();
    let ink = || Style::stroke(Color::named("black"), 2.0);

    match style {
        ConnectStyle::Sequential => points
            .windows(2)
            .map(|pair| Primitive::Line {
                from: pair[0],
                to: pair[1],
                style: ink(),
            })
            .collect(),
        ConnectStyle::Dots => points
            .iter()
            .map(|&center| Primitive::Circle {
                center,
                radius: 1.0,
                style: Style::filled(Color::named("black")),
            })
            .collect(),
        ConnectStyle::Curves => {
            // each middle point is the control of a curve ending at its successor
            if points.len() <= 2 {
                return Vec::new();
            }
            let mut data = PathData::new(points[0]);
            for pair in points[1..].windows(2) {
                data = data.quad_to(pair[0], pair[1]);
            }
            vec![Primitive::Path { data, style: ink() }]
        }
        ConnectStyle::Closed => {
            let Some((&first, rest)) = points.split_first() else {
                return Vec::new();
            };
            let mut data = rest.iter().fold(PathData::new(first), |d, &p| d.line_to(p));
            if points.len() > 2 {
                data = data.close();
            }
            vec![Primitive::Path {
                data,
                style: Style::stroke(Color::named("red"), 2.0),
            }]
        }
    }
}
