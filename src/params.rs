//! The flat parameter set accepted by every pattern kind, and its validation.

use crate::catalog::PatternKind;
use crate::config::Limits;
use crate::coordinates::Point;
use crate::error::{KolamError, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Sub-style of the traditional rangoli pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloralStyle {
    #[default]
    Lotus,
    Peacock,
    Flower,
    Geometric,
}

impl FromStr for FloralStyle {
    type Err = KolamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lotus" => Ok(Self::Lotus),
            "peacock" => Ok(Self::Peacock),
            "flower" => Ok(Self::Flower),
            "geometric" => Ok(Self::Geometric),
            other => Err(KolamError::invalid(
                "pattern_type",
                format!("must be one of lotus, peacock, flower, geometric; got `{other}`"),
            )),
        }
    }
}

/// How coordinate-driven points are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectStyle {
    /// Straight line between each consecutive pair.
    #[default]
    Sequential,
    /// Unconnected point markers.
    Dots,
    /// Chain of quadratic curves through the points.
    Curves,
    /// One polyline path, closed back to the first point.
    Closed,
}

impl FromStr for ConnectStyle {
    type Err = KolamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "dots" => Ok(Self::Dots),
            "curves" => Ok(Self::Curves),
            "closed" => Ok(Self::Closed),
            other => Err(KolamError::invalid(
                "connect_type",
                format!("must be one of sequential, dots, curves, closed; got `{other}`"),
            )),
        }
    }
}

/// Parameters for one generation request. Fields a pattern does not use are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParams {
    /// Dot spacing / turtle step length.
    pub dot_size: u32,
    pub iterations: u32,
    pub width: u32,
    pub height: u32,
    pub rhombus_size: u32,
    #[serde(alias = "polygon_vertices")]
    pub polygon_sides: u32,
    pub polygon_size: u32,
    pub circle_radius: u32,
    pub grid_size: u32,
    pub pattern_type: FloralStyle,
    #[serde(deserialize_with = "crate::coordinates::deserialize_points")]
    pub coordinates: Vec<Point>,
    pub connect_type: ConnectStyle,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            dot_size: 10,
            iterations: 6,
            width: 800,
            height: 600,
            rhombus_size: 5,
            polygon_sides: 6,
            polygon_size: 100,
            circle_radius: 100,
            grid_size: 7,
            pattern_type: FloralStyle::Lotus,
            coordinates: Vec::new(),
            connect_type: ConnectStyle::Sequential,
        }
    }
}

impl PatternParams {
    /// Returns the first limit violated for `kind`, if any.
    pub fn validate(&self, kind: PatternKind, limits: &Limits) -> Result<()> {
        match self.violations(kind, limits).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Collects every limit violated for `kind`.
    pub fn violations(&self, kind: PatternKind, limits: &Limits) -> Vec<KolamError> {
        let mut out = Vec::new();

        check(&mut out, "dot_size", self.dot_size, &limits.dot_size);
        check(&mut out, "width", self.width, &limits.canvas);
        check(&mut out, "height", self.height, &limits.canvas);

        match kind {
            PatternKind::Kambi | PatternKind::Rhombus => {
                check(&mut out, "rhombus_size", self.rhombus_size, &limits.rhombus_size);
            }
            PatternKind::Group => {
                check(&mut out, "iterations", self.iterations, &limits.group_iterations);
                check(&mut out, "polygon_sides", self.polygon_sides, &limits.polygon_sides);
            }
            PatternKind::Traditional => {
                check(
                    &mut out,
                    "iterations",
                    self.iterations,
                    &limits.traditional_iterations,
                );
                check(&mut out, "grid_size", self.grid_size, &limits.grid_size);
            }
            PatternKind::PolygonInscribed => {
                check(&mut out, "iterations", self.iterations, &limits.iterations);
                check(&mut out, "polygon_sides", self.polygon_sides, &limits.polygon_sides);
                check(&mut out, "polygon_size", self.polygon_size, &limits.polygon_size);
            }
            PatternKind::CircleInscribed => {
                check(&mut out, "iterations", self.iterations, &limits.iterations);
                check(&mut out, "circle_radius", self.circle_radius, &limits.circle_radius);
            }
            PatternKind::Custom => self.check_coordinates(&mut out, limits),
            PatternKind::Suzhi
            | PatternKind::FourColor
            | PatternKind::Island
            | PatternKind::Sikku
            | PatternKind::Special
            | PatternKind::SingleKnot
            | PatternKind::Combined => {
                check(&mut out, "iterations", self.iterations, &limits.iterations);
            }
        }

        out
    }

    fn check_coordinates(&self, out: &mut Vec<KolamError>, limits: &Limits) {
        if self.coordinates.len() > limits.max_coordinates {
            out.push(KolamError::invalid(
                "coordinates",
                format!(
                    "at most {} points are accepted, got {}",
                    limits.max_coordinates,
                    self.coordinates.len()
                ),
            ));
            return;
        }

        let (w, h) = (self.width as f32, self.height as f32);
        for (i, p) in self.coordinates.iter().enumerate() {
            if !(p.x.is_finite() && p.y.is_finite()) {
                out.push(KolamError::malformed(i, "x and y must be finite numbers"));
            } else if !(0.0..=w).contains(&p.x) || !(0.0..=h).contains(&p.y) {
                out.push(KolamError::invalid(
                    "coordinates",
                    format!("point {} ({}, {}) is outside the canvas", i + 1, p.x, p.y),
                ));
            }
        }
    }
}

fn check(out: &mut Vec<KolamError>, name: &'static str, value: u32, range: &RangeInclusive<u32>) {
    if !range.contains(&value) {
        out.push(KolamError::invalid(
            name,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ));
    }
}
