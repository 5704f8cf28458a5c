//! Runtime configuration: turtle defaults, validation limits and lookup policy.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Length of one `F` step and radius of one `A` arc.
    pub step_length: f32,
    /// Rotation applied by `+`/`-` (degrees).
    pub turn_angle: f32,
    /// Stroke width of emitted lines and arcs.
    pub stroke_width: f32,
    /// Per-symbol chance of switching to a fresh random color in multicolor mode.
    pub color_change_probability: f32,
    /// Only the first `n` symbols are interpreted when set.
    pub symbol_limit: Option<usize>,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            step_length: 10.0,
            turn_angle: 45.0,
            stroke_width: 2.0,
            color_change_probability: 0.3,
            symbol_limit: None,
        }
    }
}

/// Accepted ranges for request parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Dot size in pixels; doubles as the turtle step.
    pub dot_size: RangeInclusive<u32>,
    /// Canvas width and height in pixels.
    pub canvas: RangeInclusive<u32>,
    /// Grammar rounds for turtle and inscribed kinds.
    pub iterations: RangeInclusive<u32>,
    /// Iterations for `group`, which only scale the polygon radius.
    pub group_iterations: RangeInclusive<u32>,
    /// Floral layers for `traditional`.
    pub traditional_iterations: RangeInclusive<u32>,
    /// Rhombus side in dots; also the number of grammar rounds.
    pub rhombus_size: RangeInclusive<u32>,
    /// Sides of the `group` and `polygon_inscribed` polygons.
    pub polygon_sides: RangeInclusive<u32>,
    /// Polygon radius in pixels for `polygon_inscribed`.
    pub polygon_size: RangeInclusive<u32>,
    /// Outer ring radius in pixels for `circle_inscribed`.
    pub circle_radius: RangeInclusive<u32>,
    /// Dots per side of the traditional grid.
    pub grid_size: RangeInclusive<u32>,
    /// Most points accepted in coordinate mode.
    pub max_coordinates: usize,
    /// Longest expanded symbol string a request may produce.
    pub max_symbols: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            dot_size: 1..=50,
            canvas: 100..=2000,
            iterations: 0..=10,
            group_iterations: 0..=8,
            traditional_iterations: 0..=6,
            // rhombus size doubles as the iteration count
            rhombus_size: 1..=10,
            polygon_sides: 3..=12,
            polygon_size: 10..=1000,
            circle_radius: 10..=1000,
            grid_size: 3..=15,
            max_coordinates: 10_000,
            // suzhi reaches ~700k symbols at 8 rounds, island at 7
            max_symbols: 1_000_000,
        }
    }
}

/// Top-level configuration for [`KolamGenerator`](crate::KolamGenerator).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KolamConfig {
    pub turtle: TurtleConfig,
    pub limits: Limits,
    /// Fall back to the catalog's default pattern for unknown kinds instead of failing.
    pub lenient_lookup: bool,
}
