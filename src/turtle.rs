//! Turtle state and operations for kolam interpretation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The state of the drawing turtle.
///
/// Headings are in degrees on the SVG canvas (y grows downward), so increasing
/// the heading turns the turtle clockwise on screen. The heading is kept in `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current canvas position of the pen.
    pub position: Vec2,

    heading: f32,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            heading: 0.0,
        }
    }
}

impl TurtleState {
    /// Creates a turtle at `position` facing `heading` degrees, wrapped into `[0, 360)`.
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading: normalize_heading(heading),
        }
    }

    /// Current heading in degrees, within `[0, 360)`.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Unit vector along the current heading.
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading.to_radians())
    }

    /// Unit vector pointing to the turtle's right (clockwise of the heading).
    pub fn right(&self) -> Vec2 {
        self.forward().perp()
    }

    /// Rotates the heading by `degrees`; positive turns clockwise on screen.
    pub fn turn(&mut self, degrees: f32) {
        self.heading = normalize_heading(self.heading + degrees);
    }

    /// Moves `distance` along the heading and returns the starting position.
    pub fn advance(&mut self, distance: f32) -> Vec2 {
        let from = self.position;
        self.position += self.forward() * distance;
        from
    }

    /// Sweeps a circular arc of `radius` through `sweep` degrees and returns the
    /// starting position.
    ///
    /// Positive sweeps turn clockwise around a center on the turtle's right,
    /// negative sweeps counter-clockwise around one on its left. The heading
    /// stays tangent to the arc, so it ends rotated by `sweep`.
    pub fn sweep(&mut self, radius: f32, sweep: f32) -> Vec2 {
        let from = self.position;
        let side = if sweep < 0.0 { -1.0 } else { 1.0 };
        let center = from + self.right() * radius * side;
        let end_angle = (self.heading - 90.0 * side + sweep).to_radians();
        self.position = center + Vec2::from_angle(end_angle) * radius;
        self.turn(sweep);
        from
    }
}

/// Wraps any angle in degrees into `[0, 360)`.
pub fn normalize_heading(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// How the composite `B` symbol finishes after its 270° loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BendStyle {
    /// Forward step, then the loop.
    #[default]
    Hook,
    /// Forward step, the loop, then a second forward step of the same length.
    Knot,
}

/// Operations that can be performed by the kolam turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum KolamOp {
    /// Draw a straight segment of one step (`F`).
    Forward,
    /// Draw a clockwise arc of one step radius through the given sweep (`A`).
    Arc(f32),
    /// Reduced forward step followed by a loop of the given sweep (`B`).
    Bend { sweep: f32, style: BendStyle },
    /// Rotate by the configured turn angle times the sign (`+`/`-`).
    Turn(f32),
    /// Symbol with no registered meaning; draws nothing.
    Ignore,
}
