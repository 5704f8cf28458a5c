//! Interpreter that converts an expanded L-System string into drawing primitives.
//!
//! The entry point is [`KolamInterpreter`]. Configure it with a [`TurtleConfig`],
//! register symbol-to-operation mappings via [`KolamInterpreter::set_op`] or
//! [`KolamInterpreter::populate_standard_symbols`], pick a [`StrokePolicy`] and
//! [`TraceStyle`], then call [`KolamInterpreter::interpret`].

use crate::config::TurtleConfig;
use crate::document::{Color, PathData, PathSegment, Primitive, Style};
use crate::error::{KolamError, Result};
use crate::turtle::{BendStyle, KolamOp, TurtleState};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::f32::consts::SQRT_2;

/// How stroke colors are chosen while walking the symbol string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StrokePolicy {
    /// Every primitive uses one color.
    Solid(Color),
    /// Color keyed by the symbol being drawn.
    PerSymbol {
        colors: BTreeMap<char, Color>,
        fallback: Color,
    },
    /// Start with `initial`, then randomly switch to fresh RGB colors.
    Random { initial: Color },
}

/// Shape of the interpreter output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStyle {
    /// Consecutive moves are joined into paths; a color change starts a new
    /// path and paths are grouped by color at the end.
    #[default]
    Path,
    /// Every move is its own `Line` or `Arc` primitive.
    Segments,
}

/// Result of one interpretation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub primitives: Vec<Primitive>,
    /// Turtle state after the last symbol.
    pub turtle: TurtleState,
}

/// Interprets L-System output as turtle moves.
#[derive(Clone, Debug)]
pub struct KolamInterpreter {
    op_map: HashMap<char, KolamOp>,
    config: TurtleConfig,
    stroke: StrokePolicy,
    trace: TraceStyle,
}

impl KolamInterpreter {
    /// Creates an interpreter with an empty symbol map, a solid black stroke
    /// and path output.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
            stroke: StrokePolicy::Solid(Color::named("black")),
            trace: TraceStyle::Path,
        }
    }

    /// Replaces the entire symbol-to-operation map (builder pattern).
    pub fn with_map(mut self, map: HashMap<char, KolamOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Sets how strokes are colored (builder pattern).
    pub fn with_stroke(mut self, stroke: StrokePolicy) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets whether moves join into paths or stay separate segments (builder pattern).
    pub fn with_trace(mut self, trace: TraceStyle) -> Self {
        self.trace = trace;
        self
    }

    /// Returns the current turtle configuration.
    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Assigns a single [`KolamOp`] to a symbol, replacing any previous mapping.
    pub fn set_op(&mut self, symbol: char, op: KolamOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers the kolam drawing vocabulary.
    ///
    /// `F` draws a step, `A` a quarter arc and `B` the 270° loop finished per
    /// `bend`. The turn symbols `+`/`-` are only registered when
    /// `uses_turn_angles` is set; otherwise they are ignored like any other
    /// unknown symbol.
    pub fn populate_standard_symbols(&mut self, bend: BendStyle, uses_turn_angles: bool) {
        self.set_op('F', KolamOp::Forward);
        self.set_op('A', KolamOp::Arc(90.0));
        self.set_op(
            'B',
            KolamOp::Bend {
                sweep: 270.0,
                style: bend,
            },
        );
        if uses_turn_angles {
            self.set_op('+', KolamOp::Turn(1.0));
            self.set_op('-', KolamOp::Turn(-1.0));
        }
    }

    /// Interprets `symbols` starting from `start`, sampling multicolor
    /// switches from the thread-local RNG.
    pub fn interpret(&self, symbols: &str, start: TurtleState) -> Result<Trace> {
        self.interpret_with_rng(symbols, start, &mut rand::thread_rng())
    }

    /// Interprets `symbols` starting from `start`.
    ///
    /// `rng` is only consulted under [`StrokePolicy::Random`], once per symbol.
    /// Fails with [`KolamError::InvalidParameter`] when the step length is not
    /// a positive finite number.
    pub fn interpret_with_rng<R: Rng>(
        &self,
        symbols: &str,
        start: TurtleState,
        rng: &mut R,
    ) -> Result<Trace> {
        let step = self.config.step_length;
        if !(step.is_finite() && step > 0.0) {
            return Err(KolamError::invalid(
                "step_length",
                format!("must be a positive number, got {step}"),
            ));
        }

        let mut turtle = start;
        let mut sink = Sink::new(self.trace, self.config.stroke_width);
        let mut pen = match &self.stroke {
            StrokePolicy::Solid(c) => c.clone(),
            StrokePolicy::PerSymbol { fallback, .. } => fallback.clone(),
            StrokePolicy::Random { initial } => initial.clone(),
        };
        let limit = self.config.symbol_limit.unwrap_or(usize::MAX);

        for symbol in symbols.chars().take(limit) {
            match &self.stroke {
                StrokePolicy::Random { .. } => {
                    if rng.r#gen::<f32>() < self.config.color_change_probability {
                        pen = Color::Rgb(rng.r#gen(), rng.r#gen(), rng.r#gen());
                        sink.break_path();
                    }
                }
                StrokePolicy::PerSymbol { colors, fallback } => {
                    pen = colors.get(&symbol).unwrap_or(fallback).clone();
                }
                StrokePolicy::Solid(_) => {}
            }

            let op = self.op_map.get(&symbol).copied().unwrap_or(KolamOp::Ignore);
            match op {
                KolamOp::Forward => {
                    let from = turtle.advance(step);
                    sink.line(from, turtle.position, &pen);
                }
                KolamOp::Arc(sweep) => {
                    let from = turtle.sweep(step, sweep);
                    sink.arc(from, turtle.position, step, sweep, &pen);
                }
                KolamOp::Bend { sweep, style } => {
                    let reduced = step / SQRT_2;
                    let from = turtle.advance(reduced);
                    sink.line(from, turtle.position, &pen);
                    let from = turtle.sweep(reduced, sweep);
                    sink.arc(from, turtle.position, reduced, sweep, &pen);
                    if style == BendStyle::Knot {
                        let from = turtle.advance(reduced);
                        sink.line(from, turtle.position, &pen);
                    }
                }
                KolamOp::Turn(sign) => turtle.turn(sign * self.config.turn_angle),
                KolamOp::Ignore => {}
            }
        }

        let primitives = sink.finish();
        tracing::debug!(
            symbols = symbols.len(),
            primitives = primitives.len(),
            "interpreted kolam symbols"
        );

        Ok(Trace { primitives, turtle })
    }
}

/// Collects moves into primitives according to the trace style.
struct Sink {
    trace: TraceStyle,
    width: f32,
    open: Option<(Color, PathData)>,
    closed: Vec<(Color, PathData)>,
    segments: Vec<Primitive>,
}

impl Sink {
    fn new(trace: TraceStyle, width: f32) -> Self {
        Self {
            trace,
            width,
            open: None,
            closed: Vec::new(),
            segments: Vec::new(),
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: &Color) {
        match self.trace {
            TraceStyle::Segments => self.segments.push(Primitive::Line {
                from,
                to,
                style: Style::stroke(color.clone(), self.width),
            }),
            TraceStyle::Path => self.extend(from, PathSegment::LineTo(to), color),
        }
    }

    fn arc(&mut self, from: Vec2, to: Vec2, radius: f32, sweep: f32, color: &Color) {
        match self.trace {
            TraceStyle::Segments => self.segments.push(Primitive::Arc {
                from,
                to,
                radius,
                sweep,
                style: Style::stroke(color.clone(), self.width),
            }),
            TraceStyle::Path => {
                self.extend(from, PathSegment::ArcTo { radius, sweep, to }, color)
            }
        }
    }

    fn extend(&mut self, from: Vec2, segment: PathSegment, color: &Color) {
        if self.open.as_ref().is_some_and(|(c, _)| c != color) {
            self.break_path();
        }
        let (_, data) = self
            .open
            .get_or_insert_with(|| (color.clone(), PathData::new(from)));
        data.push(segment);
    }

    /// Closes the open path; the next move starts a new one.
    fn break_path(&mut self) {
        if let Some((color, data)) = self.open.take()
            && data.draws()
        {
            self.closed.push((color, data));
        }
    }

    fn finish(mut self) -> Vec<Primitive> {
        if self.trace == TraceStyle::Segments {
            return self.segments;
        }
        self.break_path();

        // group by color, keeping first-appearance order
        let mut groups: Vec<(Color, Vec<PathData>)> = Vec::new();
        for (color, data) in self.closed {
            match groups.iter_mut().find(|(c, _)| *c == color) {
                Some((_, paths)) => paths.push(data),
                None => groups.push((color, vec![data])),
            }
        }

        let width = self.width;
        groups
            .into_iter()
            .flat_map(|(color, paths)| {
                paths.into_iter().map(move |data| Primitive::Path {
                    data,
                    style: Style::stroke(color.clone(), width),
                })
            })
            .collect()
    }
}
