//! Registry of named kolam styles.
//!
//! Each [`PatternKind`] maps to a read-only [`PatternConfig`]: the grammar to
//! expand, how the turtle colors and groups its strokes, and the
//! [`Strategy`] that turns the result into a document. The shared default
//! grammar is passed in through [`CatalogDefaults`] when the catalog is built.

use crate::config::TurtleConfig;
use crate::document::Color;
use crate::error::{KolamError, Result};
use crate::grammar::Grammar;
use crate::interpreter::{KolamInterpreter, StrokePolicy, TraceStyle};
use crate::turtle::BendStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Suzhi,
    Kambi,
    #[serde(rename = "fourcolor")]
    FourColor,
    Island,
    Sikku,
    Special,
    Group,
    Traditional,
    SingleKnot,
    Rhombus,
    PolygonInscribed,
    CircleInscribed,
    Combined,
    Custom,
}

impl PatternKind {
    pub const ALL: [Self; 14] = [
        Self::Suzhi,
        Self::Kambi,
        Self::FourColor,
        Self::Island,
        Self::Sikku,
        Self::Special,
        Self::Group,
        Self::Traditional,
        Self::SingleKnot,
        Self::Rhombus,
        Self::PolygonInscribed,
        Self::CircleInscribed,
        Self::Combined,
        Self::Custom,
    ];

    /// Wire name, as accepted by [`FromStr`](std::str::FromStr).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Suzhi => "suzhi",
            Self::Kambi => "kambi",
            Self::FourColor => "fourcolor",
            Self::Island => "island",
            Self::Sikku => "sikku",
            Self::Special => "special",
            Self::Group => "group",
            Self::Traditional => "traditional",
            Self::SingleKnot => "single_knot",
            Self::Rhombus => "rhombus",
            Self::PolygonInscribed => "polygon_inscribed",
            Self::CircleInscribed => "circle_inscribed",
            Self::Combined => "combined",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for PatternKind {
    type Err = KolamError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| KolamError::UnknownPatternKind(s.to_owned()))
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a pattern kind is turned into primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Expand the grammar and walk it from the canvas center.
    Turtle,
    /// Walk from the rhombus corner, expanding `rhombus_size` times.
    Rhombus { outline: bool },
    /// Regular polygon with star connectors.
    Polygon,
    /// Dot grid plus a floral motif.
    Traditional,
    /// Polygon outline with mini-kolams inside.
    InscribedPolygon,
    /// Concentric circles ringed with mini-kolams.
    InscribedCircle,
    /// Three labelled turtle walks side by side.
    Combined,
    /// User-supplied points.
    Coordinates,
}

/// Read-only description of one pattern kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatternConfig {
    pub kind: PatternKind,
    pub name: String,
    pub description: String,
    /// Request parameters the kind reads.
    pub parameters: Vec<&'static str>,
    pub grammar: Grammar,
    pub stroke: StrokePolicy,
    pub trace: TraceStyle,
    pub stroke_width: f32,
    /// Initial turtle heading in degrees.
    pub start_heading: f32,
    pub bend: BendStyle,
    pub uses_turn_angles: bool,
    pub is_polygon_style: bool,
    pub is_traditional_style: bool,
    pub strategy: Strategy,
}

impl PatternConfig {
    /// A solid black, path-traced turtle pattern; callers override the rest.
    fn base(kind: PatternKind, name: &str, description: &str, grammar: Grammar) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            description: description.to_owned(),
            parameters: vec!["dot_size", "iterations"],
            grammar,
            stroke: StrokePolicy::Solid(Color::named("black")),
            trace: TraceStyle::Path,
            stroke_width: 2.0,
            start_heading: 0.0,
            bend: BendStyle::Hook,
            uses_turn_angles: false,
            is_polygon_style: false,
            is_traditional_style: false,
            strategy: Strategy::Turtle,
        }
    }

    /// Whether strokes switch to random colors while drawing.
    pub fn is_multicolor(&self) -> bool {
        matches!(self.stroke, StrokePolicy::Random { .. })
    }

    /// Builds an interpreter wired with this pattern's vocabulary and stroke policy.
    ///
    /// `turtle` supplies the turn angle and color-change probability; the step
    /// length is taken from `step_length`.
    pub fn interpreter(&self, turtle: &TurtleConfig, step_length: f32) -> KolamInterpreter {
        let config = TurtleConfig {
            step_length,
            stroke_width: self.stroke_width,
            ..turtle.clone()
        };
        let mut interpreter = KolamInterpreter::new(config)
            .with_stroke(self.stroke.clone())
            .with_trace(self.trace);
        interpreter.populate_standard_symbols(self.bend, self.uses_turn_angles);
        interpreter
    }

    /// Listing entry for this pattern.
    pub fn descriptor(&self) -> PatternDescriptor {
        PatternDescriptor {
            id: self.kind.as_str(),
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
        }
    }
}

/// Public listing entry for a pattern kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternDescriptor {
    pub id: &'static str,
    pub name: String,
    pub description: String,
    pub parameters: Vec<&'static str>,
}

/// Values shared by most catalog entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogDefaults {
    pub grammar: Grammar,
    /// Kind used by lenient lookups when a name is not registered.
    pub default_kind: PatternKind,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            grammar: Grammar::new("FBFBFBFB", [('A', "AFBFA"), ('B', "AFBFBFBFA")]),
            default_kind: PatternKind::Suzhi,
        }
    }
}

/// Read-only registry of pattern configurations keyed by kind.
#[derive(Clone, Debug)]
pub struct PatternCatalog {
    entries: BTreeMap<PatternKind, PatternConfig>,
    default_kind: PatternKind,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::standard(&CatalogDefaults::default())
    }
}

impl PatternCatalog {
    /// A catalog with no entries; lenient lookups fall back to `default_kind`.
    pub fn empty(default_kind: PatternKind) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_kind,
        }
    }

    /// Builds the full catalog of kolam styles.
    pub fn standard(defaults: &CatalogDefaults) -> Self {
        use PatternKind as K;

        let shared = &defaults.grammar;
        let solid = |name: &str| StrokePolicy::Solid(Color::named(name));
        let per_symbol = |f: &str, a: &str, b: &str| StrokePolicy::PerSymbol {
            colors: BTreeMap::from([
                ('F', Color::named(f)),
                ('A', Color::named(a)),
                ('B', Color::named(b)),
            ]),
            fallback: Color::named("black"),
        };

        let mut catalog = Self::empty(defaults.default_kind);
        let entries = [
            PatternConfig::base(
                K::Suzhi,
                "Suzhi Kolam",
                "Traditional Suzhi Kolam pattern using L-Systems",
                shared.clone(),
            ),
            PatternConfig {
                stroke: solid("blue"),
                parameters: vec!["dot_size", "rhombus_size"],
                strategy: Strategy::Rhombus { outline: false },
                ..PatternConfig::base(
                    K::Kambi,
                    "Kambi Kolam",
                    "Kambi Kolam pattern within a rhombus shape",
                    shared.clone(),
                )
            },
            PatternConfig {
                stroke: StrokePolicy::Random {
                    initial: Color::named("black"),
                },
                ..PatternConfig::base(
                    K::FourColor,
                    "Four-Color Kolam",
                    "Colorful Kolam with randomly changing colors",
                    shared.clone(),
                )
            },
            PatternConfig {
                stroke: solid("green"),
                ..PatternConfig::base(
                    K::Island,
                    "Island Kolam",
                    "Island-style Kolam with modified L-system rules",
                    Grammar::new(
                        shared.axiom.clone(),
                        [('F', "AB"), ('A', "AFBFA"), ('B', "AFBFBFBFA")],
                    ),
                )
            },
            PatternConfig {
                stroke: solid("purple"),
                ..PatternConfig::base(
                    K::Sikku,
                    "Sikku Kolam",
                    "Step-style Kolam with interlaced patterns",
                    Grammar::new("A", [('A', "FBF"), ('B', "AFBFA"), ('F', "F")]),
                )
            },
            PatternConfig {
                stroke: solid("red"),
                uses_turn_angles: true,
                ..PatternConfig::base(
                    K::Special,
                    "Special Variety Kolam",
                    "Advanced L-system with angle-based transformations",
                    Grammar::new("A", [('A', "B+FA-FB-FB-FB-FA+B"), ('B', "BB")]),
                )
            },
            PatternConfig {
                stroke: solid("navy"),
                parameters: vec!["dot_size", "iterations", "polygon_sides"],
                is_polygon_style: true,
                strategy: Strategy::Polygon,
                ..PatternConfig::base(
                    K::Group,
                    "Group Theory Kolam",
                    "Polygon-based Kolam using group theory principles",
                    shared.clone(),
                )
            },
            PatternConfig {
                parameters: vec!["dot_size", "iterations", "grid_size", "pattern_type"],
                is_traditional_style: true,
                strategy: Strategy::Traditional,
                ..PatternConfig::base(
                    K::Traditional,
                    "Traditional Rangoli",
                    "Rangoli designs drawn over a square dot grid",
                    shared.clone(),
                )
            },
            PatternConfig {
                stroke: per_symbol("green", "blue", "red"),
                trace: TraceStyle::Segments,
                stroke_width: 4.0,
                start_heading: 45.0,
                bend: BendStyle::Knot,
                ..PatternConfig::base(
                    K::SingleKnot,
                    "Single Knot Kolam",
                    "Single continuous knot with per-symbol colors",
                    shared.clone(),
                )
            },
            PatternConfig {
                stroke: per_symbol("black", "blue", "red"),
                trace: TraceStyle::Segments,
                stroke_width: 3.0,
                parameters: vec!["dot_size", "rhombus_size"],
                strategy: Strategy::Rhombus { outline: true },
                ..PatternConfig::base(
                    K::Rhombus,
                    "Rhombus Kolam",
                    "L-System walk inside a rhombus boundary",
                    shared.clone(),
                )
            },
            PatternConfig {
                parameters: vec!["dot_size", "iterations", "polygon_vertices", "polygon_size"],
                is_polygon_style: true,
                strategy: Strategy::InscribedPolygon,
                ..PatternConfig::base(
                    K::PolygonInscribed,
                    "Polygon Inscribed Kolam",
                    "Several small kolams inscribed in a polygon",
                    shared.clone(),
                )
            },
            PatternConfig {
                parameters: vec!["dot_size", "iterations", "circle_radius"],
                strategy: Strategy::InscribedCircle,
                ..PatternConfig::base(
                    K::CircleInscribed,
                    "Circle Inscribed Kolam",
                    "Concentric circles ringed with small kolams",
                    shared.clone(),
                )
            },
            PatternConfig {
                strategy: Strategy::Combined,
                ..PatternConfig::base(
                    K::Combined,
                    "Suzhi-Sikku-Kambi Combined",
                    "Three traditional patterns side by side",
                    shared.clone(),
                )
            },
            PatternConfig {
                parameters: vec!["coordinates", "connect_type"],
                strategy: Strategy::Coordinates,
                ..PatternConfig::base(
                    K::Custom,
                    "Custom Kolam",
                    "Custom Kolam from coordinate points",
                    shared.clone(),
                )
            },
        ];

        for entry in entries {
            catalog.register(entry);
        }
        catalog
    }

    /// Adds or replaces an entry, returning the one it replaced.
    pub fn register(&mut self, config: PatternConfig) -> Option<PatternConfig> {
        self.entries.insert(config.kind, config)
    }

    /// Kind used when a lenient lookup misses.
    pub fn default_kind(&self) -> PatternKind {
        self.default_kind
    }

    /// Strict lookup by kind.
    pub fn lookup(&self, kind: PatternKind) -> Result<&PatternConfig> {
        self.entries
            .get(&kind)
            .ok_or_else(|| KolamError::UnknownPatternKind(kind.to_string()))
    }

    /// Strict lookup by wire name.
    pub fn lookup_name(&self, name: &str) -> Result<&PatternConfig> {
        self.lookup(name.parse()?)
    }

    /// Lookup by wire name that falls back to the default kind when `name` is unknown.
    pub fn resolve_lenient(&self, name: &str) -> Result<&PatternConfig> {
        match self.lookup_name(name) {
            Err(KolamError::UnknownPatternKind(_)) => {
                tracing::warn!(
                    requested = name,
                    fallback = %self.default_kind,
                    "unknown pattern kind, using default"
                );
                self.lookup(self.default_kind)
            }
            found => found,
        }
    }

    /// Entries in [`PatternKind`] declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternConfig> {
        self.entries.values()
    }

    /// Descriptors for every registered kind, in catalog order.
    pub fn descriptors(&self) -> Vec<PatternDescriptor> {
        self.iter().map(PatternConfig::descriptor).collect()
    }
}
