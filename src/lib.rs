//! # kolam-turtle
//!
//! Procedural generator for kolam line-art. An L-System grammar is expanded
//! into a symbol string, a turtle walks that string emitting lines and arcs,
//! and the resulting primitives are collected into an SVG [`Document`].
//! Polygon, concentric-circle and floral styles are drawn from closed-form
//! geometry instead of a grammar.
//!
//! Most callers only need [`KolamGenerator`]:
//!
//! ```
//! use kolam_turtle::{KolamGenerator, PatternParams};
//!
//! let generator = KolamGenerator::default();
//! let params = PatternParams { iterations: 2, ..Default::default() };
//! let svg = generator.generate("suzhi", &params).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod catalog;
pub mod config;
pub mod coordinates;
pub mod document;
pub mod error;
pub mod floral;
pub mod generators;
pub mod grammar;
pub mod interpreter;
pub mod kolam;
pub mod params;
pub mod turtle;

pub use catalog::*;
pub use config::*;
pub use coordinates::{Point, connect, parse_points};
pub use document::*;
pub use error::{ErrorReport, KolamError};
pub use grammar::*;
pub use interpreter::*;
pub use kolam::*;
pub use params::*;
pub use turtle::*;
