//! Request-level entry point: resolves a pattern kind, validates parameters and
//! renders the matching strategy into a [`Document`].

use crate::catalog::{PatternCatalog, PatternConfig, Strategy};
use crate::config::KolamConfig;
use crate::coordinates;
use crate::document::Document;
use crate::error::{ErrorReport, KolamError, Result};
use crate::floral;
use crate::generators::{self, Canvas};
use crate::params::PatternParams;
use crate::turtle::TurtleState;
use rand::Rng;
use std::panic::{self, AssertUnwindSafe};

/// Generates kolam documents from a read-only catalog and configuration.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
#[derive(Clone, Debug, Default)]
pub struct KolamGenerator {
    catalog: PatternCatalog,
    config: KolamConfig,
}

impl KolamGenerator {
    /// Builds a generator over `catalog` with the given settings.
    pub fn new(catalog: PatternCatalog, config: KolamConfig) -> Self {
        Self { catalog, config }
    }

    /// The catalog requests are resolved against.
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Turtle settings and limits applied to every request.
    pub fn config(&self) -> &KolamConfig {
        &self.config
    }

    /// Looks up `name`, falling back to the default kind only when
    /// [`KolamConfig::lenient_lookup`] is set.
    pub fn resolve(&self, name: &str) -> Result<&PatternConfig> {
        if self.config.lenient_lookup {
            self.catalog.resolve_lenient(name)
        } else {
            self.catalog.lookup_name(name)
        }
    }

    /// Resolves `name` and checks `params` against the configured limits,
    /// including the length the grammar would expand to.
    ///
    /// Nothing is expanded or drawn, so this is cheap enough to run on every
    /// request before [`render`](Self::render).
    pub fn validate(&self, name: &str, params: &PatternParams) -> Result<&PatternConfig> {
        let pattern = self.resolve(name)?;
        let limits = &self.config.limits;
        params.validate(pattern.kind, limits)?;

        if let Some((param, rounds)) = expansion_rounds(pattern.strategy, params) {
            let len = pattern.grammar.expanded_len(rounds as usize);
            if len > limits.max_symbols {
                return Err(KolamError::invalid(
                    param,
                    format!(
                        "{rounds} rounds of `{}` expand to {len} symbols, above the limit of {}",
                        pattern.kind, limits.max_symbols
                    ),
                ));
            }
        }
        Ok(pattern)
    }

    /// Renders `name` with `params` into a document.
    pub fn render(&self, name: &str, params: &PatternParams) -> Result<Document> {
        self.render_with_rng(name, params, &mut rand::thread_rng())
    }

    /// Renders with an explicit random source for multicolor patterns.
    pub fn render_with_rng<R: Rng>(
        &self,
        name: &str,
        params: &PatternParams,
        rng: &mut R,
    ) -> Result<Document> {
        let pattern = self.validate(name, params)?;

        let span = tracing::info_span!("render", kind = %pattern.kind);
        let _guard = span.enter();
        tracing::info!(
            iterations = params.iterations,
            dot_size = params.dot_size,
            width = params.width,
            height = params.height,
            "generating kolam"
        );

        let canvas = Canvas::new(params.width, params.height);
        let dot = params.dot_size as f32;
        let mut doc = Document::new(params.width, params.height);

        match pattern.strategy {
            Strategy::Turtle => {
                let symbols = expand(pattern, params.iterations);
                let start = TurtleState::new(canvas.center(), pattern.start_heading);
                let trace = pattern
                    .interpreter(&self.config.turtle, dot)
                    .interpret_with_rng(&symbols, start, rng)?;
                doc.extend(trace.primitives);
            }
            Strategy::Rhombus { outline } => {
                let side = params.rhombus_size * params.dot_size;
                if outline {
                    doc.append(generators::rhombus_outline(canvas, side));
                }
                let symbols = expand(pattern, params.rhombus_size);
                let start = TurtleState::new(
                    generators::rhombus_start(canvas, side),
                    pattern.start_heading,
                );
                let trace = pattern
                    .interpreter(&self.config.turtle, dot)
                    .interpret_with_rng(&symbols, start, rng)?;
                doc.extend(trace.primitives);
            }
            Strategy::Polygon => {
                let radius = (params.dot_size * (params.iterations + 2) * 5) as f32;
                doc.extend(generators::polygon(
                    canvas,
                    params.polygon_sides,
                    radius,
                    dot,
                )?);
            }
            Strategy::Traditional => doc.extend(floral::traditional(
                canvas,
                params.pattern_type,
                params.grid_size,
                params.dot_size,
                params.iterations,
            )),
            Strategy::InscribedPolygon => {
                let symbols = expand(pattern, params.iterations);
                doc.extend(generators::inscribed_polygon(
                    canvas,
                    &symbols,
                    params.polygon_sides,
                    params.polygon_size as f32,
                    params.dot_size,
                )?);
            }
            Strategy::InscribedCircle => {
                let symbols = expand(pattern, params.iterations);
                doc.extend(generators::concentric_circles(
                    canvas,
                    &symbols,
                    params.circle_radius,
                    params.dot_size,
                )?);
            }
            Strategy::Combined => {
                let symbols = expand(pattern, params.iterations);
                doc.extend(generators::combined(canvas, &symbols, dot)?);
            }
            Strategy::Coordinates => {
                doc.extend(coordinates::connect(&params.coordinates, params.connect_type));
            }
        }

        tracing::debug!(primitives = doc.primitives().len(), "kolam document ready");
        Ok(doc)
    }

    /// Renders `name` with `params` straight to SVG text.
    pub fn generate(&self, name: &str, params: &PatternParams) -> Result<String> {
        Ok(self.render(name, params)?.to_svg())
    }

    /// Like [`generate`](Self::generate), but never unwinds: every failure,
    /// including a panic during generation, comes back as an [`ErrorReport`].
    pub fn generate_report(
        &self,
        name: &str,
        params: &PatternParams,
    ) -> std::result::Result<String, ErrorReport> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.generate(name, params))) {
            Ok(Ok(svg)) => Ok(svg),
            Ok(Err(err)) => {
                tracing::warn!(error = %err, kind = name, "kolam generation failed");
                Err(err.into())
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "generation panicked".to_owned());
                tracing::error!(%reason, kind = name, "kolam generation panicked");
                Err(KolamError::Internal(reason).into())
            }
        }
    }
}

/// The parameter that sets the grammar rounds for `strategy`, and its value.
fn expansion_rounds(strategy: Strategy, params: &PatternParams) -> Option<(&'static str, u32)> {
    match strategy {
        Strategy::Turtle
        | Strategy::InscribedPolygon
        | Strategy::InscribedCircle
        | Strategy::Combined => Some(("iterations", params.iterations)),
        Strategy::Rhombus { .. } => Some(("rhombus_size", params.rhombus_size)),
        Strategy::Polygon | Strategy::Traditional | Strategy::Coordinates => None,
    }
}

fn expand(pattern: &PatternConfig, iterations: u32) -> String {
    let symbols = pattern.grammar.expand(iterations as usize);
    tracing::debug!(
        iterations,
        symbols = symbols.len(),
        "expanded kolam grammar"
    );
    symbols
}
