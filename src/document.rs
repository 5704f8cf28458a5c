//! Vector drawing primitives and the SVG document they are collected into.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A CSS-compatible paint value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// A keyword or hex literal, written verbatim (`black`, `#FF6B6B`).
    Named(String),
    /// 8-bit RGB triple.
    Rgb(u8, u8, u8),
    /// Hue in degrees, saturation and lightness in percent.
    Hsl {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
}

impl Color {
    /// An SVG color keyword or any literal CSS color.
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_owned())
    }

    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::Hsl {
            hue,
            saturation,
            lightness,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({}, {}%, {}%)", Num(*hue), Num(*saturation), Num(*lightness)),
        }
    }
}

/// Paint settings attached to every primitive.
///
/// A missing `fill` is written as `fill="none"`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<Color>,
    pub stroke_width: Option<f32>,
    pub fill: Option<Color>,
    pub opacity: Option<f32>,
}

impl Style {
    /// An unfilled outline.
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: Some(width),
            ..Default::default()
        }
    }

    /// A filled shape without outline.
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Default::default()
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Returns the SVG `(large-arc-flag, sweep-flag)` pair for an arc of `sweep` degrees.
///
/// Sweeps beyond a half turn take the major arc; positive sweeps run in the
/// direction of increasing angle.
pub fn arc_flags(sweep: f32) -> (u8, u8) {
    let large = u8::from(sweep.abs() > 180.0);
    let positive = u8::from(sweep > 0.0);
    (large, positive)
}

/// One command of an SVG path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Circular arc of the given radius and signed sweep (degrees) ending at `to`.
    ArcTo { radius: f32, sweep: f32, to: Vec2 },
    QuadTo { control: Vec2, to: Vec2 },
    Close,
}

/// An ordered list of path commands, always starting with a `MoveTo`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    /// A path that starts with a move to `start`.
    pub fn new(start: Vec2) -> Self {
        Self {
            segments: vec![PathSegment::MoveTo(start)],
        }
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn line_to(mut self, to: Vec2) -> Self {
        self.push(PathSegment::LineTo(to));
        self
    }

    pub fn arc_to(mut self, radius: f32, sweep: f32, to: Vec2) -> Self {
        self.push(PathSegment::ArcTo { radius, sweep, to });
        self
    }

    pub fn quad_to(mut self, control: Vec2, to: Vec2) -> Self {
        self.push(PathSegment::QuadTo { control, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.push(PathSegment::Close);
        self
    }

    /// Segments in drawing order, starting with the initial move.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True once anything beyond the initial `MoveTo` has been added.
    pub fn draws(&self) -> bool {
        self.segments
            .iter()
            .any(|s| !matches!(s, PathSegment::MoveTo(_)))
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match seg {
                PathSegment::MoveTo(p) => write!(f, "M {} {}", Num(p.x), Num(p.y))?,
                PathSegment::LineTo(p) => write!(f, "L {} {}", Num(p.x), Num(p.y))?,
                PathSegment::ArcTo { radius, sweep, to } => {
                    let (large, positive) = arc_flags(*sweep);
                    write!(
                        f,
                        "A {r} {r} 0 {large} {positive} {} {}",
                        Num(to.x),
                        Num(to.y),
                        r = Num(*radius)
                    )?
                }
                PathSegment::QuadTo { control, to } => write!(
                    f,
                    "Q {} {} {} {}",
                    Num(control.x),
                    Num(control.y),
                    Num(to.x),
                    Num(to.y)
                )?,
                PathSegment::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// A single drawing instruction. Immutable once appended to a [`Document`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Rect {
        origin: Vec2,
        size: Vec2,
        style: Style,
    },
    Line {
        from: Vec2,
        to: Vec2,
        style: Style,
    },
    /// A standalone circular arc; `sweep` is signed, in degrees.
    Arc {
        from: Vec2,
        to: Vec2,
        radius: f32,
        sweep: f32,
        style: Style,
    },
    Path {
        data: PathData,
        style: Style,
    },
    Polygon {
        points: Vec<Vec2>,
        style: Style,
    },
    Circle {
        center: Vec2,
        radius: f32,
        style: Style,
    },
    /// Ellipse rotated by `rotation` degrees about its own center.
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        style: Style,
    },
    Text {
        position: Vec2,
        content: String,
        font_size: f32,
        font_family: String,
        style: Style,
    },
}

impl Primitive {
    pub fn style(&self) -> &Style {
        match self {
            Self::Rect { style, .. }
            | Self::Line { style, .. }
            | Self::Arc { style, .. }
            | Self::Path { style, .. }
            | Self::Polygon { style, .. }
            | Self::Circle { style, .. }
            | Self::Ellipse { style, .. }
            | Self::Text { style, .. } => style,
        }
    }
}

/// An ordered list of primitives on a fixed-size canvas.
///
/// The first primitive is always an opaque full-canvas background. Primitives
/// are rendered in append order, so later ones paint over earlier ones.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    width: u32,
    height: u32,
    primitives: Vec<Primitive>,
}

impl Document {
    /// Creates a document with a white background.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::named("white"))
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            primitives: vec![Primitive::Rect {
                origin: Vec2::ZERO,
                size: Vec2::new(width as f32, height as f32),
                style: Style::filled(background),
            }],
        }
    }

    /// Adds a primitive on top of everything drawn so far.
    pub fn append(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All primitives, background included.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Renders the document as a standalone SVG string.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl Extend<Primitive> for Document {
    fn extend<I: IntoIterator<Item = Primitive>>(&mut self, iter: I) {
        self.primitives.extend(iter);
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        for primitive in &self.primitives {
            f.write_str("  ")?;
            write_primitive(f, primitive)?;
            f.write_str("\n")?;
        }
        f.write_str("</svg>\n")
    }
}

fn write_primitive(f: &mut fmt::Formatter<'_>, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Rect {
            origin,
            size,
            style,
        } => write!(
            f,
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            Num(origin.x),
            Num(origin.y),
            Num(size.x),
            Num(size.y),
            Attrs(style)
        ),
        Primitive::Line { from, to, style } => write!(
            f,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            Num(from.x),
            Num(from.y),
            Num(to.x),
            Num(to.y),
            Attrs(style)
        ),
        Primitive::Arc {
            from,
            to,
            radius,
            sweep,
            style,
        } => {
            let data = PathData::new(*from).arc_to(*radius, *sweep, *to);
            write!(f, r#"<path d="{data}"{}/>"#, Attrs(style))
        }
        Primitive::Path { data, style } => {
            write!(f, r#"<path d="{data}"{}/>"#, Attrs(style))
        }
        Primitive::Polygon { points, style } => {
            f.write_str(r#"<polygon points=""#)?;
            for (i, p) in points.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{},{}", Num(p.x), Num(p.y))?;
            }
            write!(f, r#""{}/>"#, Attrs(style))
        }
        Primitive::Circle {
            center,
            radius,
            style,
        } => write!(
            f,
            r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
            Num(center.x),
            Num(center.y),
            Num(*radius),
            Attrs(style)
        ),
        Primitive::Ellipse {
            center,
            radii,
            rotation,
            style,
        } => {
            write!(
                f,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                Num(center.x),
                Num(center.y),
                Num(radii.x),
                Num(radii.y)
            )?;
            if *rotation != 0.0 {
                write!(
                    f,
                    r#" transform="rotate({} {} {})""#,
                    Num(*rotation),
                    Num(center.x),
                    Num(center.y)
                )?;
            }
            write!(f, "{}/>", Attrs(style))
        }
        Primitive::Text {
            position,
            content,
            font_size,
            font_family,
            style,
        } => write!(
            f,
            r#"<text x="{}" y="{}" font-size="{}" font-family="{}"{}>{}</text>"#,
            Num(position.x),
            Num(position.y),
            Num(*font_size),
            Escaped(font_family),
            Attrs(style),
            Escaped(content)
        ),
    }
}

/// Coordinate formatting: at most three decimals, no trailing zeros, no `-0`.
struct Num(f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = (self.0 * 1000.0).round() / 1000.0;
        if v == 0.0 {
            return f.write_str("0");
        }
        write!(f, "{v}")
    }
}

struct Attrs<'a>(&'a Style);

impl fmt::Display for Attrs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.0;
        match &style.fill {
            Some(fill) => write!(f, r#" fill="{}""#, Escaped(&fill.to_string()))?,
            None => f.write_str(r#" fill="none""#)?,
        }
        if let Some(stroke) = &style.stroke {
            write!(f, r#" stroke="{}""#, Escaped(&stroke.to_string()))?;
        }
        if let Some(width) = style.stroke_width {
            write!(f, r#" stroke-width="{}""#, Num(width))?;
        }
        if let Some(opacity) = style.opacity {
            write!(f, r#" opacity="{}""#, Num(opacity))?;
        }
        Ok(())
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}
