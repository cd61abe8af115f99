//! # Schematic Reader
//!
//! The one place where markup is interpreted. SVG text from the mock library,
//! or from a code segment tagged exactly `svg`, is read into straight strokes
//! and text labels that the TUI can draw on a canvas.
//!
//! Nothing here executes or re-emits markup. Unknown elements are skipped;
//! curves and arcs are approximated by a straight stroke to their endpoint.

use std::fmt;

use log::debug;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// Number of sides used to approximate a `<circle>`.
const CIRCLE_SIDES: usize = 24;

/// Coordinate space used when the markup declares none and has no strokes.
const DEFAULT_VIEW_BOX: ViewBox = ViewBox {
    min_x: 0.0,
    min_y: 0.0,
    width: 100.0,
    height: 100.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A straight line in SVG user space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Point,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schematic {
    pub view_box: ViewBox,
    pub strokes: Vec<Stroke>,
    pub labels: Vec<Label>,
}

#[derive(Debug, PartialEq)]
pub enum SchematicError {
    /// The markup is not well-formed XML.
    Xml(String),
    /// A path `d` or `points` attribute could not be read.
    PathData(String),
    /// Well-formed, but nothing drawable was found.
    Empty,
}

impl fmt::Display for SchematicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchematicError::Xml(msg) => write!(f, "malformed markup: {msg}"),
            SchematicError::PathData(msg) => write!(f, "invalid path data: {msg}"),
            SchematicError::Empty => write!(f, "no drawable elements"),
        }
    }
}

impl std::error::Error for SchematicError {}

impl Schematic {
    /// Read SVG markup into strokes and labels.
    pub fn parse(markup: &str) -> Result<Self, SchematicError> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(true);

        let mut builder = Builder::default();
        loop {
            match reader.read_event() {
                Ok(Event::Start(element)) => {
                    builder.element(&element)?;
                    if element.local_name().as_ref() == b"text" {
                        builder.begin_label(&element)?;
                    }
                }
                Ok(Event::Empty(element)) => builder.element(&element)?,
                Ok(Event::Text(text)) => {
                    let raw = std::str::from_utf8(&text)
                        .map_err(|e| SchematicError::Xml(e.to_string()))?;
                    let decoded =
                        unescape(raw).map_err(|e| SchematicError::Xml(e.to_string()))?;
                    builder.label_text(&decoded);
                }
                Ok(Event::End(element)) => {
                    if element.local_name().as_ref() == b"text" {
                        builder.close_label();
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(SchematicError::Xml(format!(
                        "{e} at byte {}",
                        reader.buffer_position()
                    )));
                }
            }
        }

        builder.finish()
    }
}

#[derive(Default)]
struct Builder {
    view_box: Option<ViewBox>,
    strokes: Vec<Stroke>,
    labels: Vec<Label>,
    /// `<text>` element currently open, with the text collected so far.
    open_label: Option<(Point, String)>,
}

impl Builder {
    fn element(&mut self, element: &BytesStart<'_>) -> Result<(), SchematicError> {
        let attrs = Attrs::read(element)?;
        match element.local_name().as_ref() {
            b"svg" => {
                if self.view_box.is_none() {
                    self.view_box = attrs.view_box();
                }
            }
            b"path" => {
                if let Some(d) = attrs.get("d") {
                    trace_path(d, &mut self.strokes)?;
                }
            }
            b"line" => {
                let from = Point::new(attrs.number("x1"), attrs.number("y1"));
                let to = Point::new(attrs.number("x2"), attrs.number("y2"));
                self.strokes.push(Stroke { from, to });
            }
            b"polyline" | b"polygon" => {
                let points = attrs.get("points").map(parse_points).transpose()?;
                if let Some(points) = points {
                    let closed = element.local_name().as_ref() == b"polygon";
                    self.polyline(&points, closed);
                }
            }
            b"rect" => {
                let (x, y) = (attrs.number("x"), attrs.number("y"));
                let (w, h) = (attrs.number("width"), attrs.number("height"));
                let corners = [
                    Point::new(x, y),
                    Point::new(x + w, y),
                    Point::new(x + w, y + h),
                    Point::new(x, y + h),
                ];
                self.polyline(&corners, true);
            }
            b"circle" => {
                let (cx, cy, r) = (attrs.number("cx"), attrs.number("cy"), attrs.number("r"));
                let points: Vec<Point> = (0..CIRCLE_SIDES)
                    .map(|i| {
                        let angle = i as f64 / CIRCLE_SIDES as f64 * std::f64::consts::TAU;
                        Point::new(cx + r * angle.cos(), cy + r * angle.sin())
                    })
                    .collect();
                self.polyline(&points, true);
            }
            other => debug!("Skipping svg element <{}>", String::from_utf8_lossy(other)),
        }
        Ok(())
    }

    fn polyline(&mut self, points: &[Point], closed: bool) {
        for pair in points.windows(2) {
            self.strokes.push(Stroke { from: pair[0], to: pair[1] });
        }
        if closed && points.len() > 2 {
            self.strokes.push(Stroke {
                from: points[points.len() - 1],
                to: points[0],
            });
        }
    }

    fn begin_label(&mut self, element: &BytesStart<'_>) -> Result<(), SchematicError> {
        let attrs = Attrs::read(element)?;
        let position = Point::new(attrs.number("x"), attrs.number("y"));
        self.open_label = Some((position, String::new()));
        Ok(())
    }

    fn label_text(&mut self, text: &str) {
        if let Some((_, collected)) = self.open_label.as_mut() {
            if !collected.is_empty() {
                collected.push(' ');
            }
            collected.push_str(text.trim());
        }
    }

    fn close_label(&mut self) {
        if let Some((position, text)) = self.open_label.take()
            && !text.trim().is_empty()
        {
            self.labels.push(Label { position, text });
        }
    }

    fn finish(self) -> Result<Schematic, SchematicError> {
        if self.strokes.is_empty() && self.labels.is_empty() {
            return Err(SchematicError::Empty);
        }
        let view_box = self
            .view_box
            .unwrap_or_else(|| bounding_box(&self.strokes));
        Ok(Schematic {
            view_box,
            strokes: self.strokes,
            labels: self.labels,
        })
    }
}

/// Fallback coordinate space for markup without a `viewBox`: the stroke bounds
/// with a small margin.
fn bounding_box(strokes: &[Stroke]) -> ViewBox {
    let mut points = strokes.iter().flat_map(|s| [s.from, s.to]);
    let Some(first) = points.next() else {
        return DEFAULT_VIEW_BOX;
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let margin = ((max_x - min_x).max(max_y - min_y) * 0.05).max(1.0);
    ViewBox {
        min_x: min_x - margin,
        min_y: min_y - margin,
        width: (max_x - min_x) + margin * 2.0,
        height: (max_y - min_y) + margin * 2.0,
    }
}

/// Unescaped attributes of one element.
struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn read(element: &BytesStart<'_>) -> Result<Self, SchematicError> {
        let mut out = Vec::new();
        for attr in element.attributes() {
            let attr = attr.map_err(|e| SchematicError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let raw = std::str::from_utf8(&attr.value)
                .map_err(|e| SchematicError::Xml(e.to_string()))?;
            let value = unescape(raw).map_err(|e| SchematicError::Xml(e.to_string()))?;
            out.push((key, value.into_owned()));
        }
        Ok(Self(out))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Numeric attribute; missing or unparsable values read as 0 like SVG does.
    fn number(&self, key: &str) -> f64 {
        self.get(key)
            .and_then(|v| v.trim().trim_end_matches("px").parse().ok())
            .unwrap_or(0.0)
    }

    fn view_box(&self) -> Option<ViewBox> {
        if let Some(raw) = self.get("viewBox") {
            let nums: Vec<f64> = raw
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse().ok())
                .collect();
            if let [min_x, min_y, width, height] = nums[..]
                && width > 0.0
                && height > 0.0
            {
                return Some(ViewBox { min_x, min_y, width, height });
            }
        }
        let (width, height) = (self.number("width"), self.number("height"));
        (width > 0.0 && height > 0.0).then_some(ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathToken {
    Command(char),
    Number(f64),
}

fn tokenize(data: &str) -> Result<Vec<PathToken>, SchematicError> {
    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() || c == b',' {
            i += 1;
            continue;
        }
        if c.is_ascii_alphabetic() && c != b'e' && c != b'E' {
            tokens.push(PathToken::Command(c as char));
            i += 1;
            continue;
        }

        let start = i;
        if c == b'+' || c == b'-' {
            i += 1;
        }
        let mut seen_digit = false;
        let mut seen_dot = false;
        while i < bytes.len() {
            match bytes[i] {
                b'0'..=b'9' => seen_digit = true,
                b'.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            i += 1;
        }
        if seen_digit && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_digit() {
                i = j;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
        }
        if !seen_digit {
            return Err(SchematicError::PathData(format!(
                "unexpected {:?} at offset {start}",
                data[start..].chars().next().unwrap_or(' ')
            )));
        }
        let value = data[start..i]
            .parse::<f64>()
            .map_err(|e| SchematicError::PathData(format!("{e} in {:?}", &data[start..i])))?;
        tokens.push(PathToken::Number(value));
    }

    Ok(tokens)
}

fn parse_points(raw: &str) -> Result<Vec<Point>, SchematicError> {
    let numbers = tokenize(raw)?
        .into_iter()
        .map(|token| match token {
            PathToken::Number(n) => Ok(n),
            PathToken::Command(c) => Err(SchematicError::PathData(format!(
                "unexpected {c:?} in points"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

/// Number of arguments each path command consumes per repetition.
fn arity(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'S' | 'Q' => Some(4),
        'C' => Some(6),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

/// Trace path data into straight strokes.
fn trace_path(data: &str, strokes: &mut Vec<Stroke>) -> Result<(), SchematicError> {
    let tokens = tokenize(data)?;
    let mut pen = Point::new(0.0, 0.0);
    let mut subpath_start = pen;
    let mut command: Option<char> = None;
    let mut i = 0;

    while i < tokens.len() {
        if let PathToken::Command(c) = tokens[i] {
            if arity(c).is_none() {
                return Err(SchematicError::PathData(format!("unknown command {c:?}")));
            }
            i += 1;
            if c.eq_ignore_ascii_case(&'z') {
                if pen != subpath_start {
                    strokes.push(Stroke { from: pen, to: subpath_start });
                }
                pen = subpath_start;
                command = None;
            } else {
                command = Some(c);
            }
            continue;
        }

        let Some(c) = command else {
            return Err(SchematicError::PathData("numbers before any command".into()));
        };
        let count = arity(c).unwrap_or(0);
        let mut args = [0.0f64; 7];
        for slot in args.iter_mut().take(count) {
            match tokens.get(i) {
                Some(PathToken::Number(n)) => *slot = *n,
                _ => {
                    return Err(SchematicError::PathData(format!(
                        "command {c:?} expects {count} numbers"
                    )));
                }
            }
            i += 1;
        }

        let relative = c.is_ascii_lowercase();
        let offset = move |x: f64, y: f64| {
            if relative {
                Point::new(pen.x + x, pen.y + y)
            } else {
                Point::new(x, y)
            }
        };

        let target = match c.to_ascii_uppercase() {
            'M' => {
                pen = offset(args[0], args[1]);
                subpath_start = pen;
                // Further coordinate pairs after a moveto are linetos
                command = Some(if relative { 'l' } else { 'L' });
                continue;
            }
            'L' | 'T' => offset(args[0], args[1]),
            'H' => Point::new(if relative { pen.x + args[0] } else { args[0] }, pen.y),
            'V' => Point::new(pen.x, if relative { pen.y + args[0] } else { args[0] }),
            'S' | 'Q' => offset(args[2], args[3]),
            'C' => offset(args[4], args[5]),
            'A' => offset(args[5], args[6]),
            _ => unreachable!("arity() rejected unknown commands"),
        };
        strokes.push(Stroke { from: pen, to: target });
        pen = target;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strokes_of(d: &str) -> Vec<Stroke> {
        let mut out = Vec::new();
        trace_path(d, &mut out).unwrap();
        out
    }

    fn stroke(x1: f64, y1: f64, x2: f64, y2: f64) -> Stroke {
        Stroke {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }

    #[test]
    fn capacitor_path_traces_four_strokes() {
        let strokes = strokes_of("M5,10 H40 M40,0 V20 M60,0 V20 M60,10 H95");
        assert_eq!(
            strokes,
            vec![
                stroke(5.0, 10.0, 40.0, 10.0),
                stroke(40.0, 0.0, 40.0, 20.0),
                stroke(60.0, 0.0, 60.0, 20.0),
                stroke(60.0, 10.0, 95.0, 10.0),
            ]
        );
    }

    #[test]
    fn close_path_returns_to_subpath_start() {
        let strokes = strokes_of("M20,10 V90 L80,50 Z");
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[2], stroke(80.0, 50.0, 20.0, 10.0));
    }

    #[test]
    fn implicit_lineto_after_moveto() {
        let strokes = strokes_of("M0 0 10 0 10 10");
        assert_eq!(strokes, vec![stroke(0.0, 0.0, 10.0, 0.0), stroke(10.0, 0.0, 10.0, 10.0)]);
    }

    #[test]
    fn relative_commands_offset_from_pen() {
        let strokes = strokes_of("m10,10 l5,0 v5 h-5 z");
        assert_eq!(
            strokes,
            vec![
                stroke(10.0, 10.0, 15.0, 10.0),
                stroke(15.0, 10.0, 15.0, 15.0),
                stroke(15.0, 15.0, 10.0, 15.0),
                stroke(10.0, 15.0, 10.0, 10.0),
            ]
        );
    }

    #[test]
    fn curves_become_straight_strokes_to_endpoint() {
        let strokes = strokes_of("M0,0 C10,10 20,10 30,0 Q40,10 50,0");
        assert_eq!(strokes, vec![stroke(0.0, 0.0, 30.0, 0.0), stroke(30.0, 0.0, 50.0, 0.0)]);
    }

    #[test]
    fn compact_number_syntax() {
        let tokens = tokenize("M-1.5-2.5.5.5e1").unwrap();
        assert_eq!(
            tokens,
            vec![
                PathToken::Command('M'),
                PathToken::Number(-1.5),
                PathToken::Number(-2.5),
                PathToken::Number(0.5),
                PathToken::Number(5.0),
            ]
        );
    }

    #[test]
    fn path_with_missing_numbers_is_rejected() {
        let mut out = Vec::new();
        assert!(matches!(trace_path("M10", &mut out), Err(SchematicError::PathData(_))));
        assert!(matches!(trace_path("10,10", &mut out), Err(SchematicError::PathData(_))));
        assert!(matches!(trace_path("M0,0 X5", &mut out), Err(SchematicError::PathData(_))));
    }

    #[test]
    fn parse_svg_with_view_box_and_path() {
        let schematic = Schematic::parse(
            r#"<svg viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg"><path d="M5,10 H95"/></svg>"#,
        )
        .unwrap();
        assert_eq!(schematic.view_box, DEFAULT_VIEW_BOX);
        assert_eq!(schematic.strokes, vec![stroke(5.0, 10.0, 95.0, 10.0)]);
    }

    #[test]
    fn parse_basic_shapes_and_labels() {
        let schematic = Schematic::parse(
            r#"<svg width="200" height="100">
                 <line x1="0" y1="50" x2="40" y2="50"/>
                 <rect x="40" y="40" width="40" height="20"/>
                 <circle cx="150" cy="50" r="10"/>
                 <polyline points="80,50 120,50 140,50"/>
                 <text x="45" y="35">R1 10k</text>
               </svg>"#,
        )
        .unwrap();
        assert_eq!(schematic.view_box.width, 200.0);
        assert_eq!(schematic.view_box.height, 100.0);
        // line + rect(4) + circle(24) + polyline(2)
        assert_eq!(schematic.strokes.len(), 1 + 4 + CIRCLE_SIDES + 2);
        assert_eq!(schematic.labels.len(), 1);
        assert_eq!(schematic.labels[0].text, "R1 10k");
        assert_eq!(schematic.labels[0].position, Point::new(45.0, 35.0));
    }

    #[test]
    fn missing_view_box_falls_back_to_stroke_bounds() {
        let schematic = Schematic::parse(r#"<path d="M10,10 L30,10"/>"#).unwrap();
        assert!(schematic.view_box.min_x < 10.0);
        assert!(schematic.view_box.min_x + schematic.view_box.width > 30.0);
    }

    #[test]
    fn empty_svg_is_an_error() {
        assert_eq!(Schematic::parse("<svg></svg>"), Err(SchematicError::Empty));
    }

    #[test]
    fn malformed_markup_is_an_error() {
        assert!(matches!(
            Schematic::parse("<svg><path d=\"M0,0 L1,1\"></svg>"),
            Err(SchematicError::Xml(_))
        ));
    }

    #[test]
    fn scripts_and_unknown_elements_are_ignored() {
        let schematic = Schematic::parse(
            r#"<svg viewBox="0 0 10 10"><script>alert(1)</script><foreignObject/><line x1="0" y1="0" x2="10" y2="10"/></svg>"#,
        )
        .unwrap();
        assert_eq!(schematic.strokes.len(), 1);
        assert!(schematic.labels.is_empty());
    }
}
