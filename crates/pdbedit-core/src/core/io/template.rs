use crate::core::models::atom::AtomRecord;
use thiserror::Error;

/// The default output format for rewritten `ATOM` records.
pub const DEFAULT_RECORD_TEMPLATE: &str =
    "{:6s}{:>5}{:^6s}{:5s}{:>4}    {:8.3f}{:8.3f}{:8.3f}{:22s}{:>2s}{:s}";

/// Number of replacement fields an atom record template must contain.
pub const ATOM_FIELD_COUNT: usize = 11;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TemplateError {
    #[error("Unmatched '{brace}' at position {position}")]
    UnmatchedBrace { brace: char, position: usize },
    #[error("Invalid field specification '{{{spec}}}'")]
    InvalidSpec { spec: String },
    #[error("Expected {expected} replacement fields, found {found}")]
    FieldCount { expected: usize, found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSpec {
    fill: char,
    align: Option<Align>,
    width: usize,
    precision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(FieldSpec),
}

/// A value substituted into a template field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Float(f64),
}

/// An output line format in the `{:[[fill]align][width][.precision][type]}` style.
///
/// Text values default to left alignment and are truncated by a precision;
/// floats default to right alignment and are rounded to the precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTemplate {
    segments: Vec<Segment>,
}

impl Default for RecordTemplate {
    fn default() -> Self {
        Self::parse_any(DEFAULT_RECORD_TEMPLATE)
            .unwrap_or_else(|_| unreachable!("default record template is well formed"))
    }
}

impl RecordTemplate {
    /// Parses an atom record template, which must contain exactly
    /// [`ATOM_FIELD_COUNT`] fields.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let template = Self::parse_any(source)?;
        let found = template.field_count();
        if found != ATOM_FIELD_COUNT {
            return Err(TemplateError::FieldCount {
                expected: ATOM_FIELD_COUNT,
                found,
            });
        }
        Ok(template)
    }

    fn parse_any(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut spec = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        spec.push(inner);
                    }
                    if !closed {
                        return Err(TemplateError::UnmatchedBrace {
                            brace: '{',
                            position,
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(parse_spec(&spec)?));
                }
                '}' => {
                    return Err(TemplateError::UnmatchedBrace {
                        brace: '}',
                        position,
                    });
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    pub fn field_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Field(_)))
            .count()
    }

    /// Renders the values in field order. Missing values render as empty
    /// text; surplus values are ignored.
    pub fn render(&self, values: &[FieldValue<'_>]) -> String {
        let mut out = String::new();
        let mut values = values.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(spec) => {
                    let value = values.next().copied().unwrap_or(FieldValue::Text(""));
                    render_field(&mut out, spec, value);
                }
            }
        }
        out
    }

    pub fn render_atom(&self, atom: &AtomRecord) -> String {
        self.render(&[
            FieldValue::Text(&atom.record_type),
            FieldValue::Text(&atom.serial_text),
            FieldValue::Text(&atom.atom_type),
            FieldValue::Text(&atom.residue_type),
            FieldValue::Text(&atom.molecule_text),
            FieldValue::Float(atom.coords.x),
            FieldValue::Float(atom.coords.y),
            FieldValue::Float(atom.coords.z),
            FieldValue::Text(&atom.occupancy_temperature),
            FieldValue::Text(&atom.element),
            FieldValue::Text(&atom.trailing),
        ])
    }
}

fn parse_align(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        _ => None,
    }
}

fn parse_spec(raw: &str) -> Result<FieldSpec, TemplateError> {
    let invalid = || TemplateError::InvalidSpec {
        spec: raw.to_string(),
    };
    let spec = match raw.strip_prefix(':') {
        Some(rest) => rest,
        None if raw.is_empty() => "",
        None => return Err(invalid()),
    };

    let chars: Vec<char> = spec.chars().collect();
    let mut i = 0;
    let mut fill = ' ';
    let mut align = None;

    if chars.len() >= 2 && parse_align(chars[1]).is_some() {
        fill = chars[0];
        align = parse_align(chars[1]);
        i = 2;
    } else if let Some(a) = chars.first().copied().and_then(parse_align) {
        align = Some(a);
        i = 1;
    }

    let digits = |start: usize| {
        chars[start..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count()
    };

    let width_len = digits(i);
    let width = if width_len > 0 {
        let text: String = chars[i..i + width_len].iter().collect();
        i += width_len;
        text.parse().map_err(|_| invalid())?
    } else {
        0
    };

    let mut precision = None;
    if chars.get(i) == Some(&'.') {
        i += 1;
        let precision_len = digits(i);
        if precision_len == 0 {
            return Err(invalid());
        }
        let text: String = chars[i..i + precision_len].iter().collect();
        i += precision_len;
        precision = Some(text.parse().map_err(|_| invalid())?);
    }

    match &chars[i..] {
        [] | ['s'] | ['d'] | ['f'] | ['x'] => {}
        _ => return Err(invalid()),
    }

    Ok(FieldSpec {
        fill,
        align,
        width,
        precision,
    })
}

fn render_field(out: &mut String, spec: &FieldSpec, value: FieldValue<'_>) {
    let (text, default_align) = match value {
        FieldValue::Text(text) => {
            let text = match spec.precision {
                Some(max_chars) => text.chars().take(max_chars).collect(),
                None => text.to_string(),
            };
            (text, Align::Left)
        }
        FieldValue::Float(v) => {
            let text = match spec.precision {
                Some(precision) => format!("{:.*}", precision, v),
                None => v.to_string(),
            };
            (text, Align::Right)
        }
    };

    let len = text.chars().count();
    let pad = spec.width.saturating_sub(len);
    let (left, right) = match spec.align.unwrap_or(default_align) {
        Align::Left => (0, pad),
        Align::Right => (pad, 0),
        Align::Center => (pad / 2, pad - pad / 2),
    };
    out.extend(std::iter::repeat_n(spec.fill, left));
    out.push_str(&text);
    out.extend(std::iter::repeat_n(spec.fill, right));
}
