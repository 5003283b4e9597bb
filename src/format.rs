//! Label text templates.
//!
//! A template is literal text with exactly one integer placeholder, written
//! in the familiar `{…}` style: `<ASN:{:09}>` renders 123 as
//! `<ASN:000000123>`. The same template names the output file, so a run's
//! filename can always be re-derived from its configuration.
//!
//! ## Placeholder grammar
//!
//! ```text
//! '{' ['0'] [':' [[fill] align] ['0'] [width] ['d']] '}'
//! align := '<' | '>' | '^'
//! ```
//!
//! `{{` and `}}` stand for literal braces. A number wider than `width` is
//! never truncated; the field grows (see [`LabelFormat::overflows`]).

use crate::error::LabelError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Template used when none is given: nine zero-padded digits inside `<ASN:…>`.
pub const DEFAULT_FORMAT: &str = "<ASN:{:09}>";

static RE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0?(?::(?:(?P<fill>.)?(?P<align>[<>^]))?(?P<zero>0)?(?P<width>[0-9]+)?d?)?$")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSpec {
    fill: char,
    align: Align,
    width: usize,
}

/// A parsed label template with exactly one integer placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelFormat {
    template: String,
    prefix: String,
    suffix: String,
    field: FieldSpec,
}

impl LabelFormat {
    /// Parse `template`, failing fast when it is not usable for labels.
    pub fn parse(template: &str) -> Result<Self, LabelError> {
        if let Some(bad) = template.chars().find(|c| !is_printable_ascii(*c)) {
            return Err(LabelError::invalid_format(
                template,
                format!("unsupported character {bad:?} (labels use printable ASCII only)"),
            ));
        }

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut field: Option<FieldSpec> = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if field.is_some() { &mut suffix } else { &mut prefix };
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '}' => {
                    return Err(LabelError::invalid_format(template, "unmatched '}'"));
                }
                '{' => {
                    let mut inner = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        inner.push(c);
                    }
                    if !closed {
                        return Err(LabelError::invalid_format(template, "unmatched '{'"));
                    }
                    if field.is_some() {
                        return Err(LabelError::invalid_format(
                            template,
                            "more than one placeholder; exactly one is required",
                        ));
                    }
                    field = Some(parse_field(template, &inner)?);
                }
                other => out.push(other),
            }
        }

        let field = field.ok_or_else(|| {
            LabelError::invalid_format(
                template,
                "no placeholder found; use e.g. {:09} where the number goes",
            )
        })?;

        Ok(Self {
            template: template.to_string(),
            prefix,
            suffix,
            field,
        })
    }

    /// The template exactly as given.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Declared field width (0 when the placeholder has none).
    pub fn width(&self) -> usize {
        self.field.width
    }

    /// True when `value` has more digits than the declared width.
    pub fn overflows(&self, value: u64) -> bool {
        self.field.width > 0 && digit_count(value) > self.field.width
    }

    /// Render `value` into the template.
    pub fn render(&self, value: u64) -> String {
        let digits = value.to_string();
        let pad = self.field.width.saturating_sub(digits.len());
        let (left, right) = match self.field.align {
            Align::Right => (pad, 0),
            Align::Left => (0, pad),
            Align::Center => (pad / 2, pad - pad / 2),
        };

        let mut out =
            String::with_capacity(self.prefix.len() + digits.len() + pad + self.suffix.len());
        out.push_str(&self.prefix);
        out.extend(std::iter::repeat(self.field.fill).take(left));
        out.push_str(&digits);
        out.extend(std::iter::repeat(self.field.fill).take(right));
        out.push_str(&self.suffix);
        out
    }
}

impl Default for LabelFormat {
    fn default() -> Self {
        // The default template is a compile-time constant known to parse.
        Self {
            template: DEFAULT_FORMAT.to_string(),
            prefix: "<ASN:".to_string(),
            suffix: ">".to_string(),
            field: FieldSpec {
                fill: '0',
                align: Align::Right,
                width: 9,
            },
        }
    }
}

impl FromStr for LabelFormat {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LabelFormat {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LabelFormat> for String {
    fn from(value: LabelFormat) -> Self {
        value.template
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn parse_field(template: &str, inner: &str) -> Result<FieldSpec, LabelError> {
    let caps = RE_PLACEHOLDER.captures(inner).ok_or_else(|| {
        LabelError::invalid_format(
            template,
            format!("unsupported placeholder '{{{inner}}}'; expected an integer field like {{:09}}"),
        )
    })?;

    let zero = caps.name("zero").is_some();
    let fill = caps
        .name("fill")
        .and_then(|m| m.as_str().chars().next())
        .unwrap_or(if zero { '0' } else { ' ' });
    let align = match caps.name("align").map(|m| m.as_str()) {
        Some("<") => Align::Left,
        Some("^") => Align::Center,
        _ => Align::Right,
    };
    let width = match caps.name("width") {
        Some(m) => m.as_str().parse::<usize>().map_err(|_| {
            LabelError::invalid_format(template, format!("field width '{}' is too large", m.as_str()))
        })?,
        None => 0,
    };

    Ok(FieldSpec { fill, align, width })
}

fn is_printable_ascii(c: char) -> bool {
    (' '..='~').contains(&c)
}

fn digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |d| d as usize + 1)
}
