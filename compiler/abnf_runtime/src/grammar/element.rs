//! Inline ABNF elements accepted by the builder.
//!
//! | Form          | Meaning                              |
//! |---------------|--------------------------------------|
//! | `name`        | reference to a rule                  |
//! | `"text"`      | case-insensitive literal             |
//! | `'text'`      | case-sensitive literal               |
//! | `%x2F`        | one exact character                  |
//! | `%x30-39`     | character range                      |
//! | `[e]`         | optional `e`                         |
//! | `*e` `1*e` `2*4e` `8e` | repetition of `e`           |

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Element {
    Reference(String),
    Literal { text: String, case_sensitive: bool },
    Char(char),
    Range(char, char),
    Optional(Box<Element>),
    Repeat {
        min: u32,
        max: Option<u32>,
        element: Box<Element>,
    },
}

impl Element {
    /// Parse one element, or `None` if it is malformed.
    pub(super) fn parse(spec: &str) -> Option<Element> {
        let spec = spec.trim();
        let first = spec.chars().next()?;

        if first == '[' {
            let inner = spec.strip_prefix('[')?.strip_suffix(']')?;
            return Some(Element::Optional(Box::new(Element::parse(inner)?)));
        }
        if first == '"' || first == '\'' {
            let text = spec.strip_prefix(first)?.strip_suffix(first)?;
            if text.is_empty() {
                return None;
            }
            return Some(Element::Literal {
                text: text.to_string(),
                case_sensitive: first == '\'',
            });
        }
        if let Some(hex) = spec.strip_prefix("%x") {
            return match hex.split_once('-') {
                Some((lo, hi)) => {
                    let (lo, hi) = (hex_char(lo)?, hex_char(hi)?);
                    (lo <= hi).then_some(Element::Range(lo, hi))
                }
                None => hex_char(hex).map(Element::Char),
            };
        }
        if first.is_ascii_digit() || first == '*' {
            return parse_repeat(spec);
        }
        is_rule_name(spec).then(|| Element::Reference(spec.to_string()))
    }
}

fn parse_repeat(spec: &str) -> Option<Element> {
    let split = spec
        .find(|c: char| !(c.is_ascii_digit() || c == '*'))
        .unwrap_or(spec.len());
    let (bounds, rest) = spec.split_at(split);
    if rest.is_empty() {
        return None;
    }
    let element = Box::new(Element::parse(rest)?);

    let (min, max) = match bounds.split_once('*') {
        Some((lo, hi)) => {
            let min = if lo.is_empty() { 0 } else { lo.parse().ok()? };
            let max = if hi.is_empty() { None } else { Some(hi.parse().ok()?) };
            (min, max)
        }
        None => {
            let n = bounds.parse().ok()?;
            (n, Some(n))
        }
    };
    if max.is_some_and(|max| max < min) {
        return None;
    }
    Some(Element::Repeat { min, max, element })
}

fn hex_char(digits: &str) -> Option<char> {
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

/// ABNF rule names, plus `_` and `.` which the tables use for helpers.
fn is_rule_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Canonical spelling; used as the name of synthesized rules.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Reference(name) => f.write_str(name),
            Element::Literal {
                text,
                case_sensitive: true,
            } => write!(f, "'{text}'"),
            Element::Literal { text, .. } => write!(f, "\"{text}\""),
            Element::Char(c) => write!(f, "%x{:02X}", u32::from(*c)),
            Element::Range(lo, hi) => write!(f, "%x{:02X}-{:02X}", u32::from(*lo), u32::from(*hi)),
            Element::Optional(inner) => write!(f, "[{inner}]"),
            Element::Repeat { min, max, element } => match (*min, *max) {
                (min, Some(max)) if min == max => write!(f, "{min}{element}"),
                (0, None) => write!(f, "*{element}"),
                (0, Some(max)) => write!(f, "*{max}{element}"),
                (min, None) => write!(f, "{min}*{element}"),
                (min, Some(max)) => write!(f, "{min}*{max}{element}"),
            },
        }
    }
}
