//! RFC 6570 URI template expansion: every operator, prefix and explode
//! modifiers, string and list values (no associative arrays).
//!
//! Graph URL templates look like
//! `{+baseurl}/users/{user%2Did}{?%24expand,%24select}`; variable names are
//! matched literally, percent-encoding included.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriTemplateError {
    #[error("unterminated expression starting at offset {0}")]
    Unterminated(usize),
    #[error("empty expression at offset {0}")]
    EmptyExpression(usize),
    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(char),
}

/// A value bound to a template variable.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<String>),
}

impl TemplateValue {
    fn is_undefined(&self) -> bool {
        matches!(self, TemplateValue::List(items) if items.is_empty())
    }

    fn items(&self) -> Vec<String> {
        match self {
            TemplateValue::String(s) => vec![s.clone()],
            TemplateValue::Integer(i) => vec![i.to_string()],
            TemplateValue::Boolean(b) => vec![b.to_string()],
            TemplateValue::List(items) => items.clone(),
        }
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items().join(","))
    }
}

impl From<&str> for TemplateValue {
    fn from(v: &str) -> Self {
        TemplateValue::String(v.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(v: String) -> Self {
        TemplateValue::String(v)
    }
}

impl From<i64> for TemplateValue {
    fn from(v: i64) -> Self {
        TemplateValue::Integer(v)
    }
}

impl From<i32> for TemplateValue {
    fn from(v: i32) -> Self {
        TemplateValue::Integer(v as i64)
    }
}

impl From<bool> for TemplateValue {
    fn from(v: bool) -> Self {
        TemplateValue::Boolean(v)
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(v: Vec<String>) -> Self {
        TemplateValue::List(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    Path,
    PathParameter,
    Query,
    QueryContinuation,
}

impl Operator {
    fn from_char(c: char) -> Option<Result<Self, UriTemplateError>> {
        match c {
            '+' => Some(Ok(Operator::Reserved)),
            '#' => Some(Ok(Operator::Fragment)),
            '.' => Some(Ok(Operator::Label)),
            '/' => Some(Ok(Operator::Path)),
            ';' => Some(Ok(Operator::PathParameter)),
            '?' => Some(Ok(Operator::Query)),
            '&' => Some(Ok(Operator::QueryContinuation)),
            '=' | ',' | '!' | '@' | '|' => Some(Err(UriTemplateError::UnsupportedOperator(c))),
            _ => None,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved => "",
            Operator::Fragment => "#",
            Operator::Label => ".",
            Operator::Path => "/",
            Operator::PathParameter => ";",
            Operator::Query => "?",
            Operator::QueryContinuation => "&",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved | Operator::Fragment => ",",
            Operator::Label => ".",
            Operator::Path => "/",
            Operator::PathParameter => ";",
            Operator::Query | Operator::QueryContinuation => "&",
        }
    }

    fn named(self) -> bool {
        matches!(
            self,
            Operator::PathParameter | Operator::Query | Operator::QueryContinuation
        )
    }

    /// Appended to the name of a named variable whose value is empty.
    fn if_empty(self) -> &'static str {
        match self {
            Operator::PathParameter => "",
            _ => "=",
        }
    }

    fn allow_reserved(self) -> bool {
        matches!(self, Operator::Reserved | Operator::Fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VarSpec {
    name: String,
    prefix: Option<usize>,
    explode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Expression { op: Operator, vars: Vec<VarSpec> },
}

/// A parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    parts: Vec<Part>,
}

impl UriTemplate {
    pub fn parse(template: &str) -> Result<Self, UriTemplateError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = template;
        let mut offset = 0;

        while let Some(start) = rest.find('{') {
            literal.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or(UriTemplateError::Unterminated(offset + start))?;
            let body = &after[..end];
            if body.is_empty() {
                return Err(UriTemplateError::EmptyExpression(offset + start));
            }
            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            parts.push(Self::parse_expression(body, offset + start)?);

            let consumed = start + 1 + end + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    fn parse_expression(body: &str, offset: usize) -> Result<Part, UriTemplateError> {
        let first = body.chars().next().unwrap_or_default();
        let (op, list) = match Operator::from_char(first) {
            Some(op) => (op?, &body[first.len_utf8()..]),
            None => (Operator::Simple, body),
        };
        let vars: Vec<VarSpec> = list
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|raw| {
                let (raw, explode) = match raw.strip_suffix('*') {
                    Some(name) => (name, true),
                    None => (raw, false),
                };
                match raw.split_once(':') {
                    Some((name, len)) => VarSpec {
                        name: name.to_string(),
                        prefix: len.parse().ok(),
                        explode,
                    },
                    None => VarSpec {
                        name: raw.to_string(),
                        prefix: None,
                        explode,
                    },
                }
            })
            .collect();
        if vars.is_empty() {
            return Err(UriTemplateError::EmptyExpression(offset));
        }
        Ok(Part::Expression { op, vars })
    }

    /// Names of every variable referenced by the template.
    pub fn variables(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Expression { vars, .. } => Some(vars.iter().map(|v| v.name.as_str())),
                Part::Literal(_) => None,
            })
            .flatten()
            .collect()
    }

    pub fn expand(&self, values: &HashMap<String, TemplateValue>) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(s) => out.push_str(s),
                Part::Expression { op, vars } => expand_expression(&mut out, *op, vars, values),
            }
        }
        out
    }
}

fn expand_expression(
    out: &mut String,
    op: Operator,
    vars: &[VarSpec],
    values: &HashMap<String, TemplateValue>,
) {
    let defined: Vec<(&VarSpec, &TemplateValue)> = vars
        .iter()
        .filter_map(|v| values.get(&v.name).map(|val| (v, val)))
        .filter(|(_, val)| !val.is_undefined())
        .collect();
    if defined.is_empty() {
        return;
    }

    out.push_str(op.prefix());
    for (i, (spec, value)) in defined.iter().enumerate() {
        if i > 0 {
            out.push_str(op.separator());
        }
        let rendered: Vec<String> = value
            .items()
            .into_iter()
            .map(|item| match (spec.prefix, value) {
                (Some(n), TemplateValue::String(_)) => item.chars().take(n).collect(),
                _ => item,
            })
            .map(|item| encode(&item, op.allow_reserved()))
            .collect();
        let pair = |item: &str| {
            if item.is_empty() {
                format!("{}{}", spec.name, op.if_empty())
            } else {
                format!("{}={}", spec.name, item)
            }
        };
        let expanded = match (spec.explode, op.named()) {
            (true, true) => rendered
                .iter()
                .map(|item| pair(item))
                .collect::<Vec<_>>()
                .join(op.separator()),
            (true, false) => rendered.join(op.separator()),
            (false, true) => pair(&rendered.join(",")),
            (false, false) => rendered.join(","),
        };
        out.push_str(&expanded);
    }
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

fn is_reserved(b: u8) -> bool {
    matches!(
        b,
        b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@' | b'!' | b'$' | b'&' | b'\''
            | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

fn encode(value: &str, allow_reserved: bool) -> String {
    let bytes = value.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if is_unreserved(b) || (allow_reserved && is_reserved(b)) {
            out.push(b as char);
        } else if allow_reserved
            && b == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            out.push_str(&value[i..i + 3]);
            i += 3;
            continue;
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
        i += 1;
    }
    out
}

/// Parse and expand in one step.
pub fn expand(
    template: &str,
    values: &HashMap<String, TemplateValue>,
) -> Result<String, UriTemplateError> {
    Ok(UriTemplate::parse(template)?.expand(values))
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
