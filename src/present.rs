//! Diagnostic rendering of records.
//!
//! One entry per line in key order, the key's textual form followed by the
//! value: numbers as they are, text quoted, anything else summarised by kind.
//! There is no parser for this output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::container::Flexible;
use crate::datatype::Value;
use crate::mapping::Mapping;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presentation {
    /// Spaces before each entry line.
    pub indent: usize,
    /// Whether to open with a `Type{Key, Value} with n entries` line.
    pub header: bool,
    /// Fixed number of fractional digits for floats, shortest form otherwise.
    pub float_digits: Option<usize>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            indent: 2,
            header: true,
            float_digits: None,
        }
    }
}

pub fn render<C: Flexible>(record: &C, presentation: &Presentation) -> String {
    let title = record.record_type().to_string();
    record.storage().with(|m| render_mapping(&title, m, presentation))
}

fn render_mapping(title: &str, mapping: &Mapping, presentation: &Presentation) -> String {
    let mut lines = Vec::with_capacity(mapping.len() + 1);
    if presentation.header {
        lines.push(format!("{} with {}", title, count(mapping.len())));
    }
    let padding = " ".repeat(presentation.indent);
    // mapping iteration is already ordered by key
    for (key, value) in mapping.iter() {
        lines.push(format!("{}{}: {}", padding, key, render_value(value, presentation)));
    }
    lines.join("\n")
}

pub fn render_value(value: &Value, presentation: &Presentation) -> String {
    match value {
        Value::Int(i) => i.to_string(),
        Value::Float(x) => match presentation.float_digits {
            Some(digits) => format!("{:.*}", digits, x),
            None => format!("{:?}", x),
        },
        Value::Bool(b) => b.to_string(),
        Value::Text(s) => format!("{:?}", s),
        other => summary(other),
    }
}

/// Kind based description used for values that are not printed directly.
pub fn summary(value: &Value) -> String {
    match value {
        Value::List(items) => format!("{}-element {}", items.len(), value.kind()),
        Value::Record(handle) => {
            let m = handle.borrow();
            format!("{} with {}", title_of(&m), count(m.len()))
        }
        other => other.kind().to_string(),
    }
}

fn count(entries: usize) -> String {
    match entries {
        1 => "1 entry".to_string(),
        n => format!("{} entries", n),
    }
}

fn title_of(mapping: &Mapping) -> String {
    format!("Mapping{{{}, {}}}", mapping.key_kind(), mapping.value_kind())
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_mapping(&title_of(self), self, &Presentation::default()))
    }
}
