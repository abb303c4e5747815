//! Raw decoded sheet data, before any semantic interpretation.

/// One decoded cell. This is the whole contract required from a tabular
/// reader: string, number, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Empty,
}

/// One decoded sheet row, in original column order.
pub type RawRow = Vec<RawCell>;

impl RawCell {
    /// Empty, or text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(text) => text.trim().is_empty(),
            RawCell::Number(_) => false,
        }
    }

    /// The trimmed text content, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            RawCell::Text(text) => Some(text.trim()),
            _ => None,
        }
    }

    /// Finite numeric value: a number cell, or text that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawCell::Number(value) if value.is_finite() => Some(*value),
            RawCell::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Some(value),
                _ => None,
            },
            _ => None,
        }
    }

    /// Display form, used for header matching and error messages.
    pub fn display(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(text) => text.trim().to_string(),
            RawCell::Number(value) => format_number(*value),
        }
    }
}

/// Format a number the way it appeared in the sheet: integral values
/// without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
