use thiserror::Error;

/// Errors produced while extracting order data from page markup.
///
/// Severity is decided by the caller: a field-level failure aborts the
/// enclosing [`Order`](crate::Order), while an item-level failure only
/// discards that single [`OrderItem`](crate::OrderItem).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// A required field's markup anchor is missing. Carries the
    /// human-readable description of the field that was being located.
    #[error("{0}")]
    ElementNotFound(&'static str),

    /// A thumbnail element lacks a required attribute.
    #[error("image element has no '{0}' attribute")]
    MissingAttribute(&'static str),

    /// An anchor was found but its text could not be converted to the
    /// expected type.
    #[error("could not parse {field} from '{value}': {reason}")]
    ParseValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A URL-typed field's raw string failed URL validation.
    #[error("invalid URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl ExtractError {
    pub(crate) fn parse_value(
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::ParseValue {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
