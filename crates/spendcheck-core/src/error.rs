//! Error types for response shape validation.

/// Result type for shape validation.
pub type Result<T> = std::result::Result<T, ShapeError>;

/// A response body did not have the shape the harness expects.
///
/// The `Display` output is the human-readable detail printed next to a FAIL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The body is not a JSON object.
    #[error("Response is not a JSON object")]
    NotAnObject,

    /// A wrapper field (`expense`, `expenses`, `authUrl`, ...) is absent.
    #[error("Missing '{field}' field in response")]
    MissingField {
        /// The absent field.
        field: &'static str,
    },

    /// One or more required fields of a record are absent.
    #[error("Missing fields{context}: {fields:?}")]
    MissingFields {
        /// Where the fields were expected, e.g. `" in expense"`. Empty for the top level.
        context: &'static str,
        /// The absent fields, in declaration order.
        fields: Vec<&'static str>,
    },

    /// A field is present but has the wrong type or an out-of-range value.
    #[error("Invalid {field}: {value}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// The offending value, rendered as JSON.
        value: String,
    },

    /// A field expected to be an array is not.
    #[error("{field} field is not a list")]
    NotAList {
        /// Capitalized field name.
        field: &'static str,
    },

    /// A field expected to be a boolean is not.
    #[error("{field} field is not boolean")]
    NotABoolean {
        /// Capitalized field name.
        field: &'static str,
    },

    /// The authorization URL is not a string or is not `https://`.
    #[error("Invalid auth URL: {0}")]
    InvalidAuthUrl(String),

    /// The authorization URL does not point at the Google consent endpoint.
    #[error("URL doesn't look like Google OAuth: {0}")]
    NotGoogleOAuth(String),
}
