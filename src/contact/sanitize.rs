use crate::form::FormFields;

/// Submission fields after trimming and HTML escaping.
///
/// Built once per request and dropped with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl SanitizedInput {
    /// Sanitizes the `name`, `email` and `message` fields; absent keys read as empty.
    pub fn from_form(form: &FormFields) -> Self {
        Self {
            name: sanitize(form.get("name")),
            email: sanitize(form.get("email")),
            message: sanitize(form.get("message")),
        }
    }
}

/// Trims surrounding whitespace, then escapes `& < > " '`.
pub fn sanitize(raw: &str) -> String {
    html_escape::encode_quoted_attribute(raw.trim()).into_owned()
}
