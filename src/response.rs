//! Outgoing HTTP response type.
//!
//! Handlers build a [`Response`] and return it. The server turns it into a
//! hyper response at the very end of dispatch.

use bytes::Bytes;
use http_body_util::Full;

use crate::status::Status;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Content-type values for use with [`ResponseBuilder::bytes`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Html, // text/html; charset=utf-8
    Text, // text/plain; charset=utf-8
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Text => "text/plain; charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use laurels_contact::{Response, Status};
///
/// Response::html("<!DOCTYPE html><p>sent</p>");
/// Response::text("ok");
/// Response::status(Status::NotFound);
/// ```
///
/// # Builder (custom status)
///
/// ```rust
/// use laurels_contact::{ContentType, Response, Status};
///
/// Response::builder()
///     .status(Status::ServiceUnavailable)
///     .bytes(ContentType::Text, "mail transport unreachable");
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    pub(crate) body: Bytes,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// `200 OK`, `text/html; charset=utf-8`.
    pub fn html(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::bytes_raw(ContentType::Html, Bytes::from(body))
    }

    /// `200 OK`, `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::bytes_raw(ContentType::Text, Bytes::from(body))
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Bytes::new(), headers: Vec::new(), status: code }
    }

    /// Builder for responses that need a custom status.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { status: Status::Ok }
    }

    pub fn status_code(&self) -> Status { self.status }

    /// Body as UTF-8 text; lossy for binary bodies.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn bytes_raw(content_type: ContentType, body: Bytes) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), content_type.as_str().to_owned())],
            status: Status::Ok,
        }
    }

    /// Converts into the hyper response written to the wire.
    ///
    /// Headers with names or values hyper refuses are dropped with a warning
    /// rather than failing the whole response.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status.into();

        let headers = res.headers_mut();
        for (name, value) in self.headers {
            match (
                http::HeaderName::from_bytes(name.as_bytes()),
                http::HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => { headers.append(name, value); }
                _ => tracing::warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method.
pub struct ResponseBuilder {
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    /// Terminate with a typed body.
    pub fn bytes(self, content_type: ContentType, body: impl Into<Bytes>) -> Response {
        Response { status: self.status, ..Response::bytes_raw(content_type, body.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_shortcut_sets_content_type() {
        let res = Response::html("<p>hi</p>");
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.header("Content-Type"), Some("text/html; charset=utf-8"));
        assert_eq!(res.body_text(), "<p>hi</p>");
    }

    #[test]
    fn builder_sets_status_and_content_type() {
        let res = Response::builder()
            .status(Status::InternalServerError)
            .bytes(ContentType::Text, "internal server error");
        assert_eq!(res.status_code(), Status::InternalServerError);
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.body_text(), "internal server error");
    }

    #[test]
    fn into_inner_carries_status_and_headers() {
        let res = Response::builder()
            .status(Status::ServiceUnavailable)
            .bytes(ContentType::Text, "down")
            .into_inner();
        assert_eq!(res.status(), http::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
    }

    #[test]
    fn invalid_headers_are_dropped() {
        let mut res = Response::status(Status::Ok);
        res.headers.push(("bad header".into(), "x".into()));
        res.headers.push(("x-ok".into(), "bad\nvalue".into()));

        assert!(res.into_inner().headers().is_empty());
    }
}
