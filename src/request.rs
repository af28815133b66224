//! Incoming HTTP request type.
//!
//! A [`Request`] is a plain value: the server builds one from the hyper request
//! after the body has been read, and tests build one directly.

use bytes::Bytes;

use crate::form::FormFields;
use crate::method::Method;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// An incoming HTTP request with its body fully read.
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
}

impl Request {
    /// A request with no headers and an empty body.
    ///
    /// ```rust
    /// use laurels_contact::{Method, Request};
    ///
    /// let req = Request::new(Method::Post, "/process_form")
    ///     .with_header("content-type", "application/x-www-form-urlencoded")
    ///     .with_body("name=Jo&email=a%40b.com&message=Hello");
    /// assert_eq!(req.form().get("email"), "a@b.com");
    /// ```
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decodes the body as an urlencoded form.
    ///
    /// Only bodies declared as `application/x-www-form-urlencoded` carry
    /// fields. Any other content type, `multipart/form-data` included, or a
    /// missing one yields an empty field set, so every lookup falls back to
    /// `""`.
    pub fn form(&self) -> FormFields {
        let is_form = self.header("content-type")
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED));

        if is_form {
            FormFields::parse(&self.body)
        } else {
            FormFields::default()
        }
    }
}
