//! HTTP method as a typed enum.
//!
//! The RFC 9110 methods get their own variants. Any other token (`PURGE`,
//! `PROPFIND`, a lowercase `post`) is kept verbatim as
//! [`Method::Extension`] and routed like the rest, so the form endpoint can
//! answer it with the access-denied page.

use std::fmt;

/// An HTTP request method.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    /// Any other token, case preserved. Method names are case-sensitive
    /// (RFC 9110 §9.1), so `post` lands here and is not `Post`.
    Extension(Box<str>),
}

impl Method {
    /// The RFC 9110 methods.
    pub const STANDARD: [Method; 9] = [
        Self::Connect,
        Self::Delete,
        Self::Get,
        Self::Head,
        Self::Options,
        Self::Patch,
        Self::Post,
        Self::Put,
        Self::Trace,
    ];

    /// Returns the wire representation (e.g. `"GET"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect      => "CONNECT",
            Self::Delete       => "DELETE",
            Self::Get          => "GET",
            Self::Head         => "HEAD",
            Self::Options      => "OPTIONS",
            Self::Patch        => "PATCH",
            Self::Post         => "POST",
            Self::Put          => "PUT",
            Self::Trace        => "TRACE",
            Self::Extension(s) => s,
        }
    }
}

impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s {
            "CONNECT" => Self::Connect,
            "DELETE"  => Self::Delete,
            "GET"     => Self::Get,
            "HEAD"    => Self::Head,
            "OPTIONS" => Self::Options,
            "PATCH"   => Self::Patch,
            "POST"    => Self::Post,
            "PUT"     => Self::Put,
            "TRACE"   => Self::Trace,
            other     => Self::Extension(other.into()),
        }
    }
}

impl From<&http::Method> for Method {
    fn from(method: &http::Method) -> Self {
        Self::from(method.as_str())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
