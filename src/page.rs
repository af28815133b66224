//! Result pages for the contact form.
//!
//! Templates are embedded at compile time and registered with Tera once at
//! startup. Their names end in `.html`, so Tera auto-escapes every value they
//! interpolate.

use std::sync::Arc;

use serde::Serialize;
use tera::Tera;
use tracing::error;

use crate::response::{ContentType, Response};
use crate::status::Status;

/// A page template with its compiled-in source.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    SuccessTemplate("success.html"),
    ErrorsTemplate("errors.html"),
    DeniedTemplate("denied.html"),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessTemplate {
    pub home_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorsTemplate {
    pub form_url: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeniedTemplate {
    pub home_url: String,
}

/// Which page a request ends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Denied,
    Success,
    /// Error messages in display order.
    Errors(Vec<String>),
}

/// Renders [`Page`]s into HTML responses.
#[derive(Debug, Clone)]
pub struct Pages {
    tera: Arc<Tera>,
    home_url: String,
}

impl Pages {
    /// Compiles the embedded templates. `home_url` is the target of every
    /// "go back" link; the error page links to its `#contact` anchor.
    pub fn new(home_url: impl Into<String>) -> Result<Self, crate::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template("base.html", BASE_TEMPLATE)?;
        tera.add_raw_templates(TEMPLATES.iter().copied())?;

        Ok(Self { tera: Arc::new(tera), home_url: home_url.into() })
    }

    pub fn render_template<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.tera.render(T::NAME, &context).map_err(Into::into)
    }

    pub fn render(&self, page: &Page) -> anyhow::Result<String> {
        match page {
            Page::Denied => self.render_template(&DeniedTemplate {
                home_url: self.home_url.clone(),
            }),
            Page::Success => self.render_template(&SuccessTemplate {
                home_url: self.home_url.clone(),
            }),
            Page::Errors(errors) => self.render_template(&ErrorsTemplate {
                form_url: format!("{}#contact", self.home_url),
                errors: errors.clone(),
            }),
        }
    }

    /// Renders `page` as a `200 OK` HTML response.
    ///
    /// A render failure is logged and answered with a plain-text 500.
    pub fn respond(&self, page: &Page) -> Response {
        match self.render(page) {
            Ok(html) => Response::html(html),
            Err(err) => {
                error!(error = %err, ?page, "failed to render page");
                Response::builder()
                    .status(Status::InternalServerError)
                    .bytes(ContentType::Text, "internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pages() -> Pages {
        Pages::new("index.html").unwrap()
    }

    #[test]
    fn success_page() {
        let html = pages().render(&Page::Success).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Message Sent!</title>"));
        assert!(html.contains("Message Sent Successfully!"));
        assert!(html.contains(r#"href="index.html""#));
    }

    #[test]
    fn denied_page() {
        let html = pages().render(&Page::Denied).unwrap();
        assert!(html.contains("<title>Access Denied</title>"));
        assert!(html.contains("Direct Access Not Allowed"));
        assert!(html.contains(r#"href="index.html""#));
    }

    #[test]
    fn errors_page_lists_messages_in_order() {
        let html = pages()
            .render(&Page::Errors(vec![
                "Name is required.".into(),
                "Message is required.".into(),
            ]))
            .unwrap();

        let items: Vec<&str> = html
            .lines()
            .map(str::trim)
            .filter(|l| l.starts_with("<li>"))
            .collect();
        assert_eq!(items, ["<li>Name is required.</li>", "<li>Message is required.</li>"]);
        assert!(html.contains(r#"href="index.html#contact""#));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let html = pages()
            .render(&Page::Errors(vec!["<script>alert(1)</script>".into()]))
            .unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn respond_is_html() {
        let res = pages().respond(&Page::Denied);
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
    }
}
