//! # laurels-contact
//!
//! The endpoint behind the Laurels Consulting contact form.
//!
//! A visitor posts `name`, `email` and `message`. The service trims and
//! HTML-escapes the fields, validates them, relays an accepted submission to
//! the company mailbox, and answers with one of three HTML pages: message
//! sent, a list of what to fix, or "direct access not allowed" for anything
//! that is not a form `POST`.
//!
//! TLS, rate limiting and body-size limits belong to the reverse proxy in
//! front of it.
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use laurels_contact::{
//!     ContactForm, ContactSettings, Method, Pages, Router, Server, health,
//!     mail::DryRunMailer,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mailer = Arc::new(DryRunMailer);
//! let settings = ContactSettings {
//!     recipient: "info@example.com".parse()?,
//!     subject: "New Contact Form Submission".into(),
//!     mail_timeout: std::time::Duration::from_secs(10),
//! };
//! let form = ContactForm::new(Arc::clone(&mailer), settings, Pages::new("index.html")?);
//!
//! let app = Router::new()
//!     .any("/process_form", form)?
//!     .on(Method::Get, "/healthz", health::Liveness)?
//!     .on(Method::Get, "/readyz", health::Readiness::new(mailer))?;
//!
//! Server::bind("0.0.0.0:3000".parse()?).serve(app).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod contact;
pub mod form;
pub mod health;
pub mod logging;
pub mod mail;
pub mod page;

pub use contact::{ContactForm, ContactSettings};
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use page::{Page, Pages};
pub use request::Request;
pub use response::{ContentType, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
