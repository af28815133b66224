//! The contact-form handler.
//!
//! A request ends in exactly one of three pages. The choice depends only on
//! whether the request was a `POST` and whether the sanitized fields pass
//! validation:
//!
//! | method | validation | page |
//! |---|---|---|
//! | not `POST` | not run | access denied |
//! | `POST` | errors | error list |
//! | `POST` | clean | success (after one delivery attempt) |
//!
//! The success page does not wait on a successful delivery. A relay that
//! refuses the message, errors, or times out is logged and the visitor still
//! sees the confirmation; the logs are the only place a lost message shows up.

use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::form::FormFields;
use crate::handler::Handler;
use crate::mail::{MailTransport, OutboundMessage};
use crate::method::Method;
use crate::page::{Page, Pages};
use crate::request::Request;
use crate::response::Response;

mod sanitize;
mod validate;

pub use sanitize::{SanitizedInput, sanitize};
pub use validate::{ValidationError, ValidationErrors, is_valid_email, validate};

/// How a submission was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Not a `POST`; nothing else was looked at.
    Denied,
    Invalid(ValidationErrors),
    Accepted(SanitizedInput),
}

impl Submission {
    pub fn page(&self) -> Page {
        match self {
            Self::Denied => Page::Denied,
            Self::Invalid(errors) => Page::Errors(errors.messages()),
            Self::Accepted(_) => Page::Success,
        }
    }
}

/// Classifies one submission. Pure: no delivery, no rendering.
pub fn evaluate(method: &Method, form: &FormFields) -> Submission {
    if *method != Method::Post {
        return Submission::Denied;
    }

    let input = SanitizedInput::from_form(form);
    let errors = validate(&input);
    if errors.is_empty() {
        Submission::Accepted(input)
    } else {
        Submission::Invalid(errors)
    }
}

/// Fixed parts of every outbound message.
#[derive(Debug, Clone)]
pub struct ContactSettings {
    pub recipient: lettre::Address,
    pub subject: String,
    /// Upper bound on one delivery attempt.
    pub mail_timeout: Duration,
}

/// Handles contact-form requests.
#[derive(Debug, Clone)]
pub struct ContactForm<M> {
    mailer: M,
    settings: ContactSettings,
    pages: Pages,
}

impl<M> ContactForm<M>
where
    M: MailTransport,
{
    pub fn new(mailer: M, settings: ContactSettings, pages: Pages) -> Self {
        Self { mailer, settings, pages }
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Builds the message for an accepted submission.
    pub fn compose(&self, input: &SanitizedInput) -> OutboundMessage {
        let body = format!(
            "You have received a new message from your website contact form.\n\n\
             Name: {}\nEmail: {}\nMessage:\n{}\n",
            input.name, input.email, input.message
        );

        OutboundMessage {
            recipient: self.settings.recipient.clone(),
            subject: self.settings.subject.clone(),
            reply_to: input.email.clone(),
            body,
        }
    }

    /// Classifies the submission, attempts delivery when it is accepted, and
    /// returns the page to show.
    pub async fn process(&self, method: &Method, form: &FormFields) -> Page {
        let submission = evaluate(method, form);

        match &submission {
            Submission::Denied => info!(%method, "direct access denied"),
            Submission::Invalid(errors) => {
                info!(errors = errors.len(), "submission failed validation");
            }
            Submission::Accepted(input) => self.deliver(self.compose(input)).await,
        }

        submission.page()
    }

    /// Handles one request against the form path.
    pub async fn handle(&self, req: Request) -> Response {
        let page = self.process(req.method(), &req.form()).await;
        self.pages.respond(&page)
    }

    /// One bounded, best-effort delivery attempt. Never fails the request.
    #[instrument(skip_all, fields(recipient = %message.recipient))]
    async fn deliver(&self, message: OutboundMessage) {
        let timeout = self.settings.mail_timeout;

        match tokio::time::timeout(timeout, self.mailer.send(message)).await {
            Ok(Ok(true)) => info!("contact message handed to mail transport"),
            Ok(Ok(false)) => {
                warn!("mail relay refused contact message; visitor was shown the success page");
            }
            Ok(Err(err)) => {
                error!(error = %err, "failed to send contact message; visitor was shown the success page");
            }
            Err(_) => {
                warn!(?timeout, "mail delivery timed out; visitor was shown the success page");
            }
        }
    }
}

impl<M> Handler for ContactForm<M>
where
    M: MailTransport + Send + Sync + 'static,
{
    async fn call(&self, req: Request) -> Response {
        self.handle(req).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mail::MockMailTransport;
    use crate::status::Status;

    fn settings() -> ContactSettings {
        ContactSettings {
            recipient: "info@example.com".parse().unwrap(),
            subject: "New Contact Form Submission".into(),
            mail_timeout: Duration::from_secs(5),
        }
    }

    fn sut<M: MailTransport>(mailer: M) -> ContactForm<M> {
        ContactForm::new(mailer, settings(), Pages::new("index.html").unwrap())
    }

    fn form(name: &str, email: &str, message: &str) -> FormFields {
        [("name", name), ("email", email), ("message", message)]
            .into_iter()
            .collect()
    }

    fn expected_message(name: &str, email: &str, message: &str) -> OutboundMessage {
        OutboundMessage {
            recipient: "info@example.com".parse().unwrap(),
            subject: "New Contact Form Submission".into(),
            reply_to: email.into(),
            body: format!(
                "You have received a new message from your website contact form.\n\n\
                 Name: {name}\nEmail: {email}\nMessage:\n{message}\n"
            ),
        }
    }

    #[test]
    fn non_post_is_denied_whatever_the_fields() {
        let methods = Method::STANDARD
            .into_iter()
            .filter(|m| *m != Method::Post)
            .chain([Method::from("post"), Method::from("PURGE")]);
        for method in methods {
            assert_eq!(evaluate(&method, &form("Jo", "a@b.com", "Hello")), Submission::Denied);
            assert_eq!(evaluate(&method, &FormFields::default()), Submission::Denied);
        }
    }

    #[test]
    fn missing_name() {
        let submission = evaluate(&Method::Post, &form("", "a@b.com", "hi"));
        assert_eq!(submission.page(), Page::Errors(vec!["Name is required.".into()]));
    }

    #[test]
    fn malformed_email() {
        let submission = evaluate(&Method::Post, &form("Jo", "not-an-email", "hi"));
        assert_eq!(submission.page(), Page::Errors(vec!["Invalid email format.".into()]));
    }

    #[test]
    fn missing_message() {
        let submission = evaluate(&Method::Post, &form("Jo", "a@b.com", ""));
        assert_eq!(submission.page(), Page::Errors(vec!["Message is required.".into()]));
    }

    #[test]
    fn whitespace_only_fields_are_empty() {
        let submission = evaluate(&Method::Post, &form("  ", "\t", "\n \n"));
        assert_eq!(
            submission.page(),
            Page::Errors(vec![
                "Name is required.".into(),
                "Email is required.".into(),
                "Message is required.".into(),
            ])
        );
    }

    #[test]
    fn absent_fields_are_empty() {
        let submission = evaluate(&Method::Post, &FormFields::default());
        assert_eq!(
            submission.page(),
            Page::Errors(vec![
                "Name is required.".into(),
                "Email is required.".into(),
                "Message is required.".into(),
            ])
        );
    }

    #[test]
    fn accepted_input_is_sanitized() {
        let submission = evaluate(&Method::Post, &form(" Jo ", " a@b.com ", " <b>Hello</b> "));
        assert_eq!(
            submission,
            Submission::Accepted(SanitizedInput {
                name: "Jo".into(),
                email: "a@b.com".into(),
                message: "&lt;b&gt;Hello&lt;/b&gt;".into(),
            })
        );
    }

    #[test]
    fn lone_zero_counts_as_empty() {
        let submission = evaluate(&Method::Post, &form("0", "0", " 0 "));
        assert_eq!(
            submission.page(),
            Page::Errors(vec![
                "Name is required.".into(),
                "Email is required.".into(),
                "Message is required.".into(),
            ])
        );

        let submission = evaluate(&Method::Post, &form("0", "a@b.com", "0"));
        assert_eq!(
            submission.page(),
            Page::Errors(vec!["Name is required.".into(), "Message is required.".into()])
        );

        assert!(matches!(
            evaluate(&Method::Post, &form("00", "a@b.com", "0.0")),
            Submission::Accepted(_)
        ));
    }

    #[test]
    fn classification_is_repeatable() {
        let fields = form("", "x@", "");
        assert_eq!(evaluate(&Method::Post, &fields), evaluate(&Method::Post, &fields));
    }

    #[tokio::test]
    async fn valid_submission_is_sent_and_succeeds() {
        let mailer = MockMailTransport::new()
            .with_send(expected_message("Jo", "a@b.com", "Hello"), true);
        let sut = sut(mailer);

        let page = sut.process(&Method::Post, &form("Jo", "a@b.com", "Hello")).await;

        assert_eq!(page, Page::Success);
    }

    #[tokio::test]
    async fn refused_delivery_still_succeeds() {
        let mailer = MockMailTransport::new()
            .with_send(expected_message("Jo", "a@b.com", "Hello"), false);
        let sut = sut(mailer);

        let page = sut.process(&Method::Post, &form("Jo", "a@b.com", "Hello")).await;

        assert_eq!(page, Page::Success);
    }

    #[tokio::test]
    async fn transport_error_still_succeeds() {
        let sut = sut(MockMailTransport::new().with_send_error("connection refused"));

        let page = sut.process(&Method::Post, &form("Jo", "a@b.com", "Hello")).await;

        assert_eq!(page, Page::Success);
    }

    #[tokio::test]
    async fn invalid_and_denied_submissions_send_nothing() {
        let sut = sut(MockMailTransport::new());

        assert_eq!(sut.process(&Method::Get, &form("Jo", "a@b.com", "Hello")).await, Page::Denied);
        assert!(matches!(
            sut.process(&Method::Post, &form("Jo", "a@b.com", "")).await,
            Page::Errors(_)
        ));
    }

    struct StalledMailer;

    impl MailTransport for StalledMailer {
        async fn send(&self, _message: OutboundMessage) -> anyhow::Result<bool> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(true)
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_delivery_times_out_and_succeeds() {
        let sut = sut(StalledMailer);

        let page = sut.process(&Method::Post, &form("Jo", "a@b.com", "Hello")).await;

        assert_eq!(page, Page::Success);
    }

    #[tokio::test]
    async fn script_in_name_is_never_rendered() {
        let sut = sut(MockMailTransport::new());
        let req = Request::new(Method::Post, "/process_form")
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_body("name=%3Cscript%3Ealert(1)%3C%2Fscript%3E&email=bad&message=");

        let res = sut.handle(req).await;
        let html = res.body_text();

        assert_eq!(res.status_code(), Status::Ok);
        assert!(html.contains("<li>Invalid email format.</li>"));
        assert!(html.contains("<li>Message is required.</li>"));
        assert!(!html.contains("<script>alert"));
    }

    #[tokio::test]
    async fn urls_in_the_message_survive_escaping() {
        let mailer = MockMailTransport::new().with_send(
            expected_message("Jo", "a/b@c.com", "see https://x.io/a"),
            true,
        );
        let sut = sut(mailer);

        let page = sut.process(&Method::Post, &form("Jo", "a/b@c.com", "see https://x.io/a")).await;

        assert_eq!(page, Page::Success);
    }

    #[tokio::test]
    async fn escaped_values_reach_the_message_body() {
        let mailer = MockMailTransport::new().with_send(
            expected_message("Tom &amp; Jerry", "a@b.com", "1 &lt; 2"),
            true,
        );
        let sut = sut(mailer);

        let page = sut.process(&Method::Post, &form("Tom & Jerry", "a@b.com", "1 < 2")).await;

        assert_eq!(page, Page::Success);
    }
}
