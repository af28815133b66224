//! Outbound mail: the message the contact form composes and the transports
//! that carry it.
//!
//! [`MailTransport`] is the seam between the form handler and delivery.
//! [`SmtpMailer`] relays through an SMTP server; [`DryRunMailer`] only logs
//! the composed message and is what runs when no relay is configured.

use std::future::Future;
use std::sync::Arc;

mod dry_run;
mod smtp;

pub use dry_run::DryRunMailer;
pub use smtp::SmtpMailer;

/// A contact message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: lettre::Address,
    pub subject: String,
    /// The submitter's (sanitized) address.
    pub reply_to: String,
    /// Plain-text body.
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait MailTransport: Send + Sync + 'static {
    /// Hands `message` to the transport. `Ok(true)` means it was accepted for
    /// delivery, `Ok(false)` that the relay refused it.
    fn send(&self, message: OutboundMessage) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Checks that the transport is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<T: MailTransport> MailTransport for Arc<T> {
    fn send(&self, message: OutboundMessage) -> impl Future<Output = anyhow::Result<bool>> + Send {
        (**self).send(message)
    }

    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send {
        (**self).ping()
    }
}

/// The transport chosen at startup.
#[derive(Debug, Clone)]
pub enum Mailer {
    Smtp(SmtpMailer),
    DryRun(DryRunMailer),
}

impl MailTransport for Mailer {
    async fn send(&self, message: OutboundMessage) -> anyhow::Result<bool> {
        match self {
            Self::Smtp(mailer) => mailer.send(message).await,
            Self::DryRun(mailer) => mailer.send(message).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Smtp(mailer) => mailer.ping().await,
            Self::DryRun(mailer) => mailer.ping().await,
        }
    }
}

#[cfg(test)]
impl MockMailTransport {
    pub fn with_send(mut self, message: OutboundMessage, result: bool) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, error: &'static str) -> Self {
        self.expect_send()
            .once()
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }

    pub fn with_ping(mut self, ok: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            let result = if ok { Ok(()) } else { Err(anyhow::anyhow!("relay unreachable")) };
            Box::pin(std::future::ready(result))
        });
        self
    }
}
