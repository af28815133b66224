use tracing::{debug, info};

use super::{MailTransport, OutboundMessage};

/// A transport that delivers nothing.
///
/// Runs when no SMTP relay is configured. Each message is logged (the body
/// only at `debug`) and reported as accepted, so the visitor sees the success
/// page while nobody receives mail. Startup warns about this.
#[derive(Debug, Clone, Default)]
pub struct DryRunMailer;

impl MailTransport for DryRunMailer {
    async fn send(&self, message: OutboundMessage) -> anyhow::Result<bool> {
        info!(
            recipient = %message.recipient,
            subject = %message.subject,
            reply_to = %message.reply_to,
            "dry run: contact message not delivered"
        );
        debug!(body = %message.body, "dry run message body");
        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
