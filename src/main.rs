//! Wiring. Loads config, picks the mail transport, registers routes, serves.

use std::sync::Arc;

use laurels_contact::config::AppConfig;
use laurels_contact::mail::{DryRunMailer, Mailer, SmtpMailer};
use laurels_contact::{ContactForm, Method, Pages, Router, Server, health, logging};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;

    let cfg = AppConfig::load()?;
    let settings = cfg.contact_settings()?;

    let mailer = Arc::new(match cfg.smtp_url.as_deref() {
        Some(url) => {
            info!(recipient = %settings.recipient, "relaying contact messages over SMTP");
            Mailer::Smtp(SmtpMailer::new(url, cfg.sender_address()?)?)
        }
        None => {
            warn!(
                "CONTACT_FORM_SMTP_URL is not set: submissions are logged, not delivered, \
                 yet visitors are still told their message was sent"
            );
            Mailer::DryRun(DryRunMailer)
        }
    });

    let pages = Pages::new(cfg.home_url_or_default())?;
    let form = ContactForm::new(Arc::clone(&mailer), settings, pages);

    let app = Router::new()
        .any(cfg.form_path_or_default(), form)?
        .on(Method::Get, "/healthz", health::Liveness)?
        .on(Method::Get, "/readyz", health::Readiness::new(mailer))?;

    Server::bind(cfg.bind_addr()?).serve(app).await?;
    Ok(())
}
