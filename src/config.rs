//! Service configuration: listen address, mail relay, fixed message parts.
//!
//! Read from `CONTACT_FORM_*` environment variables (a `.env` file is loaded
//! first) and, when `CONTACT_FORM_CONFIG` names one, a config file.

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::contact::ContactSettings;
use crate::error::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_FORM_PATH: &str = "/process_form";
pub const DEFAULT_HOME_URL: &str = "index.html";
pub const DEFAULT_RECIPIENT: &str = "info@laurelsconsulting.com";
pub const DEFAULT_SUBJECT: &str = "New Contact Form Submission from Laurels Website";
pub const DEFAULT_SENDER: &str = "no-reply@laurelsconsulting.com";
pub const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Listen address. Read from CONTACT_FORM_BIND.
    #[serde(default)]
    pub bind: Option<String>,

    /// Path the form posts to. Read from CONTACT_FORM_FORM_PATH.
    #[serde(default)]
    pub form_path: Option<String>,

    /// Target of the "go back" links. Read from CONTACT_FORM_HOME_URL.
    #[serde(default)]
    pub home_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Mail
    // ─────────────────────────────────────────────────────────────────────────
    /// Where submissions go. Read from CONTACT_FORM_RECIPIENT.
    #[serde(default)]
    pub recipient: Option<String>,

    /// Subject of every outbound message. Read from CONTACT_FORM_SUBJECT.
    #[serde(default)]
    pub subject: Option<String>,

    /// From address of outbound messages. Read from CONTACT_FORM_SENDER.
    #[serde(default)]
    pub sender: Option<String>,

    /// SMTP relay URL; unset means dry run. Read from CONTACT_FORM_SMTP_URL.
    #[serde(default)]
    pub smtp_url: Option<String>,

    /// Per-message delivery timeout. Read from CONTACT_FORM_MAIL_TIMEOUT_SECS.
    #[serde(default)]
    pub mail_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        let mut c = ::config::Config::builder();
        if let Ok(path) = std::env::var("CONTACT_FORM_CONFIG") {
            c = c.add_source(::config::File::with_name(&path));
        }
        c = c.add_source(::config::Environment::with_prefix("CONTACT_FORM"));
        Ok(c.build()?.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, Error> {
        let raw = self.bind.as_deref().unwrap_or(DEFAULT_BIND);
        raw.parse().map_err(|_| Error::Bind(raw.to_owned()))
    }

    pub fn form_path_or_default(&self) -> &str {
        self.form_path.as_deref().unwrap_or(DEFAULT_FORM_PATH)
    }

    pub fn home_url_or_default(&self) -> &str {
        self.home_url.as_deref().unwrap_or(DEFAULT_HOME_URL)
    }

    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mail_timeout_secs.unwrap_or(DEFAULT_MAIL_TIMEOUT_SECS))
    }

    pub fn sender_address(&self) -> Result<lettre::Address, Error> {
        parse_address("sender", self.sender.as_deref().unwrap_or(DEFAULT_SENDER))
    }

    /// The fixed parts of outbound messages, with addresses validated.
    pub fn contact_settings(&self) -> Result<ContactSettings, Error> {
        Ok(ContactSettings {
            recipient: parse_address(
                "recipient",
                self.recipient.as_deref().unwrap_or(DEFAULT_RECIPIENT),
            )?,
            subject: self.subject.clone().unwrap_or_else(|| DEFAULT_SUBJECT.to_owned()),
            mail_timeout: self.mail_timeout(),
        })
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<lettre::Address, Error> {
    value.parse().map_err(|source| Error::Address {
        field,
        value: value.to_owned(),
        source,
    })
}
