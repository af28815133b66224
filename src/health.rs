//! Kubernetes health-check endpoints.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the mail transport be reached? Failure → pulled from load-balancer. |
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use laurels_contact::{Method, Router, health, mail::DryRunMailer};
//!
//! # fn main() -> Result<(), laurels_contact::Error> {
//! let app = Router::new()
//!     .on(Method::Get, "/healthz", health::Liveness)?
//!     .on(Method::Get, "/readyz", health::Readiness::new(Arc::new(DryRunMailer)))?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::warn;

use crate::handler::Handler;
use crate::mail::MailTransport;
use crate::{ContentType, Request, Response, Status};

/// Liveness probe. Always `200 OK` with body `"ok"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Liveness;

impl Handler for Liveness {
    async fn call(&self, _req: Request) -> Response {
        Response::text("ok")
    }
}

/// Readiness probe bound to a mail transport.
///
/// `200 ready` when the transport answers a ping, `503` otherwise. With the
/// dry-run transport this is always ready.
#[derive(Debug)]
pub struct Readiness<M> {
    mailer: Arc<M>,
}

impl<M> Readiness<M> {
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer }
    }
}

impl<M> Handler for Readiness<M>
where
    M: MailTransport + Send + Sync + 'static,
{
    async fn call(&self, _req: Request) -> Response {
        match self.mailer.ping().await {
            Ok(()) => Response::text("ready"),
            Err(err) => {
                warn!(error = %err, "readiness check failed: mail transport unreachable");
                Response::builder()
                    .status(Status::ServiceUnavailable)
                    .bytes(ContentType::Text, "mail transport unreachable")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;
    use crate::mail::MockMailTransport;

    fn probe() -> Request {
        Request::new(Method::Get, "/readyz")
    }

    #[tokio::test]
    async fn liveness_is_ok() {
        let res = Liveness.call(Request::new(Method::Get, "/healthz")).await;
        assert_eq!(res.body_text(), "ok");
    }

    #[tokio::test]
    async fn ready_when_transport_answers() {
        let readiness = Readiness::new(Arc::new(MockMailTransport::new().with_ping(true)));

        let res = readiness.call(probe()).await;

        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.body_text(), "ready");
    }

    #[tokio::test]
    async fn unavailable_when_transport_is_down() {
        let readiness = Readiness::new(Arc::new(MockMailTransport::new().with_ping(false)));

        let res = readiness.call(probe()).await;

        assert_eq!(res.status_code(), Status::ServiceUnavailable);
        assert_eq!(res.body_text(), "mail transport unreachable");
    }
}
