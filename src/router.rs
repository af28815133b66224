//! Radix-tree request router.
//!
//! One tree per HTTP method, plus one tree for endpoints mounted with
//! [`Router::any`]. A method-specific route wins over an `any` route on the
//! same path. The contact form is mounted with `any` so every method,
//! extension tokens included, reaches it and the form decides what a
//! non-`POST` request gets.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::error::Error;
use crate::handler::{BoxedEndpoint, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns the router back, or the path `matchit` refused.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedEndpoint>>,
    any: MatchitRouter<BoxedEndpoint>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), any: MatchitRouter::new() }
    }

    /// Mounts `handler` for one method + path pair.
    ///
    /// ```rust
    /// # use laurels_contact::{Method, Router, health};
    /// # fn main() -> Result<(), laurels_contact::Error> {
    /// Router::new().on(Method::Get, "/healthz", health::Liveness)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Result<Self, Error> {
        let tree = self.routes.entry(method).or_default();
        insert(tree, path, Arc::new(handler))?;
        Ok(self)
    }

    /// Mounts `handler` on `path` for every method, known or not.
    pub fn any(mut self, path: &str, handler: impl Handler) -> Result<Self, Error> {
        insert(&mut self.any, path, Arc::new(handler))?;
        Ok(self)
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Option<BoxedEndpoint> {
        let matched = self.routes.get(method)
            .and_then(|tree| tree.at(path).ok())
            .or_else(|| self.any.at(path).ok())?;
        Some(Arc::clone(matched.value))
    }

    /// Routes one request and produces one response; unrouted paths get 404.
    pub async fn dispatch(&self, req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some(endpoint) => endpoint.serve(req).await,
            None => {
                debug!(method = %req.method(), path = %req.path(), "no route");
                Response::status(Status::NotFound)
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn insert(
    tree: &mut MatchitRouter<BoxedEndpoint>,
    path: &str,
    endpoint: BoxedEndpoint,
) -> Result<(), Error> {
    tree.insert(path, endpoint).map_err(|source| Error::Route {
        path: path.to_owned(),
        source,
    })
}
