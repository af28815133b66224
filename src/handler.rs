//! Route endpoints.
//!
//! Every endpoint this service mounts is a concrete type: the contact form,
//! [`Liveness`](crate::health::Liveness) and
//! [`Readiness`](crate::health::Readiness). Each implements [`Handler`], and
//! the router stores them behind one trait object so a single `matchit` tree
//! can hold all three.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

/// An endpoint the router can mount.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request) -> impl Future<Output = Response> + Send;
}

pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Object-safe face of [`Handler`]; the future owns its endpoint.
pub(crate) trait Endpoint: Send + Sync {
    fn serve(self: Arc<Self>, req: Request) -> BoxFuture;
}

impl<H: Handler> Endpoint for H {
    fn serve(self: Arc<Self>, req: Request) -> BoxFuture {
        Box::pin(async move { self.call(req).await })
    }
}

pub(crate) type BoxedEndpoint = Arc<dyn Endpoint>;
