//! Pipeline steps and type erasure.
//!
//! # How steps are stored
//!
//! A composed chain is a tower of closures of *different* concrete types,
//! and the router needs to keep one per route in a single `matchit` tree.
//! Every stage is therefore erased behind `dyn ErasedStep` and shared
//! through an `Arc`:
//!
//! ```text
//! async fn hello(req: Request) -> Response { … }   ← user writes this
//!        ↓ Step::from_fn(hello)
//! Arc::new(FnStep(hello))                          ← heap-allocated wrapper
//!        ↓  stored as Step(Arc<dyn ErasedStep>)
//! step.call(req)  at request time                  ← one vtable dispatch
//!        ↓
//! Box::pin(async { hello(req).await.into_response() })  ← BoxFuture
//! ```
//!
//! A ware's transform takes the downstream `Step` and returns a new one that
//! holds a clone of it. Cloning a `Step` is one atomic increment.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` let tokio move the future across worker threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface behind [`Step`].
pub(crate) trait ErasedStep {
    fn call(&self, req: Request) -> BoxFuture;
}

/// One callable stage of a pipeline: a request in, a response out.
///
/// A composed chain is itself a `Step`. It holds no per-request state and is
/// shared by every in-flight request on its route.
#[derive(Clone)]
pub struct Step(Arc<dyn ErasedStep + Send + Sync + 'static>);

impl Step {
    /// Wraps an async function or closure.
    pub fn from_fn(f: impl IntoStep) -> Self {
        f.into_step()
    }

    /// Runs this step, and everything it delegates to, for one request.
    pub fn call(&self, req: Request) -> BoxFuture {
        self.0.call(req)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Step")
    }
}

/// The downstream remainder of a chain, as seen by a ware.
pub type Next = Step;

/// Implemented for anything that can become a [`Step`].
///
/// Automatically satisfied by any function or closure of the shape
/// `Fn(Request) -> impl Future<Output = impl IntoResponse>`. Sealed: only the
/// blanket impl below can satisfy it.
pub trait IntoStep: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_step(self) -> Step;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> IntoStep for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_step(self) -> Step {
        Step(Arc::new(FnStep(self)))
    }
}

/// Bridges a concrete function type to [`ErasedStep`].
struct FnStep<F>(F);

impl<F, Fut, R> ErasedStep for FnStep<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
