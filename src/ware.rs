//! Wares: reusable stages that wrap the rest of a chain.
//!
//! A ware is a [`Contract`] plus a transform `Fn(Step) -> Step`. At compose
//! time the transform receives the downstream remainder of the chain and
//! returns the step that runs in its place. At request time that step may
//! touch the store, call `next`, inspect the response, or skip `next`
//! entirely to end the chain early.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::contract::Contract;
use crate::request::Request;
use crate::response::Response;
use crate::step::{Next, Step};

type Transform = Arc<dyn Fn(Step) -> Step + Send + Sync + 'static>;

/// A named, contract-carrying stage of a chain.
///
/// ```rust
/// use chainware::Ware;
///
/// let writer = Ware::new("writer")
///     .outputs(["text"])
///     .handle(|mut req, next| async move {
///         req.set("text", String::from("Hello World!"));
///         next.call(req).await
///     });
/// assert!(writer.contract().output_keys().contains("text"));
/// ```
#[derive(Clone)]
pub struct Ware {
    contract: Contract,
    transform: Transform,
}

impl Ware {
    /// A pass-through ware: it delegates straight to `next` until given a
    /// body with [`handle`](Ware::handle) or [`transform`](Ware::transform).
    pub fn new(name: impl Into<String>) -> Self {
        Self { contract: Contract::new(name), transform: Arc::new(|next: Step| next) }
    }

    pub fn inputs<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.contract = self.contract.inputs(keys);
        self
    }

    pub fn outputs<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.contract = self.contract.outputs(keys);
        self
    }

    /// Sets the raw transform.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(Step) -> Step + Send + Sync + 'static,
    {
        self.transform = Arc::new(f);
        self
    }

    /// Sets the body from an async closure that receives the request and the
    /// rest of the chain.
    pub fn handle<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let f = Arc::new(f);
        self.transform(move |next: Step| {
            let f = Arc::clone(&f);
            Step::from_fn(move |req: Request| f(req, next.clone()))
        })
    }

    /// Wraps `next` with this ware.
    pub fn wrap(&self, next: Step) -> Step {
        (self.transform)(next)
    }

    pub fn name(&self) -> &str { self.contract.name() }
    pub fn contract(&self) -> &Contract { &self.contract }
}

impl fmt::Debug for Ware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ware").field("contract", &self.contract).finish_non_exhaustive()
    }
}
