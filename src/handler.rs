//! Terminal handlers.

use crate::contract::Contract;
use crate::step::{IntoStep, Step};

/// The business-logic unit at the end of a chain.
///
/// A handler declares the store keys it reads. It has no outputs: nothing
/// runs after it.
///
/// ```rust
/// use chainware::{Handler, Request, Response};
///
/// async fn show(req: Request) -> Response {
///     let text = req.get::<String>("text").cloned().unwrap_or_default();
///     Response::text(text)
/// }
///
/// let h = Handler::new("show", show).inputs(["text"]);
/// assert_eq!(h.name(), "show");
/// ```
#[derive(Clone, Debug)]
pub struct Handler {
    contract: Contract,
    run: Step,
}

impl Handler {
    pub fn new(name: impl Into<String>, run: impl IntoStep) -> Self {
        Self { contract: Contract::new(name), run: run.into_step() }
    }

    /// Uses an already-built step as the handler body.
    pub fn from_step(name: impl Into<String>, run: Step) -> Self {
        Self { contract: Contract::new(name), run }
    }

    /// Declares store keys this handler reads.
    pub fn inputs<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.contract = self.contract.inputs(keys);
        self
    }

    pub fn name(&self) -> &str { self.contract.name() }
    pub fn contract(&self) -> &Contract { &self.contract }
    pub fn step(&self) -> &Step { &self.run }
}
