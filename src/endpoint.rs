//! Endpoints and registration.
//!
//! An [`Endpoint`] bundles a path, the methods it answers, two ware lists and
//! a handler. [`register_all`] turns a list of them into mounted routes:
//!
//! ```text
//! middlewares ++ blockwares ──validate──▶ compose ──▶ router.handle(prefix + path)
//! ```
//!
//! Registration is all-or-nothing. Every endpoint is validated and composed
//! before the first one is mounted; if any chain has an unmet input the
//! violation is logged and returned, and nothing reaches the router.

use tracing::{error, info, warn};

use crate::compose::compose;
use crate::error::Error;
use crate::handler::Handler;
use crate::method::{Method, Methods};
use crate::step::Step;
use crate::validate::validate;
use crate::ware::Ware;

/// The router-side half of registration.
///
/// [`Router`](crate::Router) implements this; anything else that can route a
/// path and a set of methods to a [`Step`] can too.
pub trait Mount {
    fn handle(&mut self, path: &str, methods: &Methods, step: Step) -> Result<(), Error>;
}

/// A route and the chain that serves it.
///
/// `middlewares` and `blockwares` only exist so call sites can group wares by
/// concern. The effective chain is always `middlewares` followed by
/// `blockwares`.
#[derive(Clone, Debug)]
pub struct Endpoint {
    path: String,
    middlewares: Vec<Ware>,
    blockwares: Vec<Ware>,
    handler: Handler,
    methods: Methods,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, handler: Handler) -> Self {
        Self {
            path: path.into(),
            middlewares: Vec::new(),
            blockwares: Vec::new(),
            handler,
            methods: Methods::new(),
        }
    }

    pub fn middleware(mut self, ware: Ware) -> Self {
        self.middlewares.push(ware);
        self
    }

    pub fn middlewares(mut self, wares: impl IntoIterator<Item = Ware>) -> Self {
        self.middlewares.extend(wares);
        self
    }

    pub fn blockware(mut self, ware: Ware) -> Self {
        self.blockwares.push(ware);
        self
    }

    pub fn blockwares(mut self, wares: impl IntoIterator<Item = Ware>) -> Self {
        self.blockwares.extend(wares);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.insert(method);
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods.extend(methods);
        self
    }

    pub fn path(&self) -> &str { &self.path }
    pub fn handler(&self) -> &Handler { &self.handler }
    pub fn allowed(&self) -> &Methods { &self.methods }

    /// `middlewares` followed by `blockwares`.
    pub fn chain(&self) -> impl DoubleEndedIterator<Item = &Ware> {
        self.middlewares.iter().chain(&self.blockwares)
    }

    /// Validates and composes this endpoint's chain.
    pub fn build(&self) -> Result<Step, Error> {
        validate(self.chain().map(Ware::contract), self.handler.contract()).map_err(
            |violation| Error::Contract { path: self.path.clone(), violation },
        )?;
        Ok(compose(self.chain(), &self.handler))
    }
}

/// Validates, composes and mounts every endpoint under `prefix`.
///
/// Returns the first contract violation found without mounting anything.
/// Callers should treat that as fatal and not start serving.
pub fn register_all<M: Mount>(
    endpoints: &[Endpoint],
    router: &mut M,
    prefix: &str,
) -> Result<(), Error> {
    let mut built = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let path = format!("{prefix}{}", endpoint.path);
        let step = endpoint.build().inspect_err(|e| {
            if let Some(v) = e.violation() {
                error!(
                    path = %path,
                    unit = %v.unit,
                    stage = %v.stage,
                    missing = ?v.missing,
                    "unit is not receiving its inputs; refusing to register endpoints"
                );
            }
        })?;
        built.push((path, endpoint, step));
    }

    for (path, endpoint, step) in built {
        if endpoint.methods.is_empty() {
            warn!(path = %path, "endpoint declares no methods; not mounted");
            continue;
        }
        router.handle(&path, &endpoint.methods, step)?;
        info!(
            path = %path,
            methods = ?endpoint.methods,
            handler = endpoint.handler.name(),
            wares = endpoint.middlewares.len() + endpoint.blockwares.len(),
            "endpoint registered"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response, Stage};

    #[derive(Default)]
    struct Recorder {
        mounted: Vec<(String, Methods)>,
    }

    impl Mount for Recorder {
        fn handle(&mut self, path: &str, methods: &Methods, _step: Step) -> Result<(), Error> {
            self.mounted.push((path.to_owned(), methods.clone()));
            Ok(())
        }
    }

    async fn show(req: Request) -> Response {
        Response::text(req.get::<String>("text").cloned().unwrap_or_default())
    }

    fn writer() -> Ware {
        Ware::new("writer1").outputs(["text"])
    }

    fn printer() -> Ware {
        Ware::new("printer").inputs(["text"])
    }

    fn h1() -> Handler {
        Handler::new("h1", show).inputs(["text"])
    }

    #[test]
    fn mounts_under_prefix() {
        let endpoints = [
            Endpoint::new("/e1", h1()).middleware(writer()).blockware(printer()).method(Method::Get),
            Endpoint::new("/e2", Handler::new("plain", show)).methods([Method::Get, Method::Post]),
        ];
        let mut router = Recorder::default();
        register_all(&endpoints, &mut router, "/api/v1").unwrap();

        assert_eq!(router.mounted.len(), 2);
        assert_eq!(router.mounted[0].0, "/api/v1/e1");
        assert_eq!(router.mounted[1].1, Methods::from([Method::Get, Method::Post]));
    }

    #[test]
    fn blockwares_follow_middlewares() {
        // printer as middleware, writer as blockware: printer runs first and fails.
        let ep = Endpoint::new("/x", h1()).middleware(printer()).blockware(writer()).method(Method::Get);
        let err = ep.build().unwrap_err();
        let v = err.violation().unwrap();
        assert_eq!(v.unit, "printer");
        assert_eq!(v.stage, Stage::Ware(0));
    }

    #[tokio::test]
    async fn built_chain_runs_middlewares_then_blockwares() {
        let first = Ware::new("first").outputs(["text"]).handle(|mut req, next| async move {
            req.set("text", String::from("m"));
            next.call(req).await
        });
        let second = Ware::new("second").inputs(["text"]).handle(|mut req, next| async move {
            if let Some(text) = req.store_mut().get_mut::<String>("text") {
                text.push('b');
            }
            next.call(req).await
        });
        let ep = Endpoint::new("/order", h1()).blockware(second).middleware(first).method(Method::Get);

        let res = ep.build().unwrap().call(Request::new(Method::Get, "/order")).await;
        assert_eq!(res.body(), b"mb");
    }

    #[test]
    fn violation_mounts_nothing() {
        let endpoints = [
            Endpoint::new("/ok", h1()).middleware(writer()).method(Method::Get),
            Endpoint::new("/bad", h1()).middleware(printer()).method(Method::Get),
        ];
        let mut router = Recorder::default();
        let err = register_all(&endpoints, &mut router, "").unwrap_err();

        assert!(matches!(err, Error::Contract { ref path, .. } if path == "/bad"));
        assert!(router.mounted.is_empty());
    }

    #[test]
    fn handler_violation_is_reported() {
        let ep = Endpoint::new("/h", h1()).method(Method::Get);
        let err = ep.build().unwrap_err();
        assert_eq!(err.to_string(), "endpoint `/h`: handler `h1` is not receiving input `text`");
    }

    #[test]
    fn endpoint_without_methods_is_skipped() {
        let endpoints = [Endpoint::new("/none", Handler::new("plain", show))];
        let mut router = Recorder::default();
        register_all(&endpoints, &mut router, "").unwrap();
        assert!(router.mounted.is_empty());
    }

    #[test]
    fn each_endpoint_starts_from_nothing() {
        // The writer on /a must not satisfy the printer on /b.
        let endpoints = [
            Endpoint::new("/a", h1()).middleware(writer()).method(Method::Get),
            Endpoint::new("/b", h1()).middleware(printer()).method(Method::Get),
        ];
        let err = register_all(&endpoints, &mut Recorder::default(), "").unwrap_err();
        assert_eq!(err.violation().map(|v| v.unit.as_str()), Some("printer"));
    }
}
