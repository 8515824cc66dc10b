//! Radix-tree request router.
//!
//! One `matchit` tree per HTTP method, O(path-length) lookup. The router knows
//! nothing about contracts: it stores the already-composed [`Step`] of each
//! endpoint and calls it.

use std::collections::HashMap;

use http::StatusCode;
use matchit::Router as MatchitRouter;

use crate::endpoint::{Endpoint, Mount, register_all};
use crate::error::Error;
use crate::method::{Method, Methods};
use crate::request::Request;
use crate::response::Response;
use crate::step::{IntoStep, Step};

/// The application router.
///
/// Build it once at startup, pass it to [`Server::serve`](crate::Server::serve).
#[derive(Default)]
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Step>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates, composes and mounts `endpoints` under `prefix`.
    ///
    /// Consumes the router so that a failed registration leaves no partially
    /// built router behind.
    ///
    /// ```rust
    /// use chainware::{Router, health};
    ///
    /// let router = Router::new()
    ///     .endpoints("", &health::endpoints())
    ///     .expect("health endpoints have no inputs");
    /// ```
    pub fn endpoints(mut self, prefix: &str, endpoints: &[Endpoint]) -> Result<Self, Error> {
        register_all(endpoints, &mut self, prefix)?;
        Ok(self)
    }

    /// Mounts a bare function with no wares and no contract.
    pub fn on(mut self, method: Method, path: &str, f: impl IntoStep) -> Result<Self, Error> {
        self.insert(method, path, f.into_step())?;
        Ok(self)
    }

    fn insert(&mut self, method: Method, path: &str, step: Step) -> Result<(), Error> {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, step)
            .map_err(|source| Error::Route { path: path.to_owned(), source })
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Option<(Step, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((matched.value.clone(), params))
    }

    fn path_exists(&self, path: &str) -> bool {
        self.routes.values().any(|tree| tree.at(path).is_ok())
    }

    /// Routes one request through its chain.
    ///
    /// `404` when no method has the path, `405` when another method does.
    pub async fn respond(&self, mut req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some((step, params)) => {
                req.set_params(params);
                step.call(req).await
            }
            None if self.path_exists(req.path()) => Response::status(StatusCode::METHOD_NOT_ALLOWED),
            None => Response::status(StatusCode::NOT_FOUND),
        }
    }
}

impl Mount for Router {
    fn handle(&mut self, path: &str, methods: &Methods, step: Step) -> Result<(), Error> {
        for &method in methods {
            self.insert(method, path, step.clone())?;
        }
        Ok(())
    }
}
