//! Built-in Kubernetes health-check endpoints.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Both are ordinary endpoints with empty chains, so they go through the same
//! registration as everything else:
//!
//! ```rust
//! use chainware::{Router, health};
//!
//! let app = Router::new().endpoints("", &health::endpoints()).unwrap();
//! ```
//!
//! To gate readiness on dependencies, register your own handler at `/readyz`
//! instead, with whatever wares it needs.

use crate::endpoint::Endpoint;
use crate::handler::Handler;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"`.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}

/// `GET /healthz` and `GET /readyz`, neither reading any store keys.
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("/healthz", Handler::new("liveness", liveness)).method(Method::Get),
        Endpoint::new("/readyz", Handler::new("readiness", readiness)).method(Method::Get),
    ]
}
