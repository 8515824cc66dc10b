//! # chainware
//!
//! Contract-checked middleware chains for hyper services.
//!
//! An endpoint is an ordered list of **wares** ending in a **handler**. Every
//! unit declares the store keys it reads and the keys it writes. Before the
//! server accepts a single connection, chainware walks each chain and refuses
//! to register it if some unit reads a key nothing earlier in the chain
//! writes. At request time the composed chain just runs: no checks, no locks,
//! one fresh value store per request.
//!
//! ```text
//! Endpoint ──▶ validate (startup) ──▶ compose (startup) ──▶ Router ──▶ Server
//!                                                             │
//!                                          request ──▶ ware ─▶ ware ─▶ handler
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use chainware::{Endpoint, Handler, Method, Request, Response, Router, Server, Ware, wares};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chainware::Error> {
//!     let greet = Ware::new("greet")
//!         .outputs(["text"])
//!         .handle(|mut req, next| async move {
//!             req.set("text", String::from("Hello World!"));
//!             next.call(req).await
//!         });
//!
//!     let endpoints = [
//!         Endpoint::new("/hello", Handler::new("hello", hello).inputs(["text"]))
//!             .middleware(wares::trace())
//!             .blockware(greet)
//!             .method(Method::Get),
//!     ];
//!
//!     let app = Router::new().endpoints("/api/v1", &endpoints)?;
//!     Server::bind("0.0.0.0:3000")?.serve(app).await
//! }
//!
//! async fn hello(req: Request) -> Response {
//!     Response::text(req.get::<String>("text").cloned().unwrap_or_default())
//! }
//! ```

mod compose;
mod contract;
mod endpoint;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod step;
mod store;
mod validate;
mod ware;

pub mod health;
pub mod wares;

pub use compose::compose;
pub use contract::{Available, Contract, Keys};
pub use endpoint::{Endpoint, Mount, register_all};
pub use error::Error;
pub use handler::Handler;
pub use http::StatusCode;
pub use method::{Method, Methods, UnknownMethod};
pub use request::Request;
pub use response::{ContentType, Failure, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use step::{BoxFuture, IntoStep, Next, Step};
pub use store::Store;
pub use validate::{ContractViolation, Stage, validate, validate_from};
pub use ware::Ware;
