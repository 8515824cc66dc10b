//! Minimal chainware example: two endpoints sharing wares, plus health checks.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/api/v1/hello
//!   curl http://localhost:3000/api/v1/me -H 'authorization: alice'
//!   curl http://localhost:3000/api/v1/me            # 401
//!   curl http://localhost:3000/healthz

use std::process::ExitCode;

use chainware::{
    Endpoint, Failure, Handler, IntoResponse, Method, Request, Response, Router, Server, Ware,
    health, wares,
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let router = match routes() {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::bind("0.0.0.0:3000") {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match server.serve(router).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn routes() -> Result<Router, chainware::Error> {
    let api = [
        Endpoint::new("/hello", Handler::new("hello", show_text).inputs(["text"]))
            .middlewares([wares::request_id(), wares::trace()])
            .blockware(greeting())
            .method(Method::Get),
        Endpoint::new("/me", Handler::new("me", show_user).inputs(["user"]))
            .middlewares([wares::request_id(), wares::trace()])
            .blockware(authenticate())
            .methods([Method::Get, Method::Head]),
    ];

    Router::new()
        .endpoints("/api/v1", &api)?
        .endpoints("", &health::endpoints())
}

// Writes `text` for the handler.
fn greeting() -> Ware {
    Ware::new("greeting").outputs(["text"]).handle(|mut req, next| async move {
        req.set("text", String::from("Hello World!"));
        next.call(req).await
    })
}

// Reads the caller from `authorization`; ends the chain with 401 when absent.
fn authenticate() -> Ware {
    Ware::new("authenticate").outputs(["user"]).handle(|mut req, next| async move {
        let Some(user) = req.header("authorization").map(str::to_owned) else {
            return Failure::unauthorized("missing authorization header").into_response();
        };
        req.set("user", user);
        next.call(req).await
    })
}

async fn show_text(req: Request) -> Response {
    Response::text(req.get::<String>("text").cloned().unwrap_or_default())
}

async fn show_user(req: Request) -> Result<Response, Failure> {
    let user = req.get::<String>("user").ok_or_else(|| Failure::internal("user not set"))?;
    Ok(Response::json(format!(r#"{{"user":"{user}"}}"#).into_bytes()))
}
