//! End-to-end registration and dispatch through the router.
//!
//! Requests are built in-process and handed to `Router::respond`; no socket
//! is opened.

use std::sync::Arc;
use std::time::Duration;

use chainware::{
    Endpoint, Error, Failure, Handler, IntoResponse, Method, Request, Response, Router, Stage,
    StatusCode, Ware, wares,
};

const KEY_TEXT: &str = "text";
const TEXT_VAL_1: &str = "Hello World!";
const TEXT_VAL_2: &str = "h e l l o w o r l d";

// =============================================================================
// Units
// =============================================================================

fn printer() -> Ware {
    Ware::new("printer").inputs([KEY_TEXT]).handle(|req, next| async move {
        if let Some(text) = req.get::<String>(KEY_TEXT) {
            tracing::info!(%text, "printer");
        }
        next.call(req).await
    })
}

fn writer(name: &str, value: &'static str) -> Ware {
    Ware::new(name).outputs([KEY_TEXT]).handle(move |mut req, next| async move {
        req.set(KEY_TEXT, value.to_owned());
        next.call(req).await
    })
}

async fn write_text(req: Request) -> Result<Response, Failure> {
    let text = req
        .get::<String>(KEY_TEXT)
        .ok_or_else(|| Failure::internal("text not set"))?;
    Ok(Response::text(text.clone()))
}

fn handler(name: &str) -> Handler {
    Handler::new(name, write_text).inputs([KEY_TEXT])
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn create_endpoints_serves_each_chain() {
    init_tracing();
    let endpoints = [
        Endpoint::new("/e1", handler("handler1"))
            .middleware(writer("writer1", TEXT_VAL_1))
            .blockware(printer())
            .method(Method::Get),
        Endpoint::new("/e2", handler("handler2"))
            .middleware(writer("writer2", TEXT_VAL_2))
            .blockware(printer())
            .method(Method::Get),
    ];
    let prefix = "/api/v1";
    let router = Router::new().endpoints(prefix, &endpoints).unwrap();

    let res = router.respond(Request::new(Method::Get, format!("{prefix}/e1"))).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.body(), TEXT_VAL_1.as_bytes());

    let res = router.respond(Request::new(Method::Get, format!("{prefix}/e2"))).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.body(), TEXT_VAL_2.as_bytes());
}

#[tokio::test]
async fn multi_key_chain_reaches_handler() {
    let w1 = Ware::new("w1").outputs(["key1", "key2"]).handle(|mut req, next| async move {
        req.set("key1", "val1");
        req.set("key2", "val2");
        next.call(req).await
    });
    let w2 = Ware::new("w2")
        .inputs(["key1", "key2"])
        .outputs(["key3"])
        .handle(|mut req, next| async move {
            if !(req.contains("key1") && req.contains("key2")) {
                return Failure::internal("w2 inputs missing").into_response();
            }
            req.set("key3", "val3");
            next.call(req).await
        });
    let w3 = Ware::new("w3")
        .inputs(["key1", "key2", "key3"])
        .outputs(["key4"])
        .handle(|mut req, next| async move {
            if !req.contains("key3") {
                return Failure::internal("w3 inputs missing").into_response();
            }
            req.set("key4", "val4");
            next.call(req).await
        });
    let h = Handler::new("h1", |req: Request| async move {
        match req.get::<&'static str>("key4") {
            Some(v) => Ok(Response::text(*v)),
            None => Err(Failure::internal("key4 not set")),
        }
    })
    .inputs(["key4"]);

    let router = Router::new()
        .endpoints("", &[Endpoint::new("/testcompose", h).middlewares([w1, w2, w3]).method(Method::Get)])
        .unwrap();

    let res = router.respond(Request::new(Method::Get, "/testcompose")).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.body(), b"val4");
}

#[test]
fn unmet_input_is_never_registered() {
    let endpoints = [Endpoint::new("/p", handler("h1")).middleware(printer()).method(Method::Get)];

    let err = Router::new().endpoints("", &endpoints).err().unwrap();

    let Error::Contract { path, violation } = err else {
        panic!("expected a contract violation");
    };
    assert_eq!(path, "/p");
    assert_eq!(violation.unit, "printer");
    assert_eq!(violation.stage, Stage::Ware(0));
    assert!(violation.missing.contains(KEY_TEXT));
}

#[test]
fn reversed_chain_fails_on_reader() {
    let ok = Endpoint::new("/ok", handler("h"))
        .middlewares([writer("a", TEXT_VAL_1), printer()])
        .method(Method::Get);
    assert!(ok.build().is_ok());

    let reversed = Endpoint::new("/rev", handler("h"))
        .middlewares([printer(), writer("a", TEXT_VAL_1)])
        .method(Method::Get);
    let err = reversed.build().unwrap_err();
    assert_eq!(err.violation().map(|v| v.unit.as_str()), Some("printer"));
}

// =============================================================================
// Request time
// =============================================================================

fn guarded_router() -> Router {
    let gate = Ware::new("gate").outputs(["user"]).handle(|mut req, next| async move {
        let Some(user) = req.header("authorization").map(str::to_owned) else {
            return Failure::unauthorized("missing credentials").into_response();
        };
        req.set("user", user);
        next.call(req).await
    });
    let slow = Handler::new("whoami", |req: Request| async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Response::text(req.get::<String>("user").cloned().unwrap_or_default())
    })
    .inputs(["user"]);

    Router::new()
        .endpoints("", &[Endpoint::new("/me", slow)
            .middleware(wares::request_id())
            .middleware(wares::trace())
            .blockware(gate)
            .method(Method::Get)])
        .unwrap()
}

#[tokio::test]
async fn short_circuit_returns_failure() {
    let router = guarded_router();
    let res = router.respond(Request::new(Method::Get, "/me")).await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.body(), b"missing credentials\n");
    assert!(res.header(wares::REQUEST_ID_HEADER).is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_are_isolated() {
    init_tracing();
    let router = Arc::new(guarded_router());

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let router = Arc::clone(&router);
        tasks.spawn(async move {
            let req = Request::new(Method::Get, "/me");
            let req = if i % 2 == 0 { req.with_header("authorization", format!("user-{i}")) } else { req };
            (i, router.respond(req).await)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (i, res) = joined.unwrap();
        if i % 2 == 0 {
            assert_eq!(res.status_code(), StatusCode::OK);
            assert_eq!(res.body(), format!("user-{i}").as_bytes());
        } else {
            assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        }
    }
}

#[tokio::test]
async fn store_does_not_leak_between_requests() {
    let counter = Ware::new("counter").outputs(["seen"]).handle(|mut req, next| async move {
        let seen = req.get::<u32>("seen").copied().unwrap_or(0) + 1;
        req.set("seen", seen);
        next.call(req).await
    });
    let h = Handler::new("seen", |req: Request| async move {
        format!("{}", req.get::<u32>("seen").copied().unwrap_or(0))
    })
    .inputs(["seen"]);
    let router = Router::new()
        .endpoints("", &[Endpoint::new("/seen", h).middleware(counter).method(Method::Post)])
        .unwrap();

    for _ in 0..3 {
        let res = router.respond(Request::new(Method::Post, "/seen")).await;
        assert_eq!(res.body(), b"1");
    }
}
