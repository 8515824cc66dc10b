use std::time::{Duration, Instant};

use tracing::{Instrument, info, info_span};

use crate::ware::Ware;

/// Wraps the rest of the chain in a `request` span and logs one line per
/// request once the response is known. Reads and writes no store keys.
pub fn trace() -> Ware {
    Ware::new("trace").handle(|req, next| async move {
        let method = req.method();
        let path = req.path().to_owned();
        let span = info_span!("request", %method, path = %path);
        let started = Instant::now();

        let res = next.call(req).instrument(span.clone()).await;

        span.in_scope(|| {
            info!(
                status = res.status_code().as_u16(),
                latency_us = micros(started.elapsed()),
                "request finished"
            );
        });
        res
    })
}

/// Whole microseconds, saturating at `u64::MAX`.
fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
