//! Built-in wares.
//!
//! Cross-cutting stages most services put at the front of every chain:
//!
//! - [`trace`] — per-request span with method, path, status, latency
//! - [`request_id`] — stores a request id under [`REQUEST_ID`] and echoes it
//!   in the `x-request-id` response header

mod request_id;
mod trace;

pub use request_id::{REQUEST_ID, REQUEST_ID_HEADER, request_id};
pub use trace::trace;
