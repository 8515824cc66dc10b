use uuid::Uuid;

use crate::ware::Ware;

/// Store key holding the request id as a `String`.
pub const REQUEST_ID: &str = "request_id";

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuses the caller's `x-request-id` when present, otherwise mints a v4 UUID.
/// The id is stored under [`REQUEST_ID`] and copied onto the response.
pub fn request_id() -> Ware {
    Ware::new("request_id")
        .outputs([REQUEST_ID])
        .handle(|mut req, next| async move {
            let id = match req.header(REQUEST_ID_HEADER) {
                Some(id) if !id.is_empty() => id.to_owned(),
                _ => Uuid::new_v4().to_string(),
            };
            req.set(REQUEST_ID, id.clone());

            let mut res = next.call(req).await;
            res.insert_header(REQUEST_ID_HEADER, id);
            res
        })
}
