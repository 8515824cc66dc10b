//! Incoming HTTP request type.
//!
//! Besides the usual method/path/headers/body, a [`Request`] owns the
//! per-request [`Store`] that wares use to pass values down the chain.

use std::any::Any;
use std::collections::HashMap;

use bytes::Bytes;

use crate::method::Method;
use crate::store::Store;

/// An incoming HTTP request together with its value store.
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Bytes,
    params: HashMap<String, String>,
    store: Store,
}

impl Request {
    /// A request with no headers, no body and an empty store.
    ///
    /// The server builds these from the wire; tests build them directly and
    /// hand them to [`Router::respond`](crate::Router::respond).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Bytes::new(),
            params: HashMap::new(),
            store: Store::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    // ── Value store ──────────────────────────────────────────────────────────

    /// Stores a value for later units of the chain.
    pub fn set<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.store.set(key, value);
    }

    /// Reads a value an earlier unit stored. `None` when the key is absent or
    /// holds a different type.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.store.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    pub fn store(&self) -> &Store { &self.store }
    pub fn store_mut(&mut self) -> &mut Store { &mut self.store }
}
