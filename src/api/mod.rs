//! Registry REST API client.
//!
//! - [`client`]: URL/header preparation and response interpretation
//! - [`request`]: typed requests, correlation tags and trace context

pub mod client;
pub mod request;

pub use client::{ApiClient, PreparedRequest, RawResponse, API_BASE_URL};
pub use request::{
    decode_context, ApiRequest, HttpMethod, RequestOptions, RequestTag, TraceContext,
    CONTEXT_REQUEST_KEY,
};
