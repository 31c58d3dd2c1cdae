//! Typed registry requests and the context that travels with them.
//!
//! Zellij delivers web responses as a separate event, so every outbound
//! request carries a context map. The map holds a serialized [`RequestTag`]
//! (so the response can be routed to the right flow) and, when tracing is
//! active, a [`TraceContext`] linking the response span to the request span.

use crate::domain::{PatientDraft, PatientId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context key holding the serialized [`RequestTag`].
pub const CONTEXT_REQUEST_KEY: &str = "request";
const CONTEXT_TRACE_ID_KEY: &str = "trace_id";
const CONTEXT_PARENT_SPAN_KEY: &str = "parent_span_id";

/// HTTP methods used by the registry API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name, as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Identifies which flow issued a request.
///
/// Serialized into the request context and decoded again when the response
/// arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestTag {
    /// Full list fetch. `announce` controls the success banner.
    ListPatients { announce: bool },
    CreatePatient,
    UpdatePatient { id: PatientId },
    DeletePatient { id: PatientId },
}

/// Per-request method, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// Extra headers, merged over the defaults (caller wins).
    pub headers: BTreeMap<String, String>,
    /// JSON body, if any.
    pub body: Option<String>,
}

impl RequestOptions {
    #[must_use]
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// Distributed tracing context for linking a response span to its request.
///
/// Captures the current trace and span IDs from OpenTelemetry so they can
/// ride along in the web request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the request boundary.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry span is active (for example when
    /// tracing was never initialized).
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds the request's span as a remote OpenTelemetry parent.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn remote_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// A registry call ready to be handed to the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub tag: RequestTag,
    /// Path relative to the API base URL.
    pub path: String,
    pub options: RequestOptions,
    pub trace_context: Option<TraceContext>,
}

impl ApiRequest {
    fn new(tag: RequestTag, path: String, options: RequestOptions) -> Self {
        Self {
            tag,
            path,
            options,
            trace_context: TraceContext::from_current(),
        }
    }

    /// `GET /pacientes`.
    #[must_use]
    pub fn list_patients(announce: bool) -> Self {
        Self::new(
            RequestTag::ListPatients { announce },
            "/pacientes".to_string(),
            RequestOptions::new(HttpMethod::Get),
        )
    }

    /// `POST /pacientes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft cannot be serialized.
    pub fn create_patient(draft: &PatientDraft) -> Result<Self> {
        let body = serde_json::to_string(draft)?;
        Ok(Self::new(
            RequestTag::CreatePatient,
            "/pacientes".to_string(),
            RequestOptions::new(HttpMethod::Post).with_body(body),
        ))
    }

    /// `PUT /pacientes/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft cannot be serialized.
    pub fn update_patient(id: PatientId, draft: &PatientDraft) -> Result<Self> {
        let body = serde_json::to_string(draft)?;
        Ok(Self::new(
            RequestTag::UpdatePatient { id },
            format!("/pacientes/{id}"),
            RequestOptions::new(HttpMethod::Put).with_body(body),
        ))
    }

    /// `DELETE /pacientes/{id}`.
    #[must_use]
    pub fn delete_patient(id: PatientId) -> Self {
        Self::new(
            RequestTag::DeletePatient { id },
            format!("/pacientes/{id}"),
            RequestOptions::new(HttpMethod::Delete),
        )
    }

    /// Builds the context map sent alongside the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be serialized.
    pub fn context(&self) -> Result<BTreeMap<String, String>> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_REQUEST_KEY.to_string(), serde_json::to_string(&self.tag)?);
        if let Some(trace) = &self.trace_context {
            context.insert(CONTEXT_TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            context.insert(CONTEXT_PARENT_SPAN_KEY.to_string(), trace.parent_span_id.clone());
        }
        Ok(context)
    }
}

/// Recovers the request tag and trace context from a response context map.
///
/// # Parameters
///
/// * `context` - The map Zellij echoes back with `WebRequestResult`
///
/// # Returns
///
/// `None` when the map was not produced by [`ApiRequest::context`]. The trace
/// context is present only if both trace keys are.
#[must_use]
pub fn decode_context(
    context: &BTreeMap<String, String>,
) -> Option<(RequestTag, Option<TraceContext>)> {
    let tag = serde_json::from_str(context.get(CONTEXT_REQUEST_KEY)?).ok()?;
    let trace = match (
        context.get(CONTEXT_TRACE_ID_KEY),
        context.get(CONTEXT_PARENT_SPAN_KEY),
    ) {
        (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
            trace_id: trace_id.clone(),
            parent_span_id: parent_span_id.clone(),
        }),
        _ => None,
    };
    Some((tag, trace))
}
