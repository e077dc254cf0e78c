use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{info, info_span, warn, Instrument};

use crate::config::inputs::InputSource;
use crate::config::settings::InvocationConfig;
use crate::observability::metrics::get_metrics;
use crate::pipeline::TokenPipeline;
use crate::secrets::SecretStoreKind;
use crate::server::server::AppState;
use crate::token::SignedToken;
use crate::utils::constants::{FAILURE_BODY, LAMBDA_REQUEST_ID_HEADER, REQUEST_ID_HEADER};

static UNKNOWN_REQUEST_ID: &str = "-";
static TEXT_PLAIN: &str = "text/plain; charset=utf-8";
static INVOCATION_STAGE: &str = "invocation";
static DEADLINE_EXCEEDED: &str = "deadline_exceeded";

#[derive(Clone)]
pub struct IssuerState {
    pipeline: Arc<TokenPipeline<SecretStoreKind>>,
    inputs: InputSource,
    timeout: Option<Duration>,
}

impl IssuerState {
    pub fn new(
        pipeline: TokenPipeline<SecretStoreKind>,
        inputs: InputSource,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            inputs,
            timeout,
        }
    }

    pub fn from_config(
        pipeline: TokenPipeline<SecretStoreKind>,
        inputs: InputSource,
        invocation: &InvocationConfig,
    ) -> Self {
        Self::new(
            pipeline,
            inputs,
            invocation.timeout_ms.map(Duration::from_millis),
        )
    }

    pub fn router(&self, invocation: &InvocationConfig) -> Router<AppState> {
        info!("served path: {}", &invocation.path);
        Router::new().route(&invocation.path, get(handle_invocation).post(handle_invocation))
    }
}

/// Ambient data of one inbound invocation. Only ever logged.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
    pub deadline: Option<Duration>,
}

impl InvocationContext {
    pub fn from_headers(headers: &HeaderMap, deadline: Option<Duration>) -> Self {
        let request_id = [REQUEST_ID_HEADER, LAMBDA_REQUEST_ID_HEADER]
            .iter()
            .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
            .unwrap_or(UNKNOWN_REQUEST_ID)
            .to_string();
        Self {
            request_id,
            deadline,
        }
    }
}

/// Response envelope: the compact token, or one fixed failure message for every failure.
#[derive(Debug)]
pub enum InvocationResponse {
    Issued(SignedToken),
    Failed,
}

impl InvocationResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            InvocationResponse::Issued(_) => StatusCode::OK,
            InvocationResponse::Failed => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for InvocationResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            InvocationResponse::Issued(token) => token.into_string(),
            InvocationResponse::Failed => FAILURE_BODY.to_string(),
        };
        (status, [(CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
    }
}

/// Reads inputs, runs the pipeline under the configured deadline, builds the envelope.
pub async fn invoke(state: &IssuerState, ctx: &InvocationContext) -> InvocationResponse {
    let request = state.inputs.read();
    let span = info_span!("invocation", request_id = %ctx.request_id);

    async {
        info!(
            tenant = %request.tenant_id,
            service_account = %request.service_account_id,
            region = %request.region,
            secret_name = %request.secret_name,
            deadline_ms = ctx.deadline.map(|d| d.as_millis() as u64),
            "invocation received"
        );

        let outcome = match ctx.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, state.pipeline.run(&request)).await {
                Ok(result) => result,
                Err(_) => {
                    // the dropped pipeline recorded its request but no outcome
                    let metrics = get_metrics().await;
                    metrics
                        .issuance_failures
                        .with_label_values(&[INVOCATION_STAGE, DEADLINE_EXCEEDED])
                        .inc();
                    metrics.issuance_duration.observe(deadline.as_secs_f64());
                    warn!(
                        stage = INVOCATION_STAGE,
                        kind = DEADLINE_EXCEEDED,
                        deadline_ms = deadline.as_millis() as u64,
                        "invocation deadline exceeded"
                    );
                    return InvocationResponse::Failed;
                }
            },
            None => state.pipeline.run(&request).await,
        };

        match outcome {
            Ok(token) => InvocationResponse::Issued(token),
            // already logged with stage and kind by the pipeline
            Err(_) => InvocationResponse::Failed,
        }
    }
    .instrument(span)
    .await
}

async fn handle_invocation(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let issuer = &state.issuer_state;
    let ctx = InvocationContext::from_headers(&headers, issuer.timeout);
    invoke(issuer, &ctx).await.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn request_id_prefers_x_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert(LAMBDA_REQUEST_ID_HEADER, HeaderValue::from_static("lambda-1"));
        assert_eq!(InvocationContext::from_headers(&headers, None).request_id, "lambda-1");

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-1"));
        assert_eq!(InvocationContext::from_headers(&headers, None).request_id, "req-1");

        assert_eq!(
            InvocationContext::from_headers(&HeaderMap::new(), None).request_id,
            UNKNOWN_REQUEST_ID
        );
    }

    #[test]
    fn failure_envelope_is_fixed() {
        let response = InvocationResponse::Failed;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
