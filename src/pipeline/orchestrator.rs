use std::io::Write;

use anyhow::Context;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::inputs::{InputSource, IssuanceRequest};
use crate::identity::{AudienceRegistry, ServiceAccountId, TenantId, AUDIENCES};
use crate::keys;
use crate::observability::metrics::get_metrics;
use crate::pipeline::error::{AtStage, PipelineError, Stage};
use crate::secrets::FetchSecret;
use crate::token::{self, SignedToken};

/// Immutable issuance configuration: the secret store and the audience registry.
///
/// Built once at start-up and shared by every invocation.
#[derive(Debug, Clone)]
pub struct TokenPipeline<S> {
    store: S,
    audiences: &'static AudienceRegistry,
}

impl<S: FetchSecret> TokenPipeline<S> {
    pub fn new(store: S) -> Self {
        Self::with_registry(store, &AUDIENCES)
    }

    pub fn with_registry(store: S, audiences: &'static AudienceRegistry) -> Self {
        Self { store, audiences }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// validate tenant -> validate service account -> resolve audience -> acquire key -> sign.
    ///
    /// Stops at the first failure; nothing is signed unless every step succeeded.
    pub async fn run(&self, request: &IssuanceRequest) -> Result<SignedToken, PipelineError> {
        let metrics = get_metrics().await;
        let start = Instant::now();
        metrics.issuance_requests.inc();

        let result = self.run_stages(request).await;
        metrics
            .issuance_duration
            .observe(start.elapsed().as_secs_f64());

        if let Err(err) = &result {
            metrics
                .issuance_failures
                .with_label_values(&[err.stage.as_str(), err.kind()])
                .inc();
            warn!(
                stage = %err.stage,
                kind = err.kind(),
                category = err.source.category().as_str(),
                error = %err,
                "token issuance failed"
            );
        }
        result
    }

    /// One issuance from `inputs`, token written to `out` on its own line.
    ///
    /// Any failure is returned so the process exits non-zero; nothing is written then.
    pub async fn run_once<W: Write>(&self, inputs: &InputSource, out: &mut W) -> anyhow::Result<()> {
        let token = self.run(&inputs.read()).await?;
        writeln!(out, "{}", token.as_str()).context("writing token")?;
        Ok(())
    }

    async fn run_stages(&self, request: &IssuanceRequest) -> Result<SignedToken, PipelineError> {
        let tenant_id = TenantId::parse(&request.tenant_id).at(Stage::ValidateTenant)?;
        let service_account_id =
            ServiceAccountId::parse(&request.service_account_id).at(Stage::ValidateServiceAccount)?;
        let audience = self
            .audiences
            .resolve(&request.region)
            .at(Stage::ResolveAudience)?;

        let key = keys::acquire(&self.store, &request.secret_name)
            .await
            .at(Stage::AcquireKey)?;

        let signed = token::issue(&tenant_id, &service_account_id, &audience, &key)
            .at(Stage::IssueToken)?;
        info!(
            tenant = %tenant_id,
            service_account = %service_account_id,
            audience = %audience,
            "token issued"
        );
        Ok(signed)
    }
}
