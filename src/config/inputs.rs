use std::collections::HashMap;
use std::env;

use crate::utils::constants::{ENV_REGION, ENV_SECRET_NAME, ENV_SERVICE_ACCOUNT_ID, ENV_TENANT_ID};

/// Raw, unvalidated inputs of one issuance. Absent values are empty strings;
/// the pipeline turns them into validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuanceRequest {
    pub tenant_id: String,
    pub service_account_id: String,
    pub region: String,
    pub secret_name: String,
}

impl IssuanceRequest {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).unwrap_or_default();
        Self {
            tenant_id: read(ENV_TENANT_ID),
            service_account_id: read(ENV_SERVICE_ACCOUNT_ID),
            region: read(ENV_REGION),
            secret_name: read(ENV_SECRET_NAME),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

/// Where the boundary reads inputs from on each invocation.
#[derive(Debug, Clone)]
pub enum InputSource {
    Environment,
    Fixed(HashMap<String, String>),
}

impl InputSource {
    pub fn read(&self) -> IssuanceRequest {
        match self {
            InputSource::Environment => IssuanceRequest::from_env(),
            InputSource::Fixed(values) => IssuanceRequest::from_lookup(|key| values.get(key).cloned()),
        }
    }
}
