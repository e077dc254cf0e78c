//! Shared constants and invariants

// Per-invocation inputs, read from the environment
pub const ENV_TENANT_ID: &str = "TENANT_ID";
pub const ENV_SERVICE_ACCOUNT_ID: &str = "SERVICE_ACCOUNT_ID";
pub const ENV_REGION: &str = "REGION";
pub const ENV_SECRET_NAME: &str = "SECRET_NAME";

// Secrets extension backend
pub const ENV_AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const DEFAULT_SECRETS_EXTENSION_ENDPOINT: &str = "http://localhost:2773";
pub const DEFAULT_VERSION_STAGE: &str = "AWSCURRENT";
pub const SECRETS_EXTENSION_TOKEN_HEADER: &str = "X-Aws-Parameters-Secrets-Token";

// Invocation boundary
pub const DEFAULT_INVOCATION_PATH: &str = "/token";
pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const LAMBDA_REQUEST_ID_HEADER: &str = "lambda-runtime-aws-request-id";
pub const FAILURE_BODY: &str = "Error generating Access Token";
