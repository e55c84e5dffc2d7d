use std::sync::Arc;

use lambda_http::lambda_runtime::{self, service_fn, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use sso_directory::client::build_client;
use sso_directory::{AwsIdentityStore, DirectoryGateway};
use sso_lambda::{HandlerConfig, UserReconciler};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = HandlerConfig::from_env()?;
    tracing::info!(
        region = %config.region,
        allow_import_existing_user = config.allow_import_existing_user,
        "starting SSO user handler"
    );

    let client = build_client(&config.region).await;
    let reconciler = Arc::new(UserReconciler::new(
        DirectoryGateway::new(AwsIdentityStore::new(client)),
        config,
    ));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let reconciler = Arc::clone(&reconciler);
        async move {
            reconciler
                .handle(event.payload)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}
