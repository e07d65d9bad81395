use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use serde_json::json;
use tracing::{info, warn};

use stamp_core::{
    BuildContext, LabelPipeline, LabelPolicy, LabelingAdapter, RecordingClient, RunnerRouter,
    SupervisorApi, TaskPolicy,
};
use stamp_exec::{RUNNER_TYPE_STATEMENT, statement::register_statement_runner};
use stamp_model::{ConfigBag, InvocationId, TaskDescriptor};
use stamp_observe::{LoggerConfig, LoggerLevel, TaskEventLogger, init_logger};
use stamp_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
use taskvisor::{Config as SupervisorConfig, ControllerConfig, Subscribe};

const DEFAULT_ANNOTATION: &str = r#"{"team": "override", "cost_center": "cc1"}"#;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) logger
    let cfg = LoggerConfig {
        level: LoggerLevel::new(env::var("STAMP_LOG").unwrap_or_else(|_| "info".into()))?,
        ..Default::default()
    };
    init_logger(&cfg)?;

    // 2) metrics + label pipeline
    let metrics = Arc::new(PrometheusMetrics::new()?);
    let invocation = match env::var("STAMP_INVOCATION_ID") {
        Ok(raw) => raw.parse::<InvocationId>()?,
        Err(_) => InvocationId::generate(),
    };
    info!(invocation = %invocation, "session started");

    let pipeline = LabelPipeline::new(LabelPolicy::default(), invocation, metrics.clone())?;
    let client = Arc::new(RecordingClient::new());
    let adapter = LabelingAdapter::new(client.clone(), pipeline).with_metrics(metrics.clone());

    // 3) router + runners
    let annotation = env::var("STAMP_QUERY_ANNOTATION").unwrap_or_else(|_| DEFAULT_ANNOTATION.into());
    let ctx = BuildContext::default()
        .with_annotation(&annotation)
        .with_metrics(metrics.clone());
    let mut router = RunnerRouter::new().with_context(ctx);
    register_statement_runner(&mut router, RUNNER_TYPE_STATEMENT, adapter)?;

    // 4) supervisor
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(TaskEventLogger)];
    let api = SupervisorApi::new(
        SupervisorConfig::default(),
        ControllerConfig::default(),
        subscribers,
        router,
    )
    .await?;

    // 5) demo tasks
    let descriptors = [
        json!({"compiled_code": "select * from orders", "labels": {"team": "analytics"}}),
        json!({"compiled_code": "select * from users", "labels": {"Team Name": "Data/Eng"}}),
        json!({"compiled_code": "select * from events", "labels": "not-a-map"}),
        json!({"compiled_code": "select 1"}),
    ];
    let names = ["model.orders", "model.users", "model.events", "model.ping"];

    let policy = TaskPolicy::once(5_000);
    for (name, cfg) in names.iter().zip(descriptors) {
        let bag: ConfigBag = serde_json::from_value(cfg).context("demo descriptor")?;
        api.submit(Arc::new(TaskDescriptor::new(*name, bag)), &policy)
            .await?;
    }

    // 6) wait for submissions
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while client.requests().len() < names.len() {
        if tokio::time::Instant::now() >= deadline {
            warn!(
                seen = client.requests().len(),
                expected = names.len(),
                "timed out waiting for submissions"
            );
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    for request in client.requests() {
        info!(
            payload = %request.payload,
            labels = ?request.labels().unwrap_or_default(),
            "captured request",
        );
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metrics.gather(), &mut buffer)?;
    info!(bytes = buffer.len(), "prometheus exposition rendered");
    Ok(())
}
