//! Demo fleet seeding.
//!
//! With `SEED_DEMO_DATA=true` the server starts with the small Aurora MySQL
//! fleet the dashboard ships as sample data, so the API is explorable
//! without a discovery service or processor attached.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::json;

use fleetlog_core::registry::{Instance, LogTypeState, STATUS_AVAILABLE};
use fleetlog_core::types::{IssueKind, LogType, Severity};

use crate::state::AppState;

fn ts(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().expect("demo timestamps are valid RFC 3339")
}

fn log_state(enabled: bool, last_processed: Option<&str>, count: u64, size_bytes: u64) -> LogTypeState {
    LogTypeState {
        enabled,
        last_processed: last_processed.map(ts),
        count,
        size_bytes,
    }
}

fn demo_instance(
    id: &str,
    cluster_id: &str,
    az: &str,
    log_types: BTreeMap<LogType, LogTypeState>,
) -> Instance {
    Instance {
        id: id.to_string(),
        cluster_id: cluster_id.to_string(),
        instance_class: "db.r6g.2xlarge".to_string(),
        engine: "aurora-mysql".to_string(),
        region: "us-east-1".to_string(),
        az: az.to_string(),
        status: STATUS_AVAILABLE.to_string(),
        last_seen: Utc::now(),
        log_types,
    }
}

/// Populate all four aggregates with the demo fleet.
pub async fn seed_demo(state: &AppState) {
    // -- Instances --
    let mut registry = state.registry.write().await;
    let fleet = [
        demo_instance(
            "aurora-prod-mysql-1",
            "aurora-prod-cluster",
            "us-east-1a",
            BTreeMap::from([
                (
                    LogType::ErrorLogs,
                    log_state(true, Some("2025-01-06T10:30:00Z"), 156, 12_897_485),
                ),
                (
                    LogType::SlowQueryLogs,
                    log_state(true, Some("2025-01-06T10:28:00Z"), 342, 47_815_066),
                ),
                (LogType::GeneralLogs, LogTypeState::disabled()),
            ]),
        ),
        demo_instance(
            "aurora-prod-mysql-2",
            "aurora-prod-cluster",
            "us-east-1b",
            BTreeMap::from([
                (
                    LogType::ErrorLogs,
                    log_state(true, Some("2025-01-06T10:29:00Z"), 89, 9_122_611),
                ),
                (
                    LogType::SlowQueryLogs,
                    log_state(true, Some("2025-01-06T10:27:00Z"), 567, 71_094_108),
                ),
                (LogType::GeneralLogs, LogTypeState::disabled()),
            ]),
        ),
        demo_instance(
            "aurora-staging-mysql-1",
            "aurora-staging-cluster",
            "us-east-1a",
            LogType::ALL
                .into_iter()
                .map(|lt| (lt, LogTypeState::disabled()))
                .collect(),
        ),
    ];
    for instance in fleet {
        registry
            .register(instance)
            .expect("demo instances have unique ids");
    }
    drop(registry);

    // -- Issues --
    let mut ledger = state.ledger.write().await;
    let throttle = ledger
        .raise(
            Severity::Critical,
            IssueKind::ApiThrottle,
            "aurora-prod-mysql-15",
            "RDS API throttling detected - rate limit exceeded",
        )
        .id
        .clone();
    for _ in 0..4 {
        ledger
            .record_recurrence(&throttle)
            .expect("issue just raised");
    }
    let breaker = ledger
        .raise(
            Severity::Warning,
            IssueKind::CircuitBreaker,
            "aurora-prod-mysql-42",
            "Circuit breaker opened - too many failed attempts",
        )
        .id
        .clone();
    for _ in 0..2 {
        ledger
            .record_recurrence(&breaker)
            .expect("issue just raised");
    }
    let delay = ledger
        .raise(
            Severity::Info,
            IssueKind::ProcessingDelay,
            "aurora-prod-mysql-78",
            "Log processing delayed - large file size (>1GB)",
        )
        .id
        .clone();
    ledger.resolve(&delay).expect("issue just raised");
    drop(ledger);

    // -- Jobs --
    let mut jobs = state.jobs.write().await;
    let error_job = jobs
        .start("aurora-prod-mysql-1", LogType::ErrorLogs, 12)
        .id
        .clone();
    jobs.update_progress(&error_job, 8).expect("job just started");
    let slow_job = jobs
        .start("aurora-prod-mysql-2", LogType::SlowQueryLogs, 11)
        .id
        .clone();
    jobs.update_progress(&slow_job, 5).expect("job just started");
    drop(jobs);

    // -- Pipeline settings --
    let mut settings = state.settings.write().await;
    settings.merge(BTreeMap::from(
        [
            ("discovery.interval", json!(300)),
            ("discovery.batch_size", json!(10)),
            ("discovery.max_concurrent", json!(5)),
            ("discovery.rds_api_timeout", json!(30)),
            ("processor.batch_size", json!(100)),
            ("processor.compression_level", json!(6)),
            ("processor.max_retries", json!(3)),
            ("processor.retry_delay", json!(5)),
            ("kafka.topic", json!("aurora-logs")),
            ("kafka.partitions", json!(10)),
            ("kafka.replication_factor", json!(3)),
            ("kafka.retention_hours", json!(168)),
            ("sink.endpoint", json!("http://openobserve.internal:5080")),
            ("sink.batch_size", json!(1000)),
            ("sink.flush_interval", json!(10)),
            ("sink.max_retries", json!(3)),
        ]
        .map(|(k, v)| (k.to_string(), v)),
    ));
    drop(settings);

    tracing::info!("Demo fleet seeded (3 instances, 3 issues, 2 jobs)");
}
