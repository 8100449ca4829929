use crate::workflow::config::RunConfig;
use cdmcore::decode::{decode, DecodeOutcome, DecodePolicy};
use cdmcore::query::QueryBuilder;
use cdmcore::telemetry::{LogManager, MetricsSnapshot, RunMetrics};
use cdmcore::{AlertResult, CdmSource};
use chrono::{DateTime, Utc};

pub struct RunResult {
    pub outcome: DecodeOutcome,
    pub metrics: MetricsSnapshot,
}

/// Drives one query cycle: build, fetch once, decode.
pub struct Runner {
    queries: QueryBuilder,
    policy: DecodePolicy,
    logger: LogManager,
}

impl Runner {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            queries: config.query_builder(),
            policy: config.decode_policy(),
            logger: LogManager::new("run"),
        }
    }

    pub fn queries(&self) -> &QueryBuilder {
        &self.queries
    }

    pub fn execute<S: CdmSource>(&self, source: &S, now: DateTime<Utc>) -> AlertResult<RunResult> {
        let metrics = RunMetrics::new();
        let query = self.queries.cdm_after(now);

        let payload = source.fetch(&query)?;
        metrics.record_fetched(payload.len());

        let outcome = decode(&payload, self.policy)?;
        metrics.record_decoded(
            outcome.received,
            outcome.records.len(),
            outcome.rejected.len(),
        );

        let snapshot = metrics.snapshot();
        self.logger.detail(&format!("{:?}", snapshot));
        Ok(RunResult {
            outcome,
            metrics: snapshot,
        })
    }
}
