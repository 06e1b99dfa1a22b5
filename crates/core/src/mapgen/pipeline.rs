//! Priority-ordered builder pipelines sharing one zone and one random stream.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use xxhash_rust::xxh3::Xxh3;

use crate::error::ZoneError;

use super::builder::{BuildContext, ZoneBuilder};
use super::seed::GENERATION_VERSION;

/// What a pipeline does when a builder reports failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing builder and fail the run.
    #[default]
    Abort,
    /// Record the failure and keep running; the run still succeeds.
    Continue,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub executed: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

pub struct Pipeline {
    name: String,
    builders: Vec<Box<dyn ZoneBuilder>>,
    failure_policy: FailurePolicy,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), builders: Vec::new(), failure_policy: FailurePolicy::default() }
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Adds a builder, keeping the list sorted ascending by priority (stable for ties).
    pub fn with(mut self, builder: impl ZoneBuilder + 'static) -> Self {
        self.push(Box::new(builder));
        self
    }

    pub fn push(&mut self, builder: Box<dyn ZoneBuilder>) {
        let slot = self.builders.partition_point(|existing| existing.priority() <= builder.priority());
        self.builders.insert(slot, builder);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// `(name, priority)` in execution order.
    pub fn shape(&self) -> Vec<(&'static str, i32)> {
        self.builders.iter().map(|builder| (builder.name(), builder.priority())).collect()
    }

    /// Digest of the generation version and the ordered builder list; mixed into zone seeds.
    /// Layout: version as u32 LE, then per builder its name, a zero byte and priority as i32 LE.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.update(&GENERATION_VERSION.to_le_bytes());
        for (name, priority) in self.shape() {
            hasher.update(name.as_bytes());
            hasher.update(&[0]);
            hasher.update(&priority.to_le_bytes());
        }
        hasher.digest()
    }

    pub fn generate(&mut self, context: &mut BuildContext<'_>) -> Result<PipelineReport, ZoneError> {
        let mut report = PipelineReport::default();
        for builder in &mut self.builders {
            debug!(
                zone = context.zone.id(),
                pipeline = %self.name,
                builder = builder.name(),
                priority = builder.priority(),
                "running builder"
            );
            report.executed.push(builder.name());
            if builder.build_zone(context) {
                continue;
            }
            warn!(zone = context.zone.id(), builder = builder.name(), "builder failed");
            match self.failure_policy {
                FailurePolicy::Abort => {
                    return Err(ZoneError::BuilderFailed {
                        builder: builder.name(),
                        zone: context.zone.id().to_string(),
                    });
                }
                FailurePolicy::Continue => report.failed.push(builder.name()),
            }
        }
        Ok(report)
    }
}
