use std::fmt;

use stamp_model::{InvocationId, Labels, TaskDescriptor};
use tracing::trace;

use crate::{
    context::ContextStore,
    labels::{LabelExtractor, LabelPolicy, LabelSanitizer, PolicyError, merge_with_invocation},
    metrics::{MetricsHandle, noop_metrics},
};

/// Extract → merge → sanitize, bound to one invocation and one policy.
#[derive(Clone)]
pub struct LabelPipeline {
    policy: LabelPolicy,
    invocation: InvocationId,
    extractor: LabelExtractor,
    sanitizer: LabelSanitizer,
    metrics: MetricsHandle,
}

impl LabelPipeline {
    /// Create a pipeline after validating `policy`.
    pub fn new(
        policy: LabelPolicy,
        invocation: InvocationId,
        metrics: MetricsHandle,
    ) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self {
            sanitizer: LabelSanitizer::new(&policy),
            extractor: LabelExtractor::new(metrics.clone()),
            policy,
            invocation,
            metrics,
        })
    }

    /// Pipeline with the default policy and no metrics.
    pub fn with_invocation(invocation: InvocationId) -> Self {
        let policy = LabelPolicy::default();
        Self {
            sanitizer: LabelSanitizer::new(&policy),
            extractor: LabelExtractor::default(),
            policy,
            invocation,
            metrics: noop_metrics(),
        }
    }

    pub fn invocation(&self) -> &InvocationId {
        &self.invocation
    }

    /// Final sanitized labels for `descriptor` and the caller tier.
    ///
    /// Without a descriptor both the declared and the caller tier are empty,
    /// so only the invocation label remains.
    pub fn resolve(&self, descriptor: Option<&TaskDescriptor>, caller: &Labels) -> Labels {
        let unscoped = Labels::new();
        let (declared, caller) = match descriptor {
            Some(d) => (self.extractor.extract(d), caller),
            None => (Labels::new(), &unscoped),
        };

        let merged = merge_with_invocation(
            &declared,
            caller,
            &self.policy.invocation_key,
            &self.invocation,
        );
        let (sanitized, report) = self.sanitizer.sanitize_with_report(&merged);
        report.record(self.metrics.as_ref());

        trace!(
            task = descriptor.map(|d| d.name()).unwrap_or("<none>"),
            declared = declared.len(),
            caller = caller.len(),
            resolved = sanitized.len(),
            "labels resolved",
        );
        sanitized.to_labels()
    }

    /// [`LabelPipeline::resolve`] for the descriptor of the calling execution unit.
    pub fn resolve_current(&self, caller: &Labels) -> Labels {
        let current = ContextStore::current();
        self.resolve(current.as_deref(), caller)
    }
}

impl fmt::Debug for LabelPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelPipeline")
            .field("policy", &self.policy)
            .field("invocation", &self.invocation)
            .finish()
    }
}
