use crate::obs::metrics;

///
/// MutationKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MutationKind {
    Insert,
    Update,
    Remove,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    MutationApplied { kind: MutationKind },
    QueryServed,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Process-local sink writing into thread-local counter state. The
/// concrete sink behind every event the façade emits.
///

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::global_record(event);
    }
}

/// Record one event against the global sink.
pub(crate) fn record(event: MetricsEvent) {
    GlobalMetricsSink.record(event);
}
