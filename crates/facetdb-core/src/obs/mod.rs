//! Observability: runtime counters and the sink abstraction.
//!
//! Engine logic never touches the counter state directly. All
//! instrumentation flows through [`MetricsEvent`] and [`MetricsSink`];
//! this module is the only bridge between the collection façade and the
//! process-local metrics state.

pub(crate) mod sink;

mod metrics;

pub use metrics::{metrics_report, metrics_reset, MetricsReport};
pub use sink::{MetricsEvent, MetricsSink, MutationKind};
