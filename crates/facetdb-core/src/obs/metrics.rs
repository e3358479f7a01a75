use crate::obs::sink::{MetricsEvent, MutationKind};
use std::cell::RefCell;

thread_local! {
    static STATE: RefCell<MetricsReport> = RefCell::new(MetricsReport::default());
}

///
/// MetricsReport
///
/// Point-in-time snapshot of the thread-local counters. Counters are
/// cumulative since process start or the last [`metrics_reset`].
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MetricsReport {
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
    pub queries: u64,
}

pub(crate) fn global_record(event: MetricsEvent) {
    STATE.with_borrow_mut(|state| match event {
        MetricsEvent::MutationApplied { kind } => match kind {
            MutationKind::Insert => state.inserts += 1,
            MutationKind::Update => state.updates += 1,
            MutationKind::Remove => state.removes += 1,
        },
        MetricsEvent::QueryServed => state.queries += 1,
    });
}

/// Snapshot the current counters.
#[must_use]
pub fn metrics_report() -> MetricsReport {
    STATE.with_borrow(|state| *state)
}

/// Zero all counters.
pub fn metrics_reset() {
    STATE.with_borrow_mut(|state| *state = MetricsReport::default());
}

///
/// TESTS
///
