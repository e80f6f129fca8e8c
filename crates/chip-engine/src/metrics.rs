//! Cumulative cascade counters.
//!
//! [`CascadeMetrics`] counts what the state-change path did since the
//! circuit was built or since the last
//! [`reset_metrics()`](crate::Circuit::reset_metrics).

/// Counters updated by every write a circuit performs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadeMetrics {
    /// Writes that changed a cell.
    pub writes_applied: u64,
    /// Writes skipped because the new state equalled the old one.
    pub noop_writes: u64,
    /// Writes addressed to a position that cannot hold a component.
    pub invalid_position_writes: u64,
    /// Host listener callbacks issued.
    pub listener_notifications: u64,
    /// Individual neighbour power reactions run.
    pub neighbor_updates: u64,
    /// Shape-update writes issued by neighbour replacement.
    pub shape_updates: u64,
    /// Writes or notifications refused because the budget ran out.
    pub depth_exhausted: u64,
    /// Scheduled ticks run by [`tick()`](crate::Circuit::tick).
    pub scheduled_ticks: u64,
}
