//! Pending scheduled ticks, ordered by due time and then by the order
//! they were scheduled in.
//!
//! A component that must not react inside the cascade that disturbed it
//! (a torch) asks for a tick instead. [`Circuit::tick`](crate::Circuit::tick)
//! drains every entry that has come due, each one starting a fresh
//! cascade. At most one tick per `(position, kind)` is pending at a time.

use std::collections::{BTreeMap, HashSet};

use chip_core::{ComponentKind, ComponentPos};

/// A tick waiting for its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ScheduledTick {
    /// Cell the tick runs at.
    pub pos: ComponentPos,
    /// Kind the cell must still hold for the tick to run.
    pub kind: ComponentKind,
}

/// Queue of scheduled ticks keyed by `(due, order)`.
#[derive(Clone, Debug, Default)]
pub(crate) struct TickScheduler {
    queue: BTreeMap<(u64, u64), ScheduledTick>,
    pending: HashSet<ScheduledTick>,
}

impl TickScheduler {
    /// Whether `tick` is already waiting.
    pub fn contains(&self, tick: ScheduledTick) -> bool {
        self.pending.contains(&tick)
    }

    /// Queue `tick` to run at `due`, after every entry with a smaller
    /// `(due, order)` key. Returns `false` if it is already pending.
    pub fn insert(&mut self, tick: ScheduledTick, due: u64, order: u64) -> bool {
        if !self.pending.insert(tick) {
            return false;
        }
        self.queue.insert((due, order), tick);
        true
    }

    /// Remove and return the earliest tick due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<ScheduledTick> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > now {
            return None;
        }
        let (_, tick) = self.queue.pop_first()?;
        self.pending.remove(&tick);
        Some(tick)
    }

    /// Number of ticks waiting.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drop every pending tick.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torch_at(x: i32, y: i32) -> ScheduledTick {
        ScheduledTick {
            pos: ComponentPos::new(x, y),
            kind: ComponentKind::Torch,
        }
    }

    #[test]
    fn ticks_come_due_in_time_then_order() {
        let mut scheduler = TickScheduler::default();
        assert!(scheduler.insert(torch_at(1, 1), 5, 2));
        assert!(scheduler.insert(torch_at(2, 2), 3, 7));
        assert!(scheduler.insert(torch_at(3, 3), 5, 1));

        assert_eq!(scheduler.pop_due(2), None);
        assert_eq!(scheduler.pop_due(4), Some(torch_at(2, 2)));
        assert_eq!(scheduler.pop_due(4), None);
        assert_eq!(scheduler.pop_due(9), Some(torch_at(3, 3)));
        assert_eq!(scheduler.pop_due(9), Some(torch_at(1, 1)));
        assert_eq!(scheduler.len(), 0);
    }

    #[test]
    fn duplicate_ticks_are_refused_until_popped() {
        let mut scheduler = TickScheduler::default();
        assert!(scheduler.insert(torch_at(4, 4), 2, 0));
        assert!(scheduler.contains(torch_at(4, 4)));
        assert!(!scheduler.insert(torch_at(4, 4), 8, 1));
        assert_eq!(scheduler.len(), 1);

        // Same cell, other kind.
        let lamp = ScheduledTick {
            kind: ComponentKind::Lamp,
            ..torch_at(4, 4)
        };
        assert!(scheduler.insert(lamp, 2, 2));

        assert_eq!(scheduler.pop_due(2), Some(torch_at(4, 4)));
        assert!(!scheduler.contains(torch_at(4, 4)));
        assert!(scheduler.insert(torch_at(4, 4), 3, 3));
    }

    #[test]
    fn clear_empties_queue_and_dedup_set() {
        let mut scheduler = TickScheduler::default();
        scheduler.insert(torch_at(0, 0), 1, 0);
        scheduler.clear();
        assert_eq!(scheduler.len(), 0);
        assert!(!scheduler.contains(torch_at(0, 0)));
        assert_eq!(scheduler.pop_due(u64::MAX), None);
    }
}
