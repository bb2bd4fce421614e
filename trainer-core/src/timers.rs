//! Deadline slots for the keyer state machines.
//!
//! The keyers only ever need four well-known pending timeouts, so this is
//! a fixed set of named slots rather than a generic timer map. Setting a
//! slot replaces any pending deadline in it (at most one live timer per
//! slot). Nothing fires on its own: the owning trainer polls with
//! `tick(now)` and reacts to the due slots, which keeps every state
//! machine deterministic under test.

use crate::clock::Instant;

/// The pending-timeout slots the trainers use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Silence long enough to finish a character
    CharGap,
    /// Silence long enough to finish a word
    WordGap,
    /// Squeeze probe shortly before an element ends
    IambicCheck,
    /// End of the current element plus its trailing gap
    ElementEnd,
}

impl TimerSlot {
    const ALL: [TimerSlot; 4] = [
        TimerSlot::CharGap,
        TimerSlot::WordGap,
        TimerSlot::IambicCheck,
        TimerSlot::ElementEnd,
    ];

    const fn index(&self) -> usize {
        match self {
            TimerSlot::CharGap => 0,
            TimerSlot::WordGap => 1,
            TimerSlot::IambicCheck => 2,
            TimerSlot::ElementEnd => 3,
        }
    }
}

/// Fixed set of independently cancellable deadlines.
#[derive(Clone, Debug, Default)]
pub struct TimerSet {
    deadlines: [Option<Instant>; 4],
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `slot` to fire at `deadline`, cancelling any pending deadline
    /// already in that slot.
    pub fn set(&mut self, slot: TimerSlot, deadline: Instant) {
        self.deadlines[slot.index()] = Some(deadline);
    }

    /// Cancel `slot`. Returns whether a deadline was pending.
    pub fn clear(&mut self, slot: TimerSlot) -> bool {
        self.deadlines[slot.index()].take().is_some()
    }

    /// Cancel every slot.
    pub fn clear_all(&mut self) {
        self.deadlines = [None; 4];
    }

    pub fn has(&self, slot: TimerSlot) -> bool {
        self.deadlines[slot.index()].is_some()
    }

    /// Number of armed slots. Never exceeds the number of distinct slots.
    pub fn count(&self) -> usize {
        self.deadlines.iter().filter(|d| d.is_some()).count()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().flatten().min().copied()
    }

    /// Take every slot due at `now`, in deadline order.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerSlot> {
        let mut due: Vec<(Instant, TimerSlot)> = Vec::new();
        for slot in TimerSlot::ALL {
            if let Some(deadline) = self.deadlines[slot.index()] {
                if deadline <= now {
                    self.deadlines[slot.index()] = None;
                    due.push((deadline, slot));
                }
            }
        }
        due.sort_by_key(|(deadline, slot)| (*deadline, slot.index()));
        due.into_iter().map(|(_, slot)| slot).collect()
    }
}
