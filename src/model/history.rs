use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::state::State;
use super::timestamp::SimMonth;

/// Snapshot of the state after one completed timestep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub t: u32,
    pub m: u64,
    pub l: u64,
    pub u: u64,
    pub s: f64,
    pub c: f64,
    pub r: f64,
    pub repression: f64,
    /// Derived each step, never stored on [`State`].
    pub legitimacy: f64,
    pub shock_occurred: bool,
}

impl HistoryRecord {
    pub fn new(t: u32, state: &State, legitimacy: f64, shock_occurred: bool) -> Self {
        Self {
            t,
            m: state.m,
            l: state.l,
            u: state.u,
            s: state.s,
            c: state.c,
            r: state.r,
            repression: state.repression,
            legitimacy,
            shock_occurred,
        }
    }

    pub fn total(&self) -> u64 {
        self.m + self.l + self.u
    }

    pub fn month(&self) -> SimMonth {
        SimMonth::from_step(self.t)
    }
}

/// Ordered, append-only sequence of records, one per timestep.
///
/// A history from a full run is indexed by `t`; one finished from a
/// partially consumed [`Simulator`](crate::sim::Simulator) starts at the
/// first step it ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, record: HistoryRecord) {
        debug_assert!(
            self.records.last().is_none_or(|last| record.t == last.t + 1),
            "history records must be appended in timestep order"
        );
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, t: usize) -> Option<&HistoryRecord> {
        self.records.get(t)
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Number of timesteps in which a shock fired.
    pub fn shock_count(&self) -> usize {
        self.records.iter().filter(|r| r.shock_occurred).count()
    }
}

impl Index<usize> for History {
    type Output = HistoryRecord;

    fn index(&self, t: usize) -> &HistoryRecord {
        &self.records[t]
    }
}

/// Collects records as given; filtered or reordered selections are allowed,
/// so positions need not match `t`.
impl FromIterator<HistoryRecord> for History {
    fn from_iter<I: IntoIterator<Item = HistoryRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for History {
    type Item = HistoryRecord;
    type IntoIter = std::vec::IntoIter<HistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryRecord;
    type IntoIter = std::slice::Iter<'a, HistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
