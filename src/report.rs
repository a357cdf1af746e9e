//! Read-only views over a finished [`History`] for console output and
//! charting consumers.

use std::fmt;

use serde::Serialize;

use crate::model::{History, HistoryRecord, SimMonth};

/// Final-state summary of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub timesteps: usize,
    pub final_month: SimMonth,
    pub m: u64,
    pub l: u64,
    pub u: u64,
    pub s: f64,
    pub c: f64,
    pub r: f64,
    pub repression: f64,
    pub legitimacy: f64,
    pub shocks: usize,
}

impl Summary {
    /// `None` for an empty history.
    pub fn from_history(history: &History) -> Option<Self> {
        let last = history.last()?;
        Some(Self {
            timesteps: history.len(),
            final_month: last.month(),
            m: last.m,
            l: last.l,
            u: last.u,
            s: last.s,
            c: last.c,
            r: last.r,
            repression: last.repression,
            legitimacy: last.legitimacy,
            shocks: history.shock_count(),
        })
    }

    pub fn fractions(&self) -> Fractions {
        Fractions::of(self.m, self.l, self.u)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Final state after {} timesteps ({}):",
            self.timesteps, self.final_month
        )?;
        writeln!(
            f,
            "Monarchists: {}  Liberals: {}  Undecided: {}",
            self.m, self.l, self.u
        )?;
        writeln!(
            f,
            "State capacity (S): {:.3}  Church influence (C): {:.3}",
            self.s, self.c
        )?;
        writeln!(
            f,
            "Resources: {:.1}  Repression: {:.3}  Legitimacy: {:.3}",
            self.r, self.repression, self.legitimacy
        )?;
        write!(f, "Shocks: {}", self.shocks)
    }
}

/// Faction shares of the population at one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fractions {
    pub monarchist: f64,
    pub liberal: f64,
    pub undecided: f64,
}

impl Fractions {
    fn of(m: u64, l: u64, u: u64) -> Self {
        let total = (m + l + u) as f64;
        if total == 0.0 {
            return Self {
                monarchist: 0.0,
                liberal: 0.0,
                undecided: 0.0,
            };
        }
        Self {
            monarchist: m as f64 / total,
            liberal: l as f64 / total,
            undecided: u as f64 / total,
        }
    }
}

/// Per-step faction shares, the series plotted as population fractions.
pub fn fractions(history: &History) -> Vec<Fractions> {
    history
        .iter()
        .map(|r| Fractions::of(r.m, r.l, r.u))
        .collect()
}

/// The last `n` records (fewer if the history is shorter).
pub fn tail(history: &History, n: usize) -> &[HistoryRecord] {
    let records = history.records();
    &records[records.len().saturating_sub(n)..]
}

/// Render records as a fixed-width table.
pub fn format_table(records: &[HistoryRecord]) -> String {
    let mut out = format!(
        "{:>5} {:>7} {:>7} {:>7} {:>6} {:>6} {:>12} {:>10} {:>10}\n",
        "t", "M", "L", "U", "S", "C", "R", "repression", "legitimacy"
    );
    for r in records {
        out.push_str(&format!(
            "{:>5} {:>7} {:>7} {:>7} {:>6.3} {:>6.3} {:>12.1} {:>10.3} {:>10.3}\n",
            r.t, r.m, r.l, r.u, r.s, r.c, r.r, r.repression, r.legitimacy
        ));
    }
    out
}
