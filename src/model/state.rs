use serde::{Deserialize, Serialize};

use super::params::Params;

/// Mutable simulation state, replaced wholesale by each step.
///
/// Faction counts are whole people. `s`, `c` and `repression` stay in
/// `[0, 1]`; `r` is unbounded and may go negative (state bankruptcy).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Monarchists.
    pub m: u64,
    /// Liberals.
    pub l: u64,
    /// Undecided.
    pub u: u64,
    /// State capacity.
    pub s: f64,
    /// Church influence.
    pub c: f64,
    /// Resources.
    pub r: f64,
    pub repression: f64,
}

impl State {
    /// Build the t=0 state from validated parameters.
    ///
    /// Undecided absorbs the rounding remainder so the counts sum to `pop`.
    pub fn initial(params: &Params) -> Self {
        let pop = params.pop;
        let m = ((pop as f64 * params.init_m).floor() as u64).min(pop);
        let l = ((pop as f64 * params.init_l).floor() as u64).min(pop - m);
        Self {
            m,
            l,
            u: pop - m - l,
            s: params.state_capacity,
            c: params.church_influence,
            r: pop as f64 * params.economic_prod_per_person,
            repression: params.repression_base,
        }
    }

    pub fn total(&self) -> u64 {
        self.m + self.l + self.u
    }

    /// Monarchist share of the population; 0 for an empty population.
    pub fn support_fraction(&self) -> f64 {
        fraction(self.m, self.total())
    }

    /// Liberal share of the population; 0 for an empty population.
    pub fn liberal_fraction(&self) -> f64 {
        fraction(self.l, self.total())
    }
}

pub(crate) fn fraction(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
