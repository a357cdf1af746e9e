use std::iter::FusedIterator;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use super::step::{StepEvents, step};
use crate::model::{ConfigError, History, HistoryRecord, Params, State};

/// Drives the step function over the configured horizon.
///
/// Owns the state, the parameters and the RNG. Iterating a `Simulator`
/// yields one [`HistoryRecord`] per timestep lazily, so a consumer that only
/// wants a prefix can stop early; a fresh `Simulator` with the same seed
/// restarts the identical sequence.
pub struct Simulator<R = SmallRng> {
    params: Params,
    state: State,
    rng: R,
    t: u32,
    bankrupt: bool,
}

impl Simulator<SmallRng> {
    /// Validate `params` and seed a deterministic RNG from `seed`.
    pub fn new(params: Params, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(params, SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Simulator<R> {
    /// Validate `params` and take ownership of a caller-supplied RNG.
    pub fn with_rng(params: Params, rng: R) -> Result<Self, ConfigError> {
        params.validate()?;
        let state = State::initial(&params);
        Ok(Self {
            bankrupt: state.r < 0.0,
            params,
            state,
            rng,
            t: 0,
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// State after the most recent step (the initial state before any).
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Index of the next timestep to run.
    pub fn timestep(&self) -> u32 {
        self.t
    }

    pub fn remaining(&self) -> u32 {
        self.params.timesteps - self.t
    }

    pub fn is_finished(&self) -> bool {
        self.t >= self.params.timesteps
    }

    /// Run one timestep, returning its record and the intermediate
    /// quantities. `None` once the horizon is reached.
    pub fn advance(&mut self) -> Option<(HistoryRecord, StepEvents)> {
        if self.is_finished() {
            return None;
        }

        let outcome = step(&self.state, &self.params, &mut self.rng);
        let record = HistoryRecord::new(
            self.t,
            &outcome.state,
            outcome.events.legitimacy,
            outcome.events.shock_occurred,
        );

        debug!(
            t = record.t,
            m = record.m,
            l = record.l,
            u = record.u,
            r = record.r,
            repression = record.repression,
            legitimacy = record.legitimacy,
            shock = record.shock_occurred,
            "step"
        );
        if outcome.events.renormalization.is_fallback() {
            warn!(t = self.t, "population collapsed, reset to fallback distribution");
        }
        if outcome.state.r < 0.0 && !self.bankrupt {
            warn!(t = self.t, r = outcome.state.r, "resources went negative");
        }
        self.bankrupt = outcome.state.r < 0.0;

        self.state = outcome.state;
        self.t += 1;
        Some((record, outcome.events))
    }

    /// Consume the remaining timesteps into a [`History`].
    pub fn finish(self) -> History {
        let mut history = History::with_capacity(self.remaining() as usize);
        for record in self {
            history.push(record);
        }
        history
    }
}

impl<R: RngCore> Iterator for Simulator<R> {
    type Item = HistoryRecord;

    fn next(&mut self) -> Option<HistoryRecord> {
        self.advance().map(|(record, _)| record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl<R: RngCore> ExactSizeIterator for Simulator<R> {}

impl<R: RngCore> FusedIterator for Simulator<R> {}

/// Run a full simulation with a deterministic RNG seeded from `seed`.
///
/// Fails before any step if `params` is invalid. A zero horizon yields an
/// empty history.
pub fn run(params: Params, seed: u64) -> Result<History, ConfigError> {
    let sim = Simulator::new(params, seed)?;
    info!(
        timesteps = sim.params().timesteps,
        pop = sim.params().pop,
        seed,
        "simulation starting"
    );
    let history = sim.finish();
    if let Some(last) = history.last() {
        info!(
            m = last.m,
            l = last.l,
            u = last.u,
            r = last.r,
            legitimacy = last.legitimacy,
            shocks = history.shock_count(),
            "simulation complete"
        );
    }
    Ok(history)
}
