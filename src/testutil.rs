use rand::RngCore;

use crate::model::{History, Params, State};
use crate::sim::{Simulator, StepOutcome, transition};

// ---------------------------------------------------------------------------
// Parameter helpers
// ---------------------------------------------------------------------------

/// Default parameters with shocks disabled, so runs are deterministic
/// regardless of seed.
pub fn quiet_params(timesteps: u32) -> Params {
    Params {
        timesteps,
        shock_prob: 0.0,
        ..Params::default()
    }
}

/// Run `params` from its initial state for one step with the shock forced.
pub fn first_step(params: &Params, shock_fires: bool) -> (State, StepOutcome) {
    let initial = State::initial(params);
    let outcome = transition(&initial, params, shock_fires);
    (initial, outcome)
}

// ---------------------------------------------------------------------------
// Scripted randomness
// ---------------------------------------------------------------------------

/// RNG whose uniform draws follow a script: `true` yields a draw of 0.0
/// (any positive shock probability fires), `false` yields the largest draw
/// below 1.0 (nothing short of certainty fires). Repeats the last entry once
/// the script runs out.
pub struct ScriptedRng {
    script: Vec<bool>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(script: Vec<bool>) -> Self {
        assert!(!script.is_empty(), "script must not be empty");
        Self { script, pos: 0 }
    }

    fn next_fires(&mut self) -> bool {
        let idx = self.pos.min(self.script.len() - 1);
        self.pos += 1;
        self.script[idx]
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.next_fires() { 0 } else { u32::MAX }
    }

    fn next_u64(&mut self) -> u64 {
        if self.next_fires() { 0 } else { u64::MAX }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let byte = if self.next_fires() { 0 } else { u8::MAX };
        dst.fill(byte);
    }
}

/// Simulator whose shock draws follow `script`.
pub fn scripted_simulator(params: Params, script: Vec<bool>) -> Simulator<ScriptedRng> {
    Simulator::with_rng(params, ScriptedRng::new(script)).expect("valid test params")
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

/// Assert conservation and boundedness on every record.
pub fn assert_invariants(history: &History, pop: u64) {
    for r in history {
        assert_eq!(r.total(), pop, "population not conserved at t={}", r.t);
        assert!((0.0..=1.0).contains(&r.s), "S out of range at t={}: {}", r.t, r.s);
        assert!((0.0..=1.0).contains(&r.c), "C out of range at t={}: {}", r.t, r.c);
        assert!(
            (0.0..=1.0).contains(&r.repression),
            "repression out of range at t={}: {}",
            r.t,
            r.repression
        );
        assert!(
            (-1.0..=1.0).contains(&r.legitimacy),
            "legitimacy out of range at t={}: {}",
            r.t,
            r.legitimacy
        );
    }
}
