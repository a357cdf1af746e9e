//! One monthly transition of the compartmental model.
//!
//! Sub-steps run in a fixed order and each reads the output of the previous
//! one, so the order decides which period's population and resource stock a
//! given quantity is computed from:
//!
//! 1. production, sanction drain, shock
//! 2. military upkeep and repression cost
//! 3. births and deaths (only used by renormalization)
//! 4. conversion flows between factions
//! 5. legitimacy
//! 6. state capacity
//! 7. church influence
//! 8. repression policy
//! 9. renormalization back to the fixed population

use rand::{Rng, RngCore};
use serde::Serialize;

use crate::model::state::fraction;
use crate::model::{Params, State};

/// Liberal share above which the regime escalates repression.
pub const LIBERAL_THRESHOLD: f64 = 0.45;
pub const REPRESSION_STEP_UP: f64 = 0.05;
pub const REPRESSION_STEP_DOWN: f64 = 0.02;

pub const FALLBACK_MONARCHIST_SHARE: f64 = 0.1;
pub const FALLBACK_LIBERAL_SHARE: f64 = 0.8;

const PRODUCTION_BASE: f64 = 0.8;
const PRODUCTION_CAPACITY_BONUS: f64 = 0.4;
const SANCTION_DRAIN_RATE: f64 = 0.1;
const REPRESSION_UPKEEP_RATE: f64 = 0.05;
const SANCTION_LEGITIMACY_COST: f64 = 0.2;
const CAPACITY_GROWTH_RATE: f64 = 0.01;
const CAPACITY_LEGITIMACY_OFFSET: f64 = 0.2;
const CAPACITY_DECAY_RATE: f64 = 0.005;
const CHURCH_GROWTH_RATE: f64 = 0.005;
const CHURCH_REPRESSION_DRAIN: f64 = 0.01;

/// Direction the repression controller moved this step.
///
/// The controller has no memory beyond the repression level itself: each
/// step is decided purely by the current liberal share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepressionPolicy {
    Repressing,
    Relaxing,
}

impl RepressionPolicy {
    pub fn for_liberal_fraction(liberal_fraction: f64) -> Self {
        if liberal_fraction > LIBERAL_THRESHOLD {
            RepressionPolicy::Repressing
        } else {
            RepressionPolicy::Relaxing
        }
    }

    /// Escalation is faster than relaxation.
    pub fn apply(self, repression: f64) -> f64 {
        match self {
            RepressionPolicy::Repressing => (repression + REPRESSION_STEP_UP).min(1.0),
            RepressionPolicy::Relaxing => (repression - REPRESSION_STEP_DOWN).max(0.0),
        }
    }
}

/// People moved between factions in one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionFlows {
    /// Undecided -> monarchist via state propaganda.
    pub propaganda: u64,
    /// Undecided -> monarchist via church mission.
    pub church: u64,
    /// Liberal -> undecided as a reaction to repression.
    pub backlash: u64,
    /// Undecided -> liberal driven by economic hardship.
    pub economic_push: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Renormalization {
    /// Counts were rescaled so they sum to the fixed population.
    Rescaled { total_pop: i128 },
    /// The population collapsed; counts were reset to the fixed fallback split.
    Fallback { total_pop: i128 },
}

impl Renormalization {
    pub fn is_fallback(self) -> bool {
        matches!(self, Renormalization::Fallback { .. })
    }
}

/// Intermediate quantities of one step, for diagnostics and history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepEvents {
    pub production: f64,
    pub sanction_drain: f64,
    pub shock_occurred: bool,
    pub shock_loss: f64,
    pub maintenance: f64,
    pub repression_cost: f64,
    pub births: u64,
    pub deaths: u64,
    pub flows: ConversionFlows,
    /// Monarchist share after conversions.
    pub support_fraction: f64,
    /// Liberal share after conversions; drives the repression policy.
    pub liberal_fraction: f64,
    pub legitimacy: f64,
    pub policy: RepressionPolicy,
    pub renormalization: Renormalization,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: State,
    pub events: StepEvents,
}

/// Advance one timestep, consuming exactly one uniform draw for the shock.
pub fn step(state: &State, params: &Params, rng: &mut dyn RngCore) -> StepOutcome {
    let shock_fires = rng.random::<f64>() < params.shock_prob;
    transition(state, params, shock_fires)
}

/// Deterministic transition with the shock outcome decided by the caller.
pub fn transition(state: &State, params: &Params, shock_fires: bool) -> StepOutcome {
    let mut next = *state;
    let population = next.total();

    // 1) Production, sanctions, shock
    let production = population as f64
        * params.economic_prod_per_person
        * (PRODUCTION_BASE + PRODUCTION_CAPACITY_BONUS * next.s);
    let sanction_drain = params.external_sanction_severity * SANCTION_DRAIN_RATE * next.r;
    next.r += production - sanction_drain;

    let shock_loss = if shock_fires {
        next.r * params.shock_strength
    } else {
        0.0
    };
    next.r -= shock_loss;

    // 2) Upkeep, charged on the post-shock stock. R is never clamped.
    let maintenance = params.military_maintenance_cost * next.s * next.r;
    let repression_cost = next.repression * REPRESSION_UPKEEP_RATE * next.r;
    next.r -= maintenance + repression_cost;

    // 3) Demographics
    let births = (population as f64 * params.birth_rate).floor() as u64;
    let deaths = (population as f64 * params.death_rate).floor() as u64;

    // 4) Conversions
    let flows = conversion_flows(&next, params);
    next.u = next.u - flows.propaganda - flows.church - flows.economic_push + flows.backlash;
    next.m += flows.propaganda + flows.church;
    next.l = next.l + flows.economic_push - flows.backlash;

    // 5) Legitimacy
    let support_fraction = next.support_fraction();
    let legitimacy = (next.c * support_fraction
        - next.repression * params.repression_legitimacy_cost
        - params.external_sanction_severity * SANCTION_LEGITIMACY_COST)
        .clamp(-1.0, 1.0);

    // 6) State capacity
    let output_scale = params.pop as f64 * params.economic_prod_per_person;
    let capacity_growth = if output_scale > 0.0 {
        CAPACITY_GROWTH_RATE
            * (next.r / output_scale)
            * (legitimacy + CAPACITY_LEGITIMACY_OFFSET).max(0.0)
    } else {
        0.0
    };
    next.s = (next.s + capacity_growth - CAPACITY_DECAY_RATE * (1.0 - legitimacy))
        .clamp(0.0, 1.0);

    // 7) Church influence
    next.c = (next.c + CHURCH_GROWTH_RATE * support_fraction
        - CHURCH_REPRESSION_DRAIN * next.repression)
        .clamp(0.0, 1.0);

    // 8) Repression policy
    let liberal_fraction = fraction(next.l, next.total());
    let policy = RepressionPolicy::for_liberal_fraction(liberal_fraction);
    next.repression = policy.apply(next.repression);

    // 9) Renormalization
    // i128 so populations above i64::MAX cannot wrap negative
    let total_pop = next.total() as i128 + births as i128 - deaths as i128;
    let renormalization = renormalize(&mut next, params.pop, total_pop);

    StepOutcome {
        state: next,
        events: StepEvents {
            production,
            sanction_drain,
            shock_occurred: shock_fires,
            shock_loss,
            maintenance,
            repression_cost,
            births,
            deaths,
            flows,
            support_fraction,
            liberal_fraction,
            legitimacy,
            policy,
            renormalization,
        },
    }
}

/// Conversion flows from the pre-conversion undecided and liberal pools.
///
/// Propaganda draws first; the church mission and then economic push only
/// see what remains of the undecided pool. No flow exceeds its source.
fn conversion_flows(state: &State, params: &Params) -> ConversionFlows {
    let undecided = state.u as f64;
    let liberals = state.l as f64;

    let propaganda = capped(state.u, params.propaganda_effect * state.s * undecided);
    let church = capped(
        state.u - propaganda,
        params.church_mission_effect * state.c * undecided,
    );
    let backlash = capped(
        state.l,
        params.repression_effect_on_l * state.repression * liberals,
    );

    let hardship_scale = 2.0 * params.pop as f64;
    let hardship = if hardship_scale > 0.0 {
        ((hardship_scale - state.r) / hardship_scale).max(0.0)
    } else {
        0.0
    };
    let economic_push = capped(
        state.u - propaganda - church,
        params.conversion_from_economic_pain * hardship * undecided,
    );

    ConversionFlows {
        propaganda,
        church,
        backlash,
        economic_push,
    }
}

/// `floor(min(available, flow))`, never negative.
fn capped(available: u64, flow: f64) -> u64 {
    let whole = (available as f64).min(flow).floor().max(0.0) as u64;
    whole.min(available)
}

/// Fixed split used when the population collapses to nothing.
pub fn fallback_distribution(pop: u64) -> (u64, u64, u64) {
    let m = ((pop as f64 * FALLBACK_MONARCHIST_SHARE).floor() as u64).min(pop);
    let l = ((pop as f64 * FALLBACK_LIBERAL_SHARE).floor() as u64).min(pop - m);
    (m, l, pop - m - l)
}

fn renormalize(state: &mut State, pop: u64, total_pop: i128) -> Renormalization {
    if total_pop <= 0 {
        let (m, l, u) = fallback_distribution(pop);
        state.m = m;
        state.l = l;
        state.u = u;
        return Renormalization::Fallback { total_pop };
    }

    // Undecided absorbs the rounding remainder rather than being rescaled.
    let scale = pop as f64 / total_pop as f64;
    let m = ((state.m as f64 * scale).floor() as u64).min(pop);
    let l = ((state.l as f64 * scale).floor() as u64).min(pop - m);
    state.m = m;
    state.l = l;
    state.u = pop - m - l;
    Renormalization::Rescaled { total_pop }
}
