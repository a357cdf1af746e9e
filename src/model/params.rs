use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ParamsLoadError};

/// Allowed slack when checking that the initial faction fractions sum to 1.
pub const FRACTION_SUM_TOLERANCE: f64 = 1e-9;

const UNIT_INTERVAL: &str = "[0, 1]";
const NON_NEGATIVE: &str = "[0, inf)";

/// Immutable configuration for one simulation run.
///
/// Missing fields in a JSON parameter file fall back to [`Params::default`],
/// which carries the illustrative baseline scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Total population, held constant by renormalization.
    pub pop: u64,
    /// Initial monarchist fraction.
    pub init_m: f64,
    /// Initial liberal fraction.
    pub init_l: f64,
    /// Initial undecided fraction.
    pub init_u: f64,

    /// Initial church influence (0–1).
    pub church_influence: f64,
    /// Initial state administrative/military capacity (0–1).
    pub state_capacity: f64,
    /// Baseline production per person per timestep.
    pub economic_prod_per_person: f64,
    /// 0–1, higher drains more of the resource stock each step.
    pub external_sanction_severity: f64,

    /// Undecided -> monarchist conversion per unit of state capacity.
    pub propaganda_effect: f64,
    /// Undecided -> monarchist conversion per unit of church influence.
    pub church_mission_effect: f64,
    /// Starting repression intensity.
    pub repression_base: f64,
    /// Liberal -> undecided backlash per unit of repression.
    pub repression_effect_on_l: f64,
    /// Legitimacy lost per unit of repression.
    pub repression_legitimacy_cost: f64,
    /// Fraction of resources per unit of state capacity spent on upkeep.
    pub military_maintenance_cost: f64,
    /// How strongly economic hardship pushes undecided toward liberal.
    pub conversion_from_economic_pain: f64,

    pub birth_rate: f64,
    pub death_rate: f64,

    /// Per-step probability of a resource shock.
    pub shock_prob: f64,
    /// Fraction of resources lost when a shock fires.
    pub shock_strength: f64,

    /// Number of monthly timesteps to simulate.
    pub timesteps: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            pop: 10_000,
            init_m: 0.15,
            init_l: 0.6,
            init_u: 0.25,
            church_influence: 0.2,
            state_capacity: 0.2,
            economic_prod_per_person: 1.0,
            external_sanction_severity: 0.0,
            propaganda_effect: 0.02,
            church_mission_effect: 0.03,
            repression_base: 0.01,
            repression_effect_on_l: 0.04,
            repression_legitimacy_cost: 0.03,
            military_maintenance_cost: 0.002,
            conversion_from_economic_pain: 0.01,
            birth_rate: 0.0025,
            death_rate: 0.0018,
            shock_prob: 0.02,
            shock_strength: 0.15,
            timesteps: 120,
        }
    }
}

impl Params {
    /// Parse a JSON parameter document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ParamsLoadError> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Read and validate a JSON parameter file.
    pub fn load(path: &Path) -> Result<Self, ParamsLoadError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check every documented domain. Called by the simulator before the
    /// first step; never re-checked afterwards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pop == 0 {
            return Err(ConfigError::ZeroPopulation);
        }

        for (field, value) in self.real_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        for (field, value) in self.unit_fields() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfDomain {
                    field,
                    value,
                    domain: UNIT_INTERVAL,
                });
            }
        }

        if self.economic_prod_per_person < 0.0 {
            return Err(ConfigError::OutOfDomain {
                field: "economic_prod_per_person",
                value: self.economic_prod_per_person,
                domain: NON_NEGATIVE,
            });
        }

        let sum = self.init_m + self.init_l + self.init_u;
        if (sum - 1.0).abs() > FRACTION_SUM_TOLERANCE {
            return Err(ConfigError::FractionSum { sum });
        }

        Ok(())
    }

    /// Fields restricted to the unit interval.
    fn unit_fields(&self) -> [(&'static str, f64); 17] {
        [
            ("init_m", self.init_m),
            ("init_l", self.init_l),
            ("init_u", self.init_u),
            ("church_influence", self.church_influence),
            ("state_capacity", self.state_capacity),
            ("external_sanction_severity", self.external_sanction_severity),
            ("propaganda_effect", self.propaganda_effect),
            ("church_mission_effect", self.church_mission_effect),
            ("repression_base", self.repression_base),
            ("repression_effect_on_l", self.repression_effect_on_l),
            ("repression_legitimacy_cost", self.repression_legitimacy_cost),
            ("military_maintenance_cost", self.military_maintenance_cost),
            (
                "conversion_from_economic_pain",
                self.conversion_from_economic_pain,
            ),
            ("birth_rate", self.birth_rate),
            ("death_rate", self.death_rate),
            ("shock_prob", self.shock_prob),
            ("shock_strength", self.shock_strength),
        ]
    }

    fn real_fields(&self) -> impl Iterator<Item = (&'static str, f64)> {
        self.unit_fields().into_iter().chain(std::iter::once((
            "economic_prod_per_person",
            self.economic_prod_per_person,
        )))
    }
}
