//! Discrete-time compartmental model of a society split between
//! Monarchists, Liberals and Undecided, coupled to church influence, state
//! capacity, a resource stock and a repression policy.
//!
//! [`sim::run`] takes validated [`Params`] and returns the [`History`] of one
//! monthly record per timestep. [`flush`] and [`report`] consume a finished
//! history and never feed back into the model.

pub mod flush;
pub mod model;
pub mod report;
pub mod sim;
pub mod testutil;

pub use model::{
    ConfigError, History, HistoryRecord, Params, ParamsLoadError, SimMonth, State,
};
pub use sim::{Simulator, run, run_sweep};
