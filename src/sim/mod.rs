mod runner;
pub mod step;
pub mod sweep;

pub use runner::{Simulator, run};
pub use step::{
    ConversionFlows, Renormalization, RepressionPolicy, StepEvents, StepOutcome, step, transition,
};
pub use sweep::{run_seed, run_sweep};
