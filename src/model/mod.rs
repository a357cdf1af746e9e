pub mod error;
pub mod history;
pub mod params;
pub mod state;
pub mod timestamp;

pub use error::{ConfigError, ParamsLoadError};
pub use history::{History, HistoryRecord};
pub use params::Params;
pub use state::State;
pub use timestamp::SimMonth;
