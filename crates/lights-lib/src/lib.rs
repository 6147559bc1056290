//! lights — notification LED arbitration and sysfs light driver.

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod led;
pub mod output;
pub mod request;
pub mod state;

pub use controller::LightController;
pub use error::LightsError;
pub use state::{FlashMode, LightKind, LightState};
