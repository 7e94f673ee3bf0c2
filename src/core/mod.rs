pub mod config;
pub mod error;
pub mod intent;
pub mod settings;
pub mod time;

#[cfg(test)]
mod config_test;

pub use config::*;
pub use error::*;
pub use intent::Intent;
pub use settings::*;
pub use time::*;
