pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::ClinicConfig};

pub use crate::core::{
    persistence::{Archive, ImportSummary, Report},
    registry::Registry,
    shell::Shell,
};
pub use domain::model::{Consultation, Owner, Pet};
pub use utils::error::{ClinicError, Result};
