// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Locate and load the config file (`loader.rs`).
//! - Validate basic invariants like non-empty commands (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    CONFIG_PATH_ENV, ConfigLocation, load_and_validate, load_config, load_for_process,
    load_from_path, resolve_config_location,
};
pub use model::{DailyConfig, EnvSection, LogSection, RawDailyConfig, StepConfig, StepsSection};
