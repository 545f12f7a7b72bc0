// src/env.rs

//! Explicit environment handed to collaborators.
//!
//! The runner never mutates its own process environment. Instead it builds
//! an [`Environment`] (process snapshot + `.env` file) once, before any step
//! runs, and each step receives it by reference.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::config::EnvSection;
use crate::errors::{DailyTaskError, Result};
use crate::fs::FileSystem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Process snapshot merged with the env file described by `section`.
    pub fn load(fs: &dyn FileSystem, section: &EnvSection) -> Result<Self> {
        let mut env = Self::from_process();
        env.merge_file(fs, &section.file, section.override_existing)?;
        Ok(env)
    }

    /// Merge `KEY=VALUE` pairs from an env file, if it exists.
    ///
    /// Existing variables win unless `override_existing` is set. Returns
    /// the number of variables taken from the file.
    pub fn merge_file(
        &mut self,
        fs: &dyn FileSystem,
        path: &Path,
        override_existing: bool,
    ) -> Result<usize> {
        if !fs.is_file(path) {
            debug!(?path, "no environment file; using process environment only");
            return Ok(0);
        }

        let reader = fs.open_read(path)?;
        let mut applied = 0;

        for item in dotenvy::from_read_iter(reader) {
            let (key, value) = item.map_err(|source| DailyTaskError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;

            if self.set_from_file(key, value, override_existing) {
                applied += 1;
            }
        }

        info!(?path, applied, "loaded environment file");
        Ok(applied)
    }

    fn set_from_file(&mut self, key: String, value: String, override_existing: bool) -> bool {
        if !override_existing && self.vars.contains_key(&key) {
            return false;
        }
        self.vars.insert(key, value);
        true
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
