/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Configuration for seqshape.
//!
//! The algebra itself is pure; the only tunables are the limits that
//! keep materializing operations (exact repetition, parsing) from
//! allocating or recursing without bound. Limits are read from environment
//! variables or a YAML file, and can be temporarily overridden in
//! tests through [`global::lock`].

use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::PoisonError;
use std::sync::RwLock;

use serde::Deserialize;
use serde::Serialize;

/// Environment variable overriding [`Config::max_repeat_count`].
pub const MAX_REPEAT_COUNT_ENV: &str = "SEQSHAPE_MAX_REPEAT_COUNT";

/// Environment variable overriding [`Config::max_shape_len`].
pub const MAX_SHAPE_LEN_ENV: &str = "SEQSHAPE_MAX_SHAPE_LEN";

/// Environment variable overriding [`Config::max_kind_depth`].
pub const MAX_KIND_DEPTH_ENV: &str = "SEQSHAPE_MAX_KIND_DEPTH";

const DEFAULT_MAX_REPEAT_COUNT: usize = 64 * 1024;
const DEFAULT_MAX_SHAPE_LEN: usize = 64 * 1024;
const DEFAULT_MAX_KIND_DEPTH: usize = 64;

/// Configuration for seqshape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    max_repeat_count: usize,
    max_shape_len: usize,
    max_kind_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_repeat_count: DEFAULT_MAX_REPEAT_COUNT,
            max_shape_len: DEFAULT_MAX_SHAPE_LEN,
            max_kind_depth: DEFAULT_MAX_KIND_DEPTH,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source. Values
    /// that are absent keep their defaults; values that do not parse
    /// are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(parsed) = parse_override(&lookup, MAX_REPEAT_COUNT_ENV) {
            config.max_repeat_count = parsed;
        }
        if let Some(parsed) = parse_override(&lookup, MAX_SHAPE_LEN_ENV) {
            config.max_shape_len = parsed;
        }
        if let Some(parsed) = parse_override(&lookup, MAX_KIND_DEPTH_ENV) {
            config.max_kind_depth = parsed;
        }
        config
    }

    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Config = serde_yaml::from_str(&contents)?;
        tracing::info!(path = %path.display(), ?config, "loaded seqshape config");
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), anyhow::Error> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// The largest exact count accepted by [`crate::repeat`].
    pub fn max_repeat_count(&self) -> usize {
        self.max_repeat_count
    }

    /// The longest shape, in elements, accepted by the parser.
    pub fn max_shape_len(&self) -> usize {
        self.max_shape_len
    }

    /// The deepest parenthesis nesting accepted by the parser.
    pub fn max_kind_depth(&self) -> usize {
        self.max_kind_depth
    }

    pub fn set_max_repeat_count(&mut self, limit: usize) {
        self.max_repeat_count = limit;
    }

    pub fn set_max_shape_len(&mut self, limit: usize) {
        self.max_shape_len = limit;
    }

    pub fn set_max_kind_depth(&mut self, limit: usize) {
        self.max_kind_depth = limit;
    }
}

fn parse_override<F>(lookup: &F, name: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name)?;
    match value.trim().parse::<usize>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(name, %value, %err, "ignoring unparseable config override");
            None
        }
    }
}

/// Global configuration functions
///
/// This module provides global configuration access and test
/// override support.
pub mod global {
    use std::marker::PhantomData;
    use std::sync::Mutex;
    use std::sync::MutexGuard;

    use super::*;

    /// Global configuration instance, initialized from environment variables.
    static CONFIG: LazyLock<Arc<RwLock<Config>>> =
        LazyLock::new(|| Arc::new(RwLock::new(Config::from_env())));

    /// Acquire the global configuration lock for testing.
    ///
    /// The returned [`ConfigLock`] serializes tests that modify the
    /// global configuration, and is the only way to create overrides:
    /// ```
    /// use seqshape::config::Config;
    /// use seqshape::config::global;
    ///
    /// let lock = global::lock();
    /// let mut config = Config::new();
    /// config.set_max_repeat_count(3);
    /// let _guard = lock.override_config(config);
    /// assert_eq!(global::max_repeat_count(), 3);
    /// ```
    pub fn lock() -> ConfigLock {
        static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
        ConfigLock {
            _guard: MUTEX.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Initialize the global configuration from environment variables
    pub fn init_from_env() {
        set(Config::from_env());
    }

    /// Initialize the global configuration from a YAML file
    pub fn init_from_yaml<P: AsRef<Path>>(path: P) -> Result<(), anyhow::Error> {
        set(Config::from_yaml(path)?);
        Ok(())
    }

    /// Get a reference to the global configuration
    pub fn get() -> Arc<RwLock<Config>> {
        CONFIG.clone()
    }

    /// A copy of the current global configuration.
    pub fn snapshot() -> Config {
        CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the repeat count limit
    pub fn max_repeat_count() -> usize {
        CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .max_repeat_count()
    }

    /// Get the parsed shape length limit
    pub fn max_shape_len() -> usize {
        CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .max_shape_len()
    }

    /// Get the parenthesis nesting limit
    pub fn max_kind_depth() -> usize {
        CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .max_kind_depth()
    }

    /// Reset the global configuration to defaults (for testing only)
    pub fn reset_to_defaults() {
        set(Config::default());
    }

    fn set(config: Config) -> Config {
        let mut global = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *global, config)
    }

    /// A guard that holds the global configuration lock and provides
    /// override functionality.
    pub struct ConfigLock {
        _guard: MutexGuard<'static, ()>,
    }

    impl ConfigLock {
        /// Replace the global configuration until the returned guard
        /// is dropped. The guard cannot outlive this lock.
        pub fn override_config(&self, config: Config) -> ConfigGuard<'_> {
            ConfigGuard {
                orig: Some(set(config)),
                _phantom: PhantomData,
            }
        }
    }

    /// A guard that restores the previous global configuration when
    /// dropped.
    pub struct ConfigGuard<'a> {
        orig: Option<Config>,
        // This is here so we can hold onto a 'a lifetime.
        _phantom: PhantomData<&'a ()>,
    }

    impl Drop for ConfigGuard<'_> {
        fn drop(&mut self) {
            if let Some(orig) = self.orig.take() {
                set(orig);
            }
        }
    }
}
