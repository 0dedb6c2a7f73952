//! Configuration types for Sieve compilation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field is optional and defaults to off, except the join
//! width which defaults to [`DEFAULT_WIDTH`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`NormalizeOptions`] - The `[normalize]` section.
//! - [`DocumentFlags`] - The `[document]` section.
//! - [`JoinConfig`] - The `[join]` section.
//!
//! # Example
//!
//! ```
//! # use sieve::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(!config.normalize().sorted);
//! assert_eq!(config.join().width(), 70);
//! ```

use serde::Deserialize;

use sieve_core::document::DocumentFlags;

use crate::{join::DEFAULT_WIDTH, normalize::NormalizeOptions};

/// Top-level application configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    normalize: NormalizeOptions,

    #[serde(default)]
    document: DocumentFlags,

    #[serde(default)]
    join: JoinConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(normalize: NormalizeOptions, document: DocumentFlags, join: JoinConfig) -> Self {
        Self {
            normalize,
            document,
            join,
        }
    }

    /// Returns the normalization options.
    pub fn normalize(&self) -> &NormalizeOptions {
        &self.normalize
    }

    /// Returns the flags copied into every compiled document.
    pub fn document(&self) -> &DocumentFlags {
        &self.document
    }

    /// Returns the join settings.
    pub fn join(&self) -> &JoinConfig {
        &self.join
    }

    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_document(mut self, document: DocumentFlags) -> Self {
        self.document = document;
        self
    }

    pub fn with_join(mut self, join: JoinConfig) -> Self {
        self.join = join;
        self
    }
}

/// Settings for the list-join utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct JoinConfig {
    /// Maximum line width of the joined output.
    #[serde(default = "default_width")]
    width: usize,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

impl JoinConfig {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}
