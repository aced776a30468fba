// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift definition configuration
//!
//! A drift definition names a base directory to track and the globs that
//! select files beneath it. Definitions are loaded from TOML.

use crate::category::{DriftChangeSetCategory, DriftHandlingMode};
use crate::changeset::Headers;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading or validating a drift definition
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid definition: {0}")]
    Invalid(String),
    #[error("invalid glob {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// What to track and how to treat detected drift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriftDefinition {
    pub name: String,
    pub basedir: PathBuf,
    #[serde(default)]
    pub resource_id: u32,
    #[serde(default)]
    pub definition_id: u32,
    #[serde(default)]
    pub handling_mode: DriftHandlingMode,
    /// Globs relative to basedir; empty means everything
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    /// Stored version that drift is reported against, instead of the latest
    #[serde(default)]
    pub pinned_version: Option<u32>,
}

impl DriftDefinition {
    pub fn new(name: impl Into<String>, basedir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            basedir: basedir.into(),
            resource_id: 0,
            definition_id: 0,
            handling_mode: DriftHandlingMode::default(),
            includes: Vec::new(),
            excludes: Vec::new(),
            pinned_version: None,
        }
    }

    pub fn with_resource_id(mut self, resource_id: u32) -> Self {
        self.resource_id = resource_id;
        self
    }

    pub fn with_definition_id(mut self, definition_id: u32) -> Self {
        self.definition_id = definition_id;
        self
    }

    pub fn with_handling_mode(mut self, handling_mode: DriftHandlingMode) -> Self {
        self.handling_mode = handling_mode;
        self
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.includes.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    pub fn pinned_to(mut self, version: u32) -> Self {
        self.pinned_version = Some(version);
        self
    }

    /// Load and validate a definition file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a definition from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let definition: DriftDefinition = toml::from_str(content)?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }
        if self.name.contains(['\n', '\r']) {
            return Err(ConfigError::Invalid(
                "name must not contain line breaks".to_string(),
            ));
        }
        if self.name.trim() != self.name {
            return Err(ConfigError::Invalid(
                "name must not have leading or trailing whitespace".to_string(),
            ));
        }
        let Some(basedir) = self.basedir.to_str() else {
            return Err(ConfigError::Invalid("basedir must be valid UTF-8".to_string()));
        };
        if basedir.trim().is_empty() {
            return Err(ConfigError::Invalid("basedir must not be empty".to_string()));
        }
        if basedir.contains(['\n', '\r']) || basedir.trim() != basedir {
            return Err(ConfigError::Invalid(format!(
                "basedir {:?} must be a single line without surrounding whitespace",
                basedir
            )));
        }
        self.filter()?;
        Ok(())
    }

    /// Compile the include and exclude globs
    pub fn filter(&self) -> Result<PathFilter, ConfigError> {
        let includes = if self.includes.is_empty() {
            None
        } else {
            Some(build_glob_set(&self.includes)?)
        };
        Ok(PathFilter {
            includes,
            excludes: build_glob_set(&self.excludes)?,
        })
    }

    /// Headers for a change set of this definition
    pub fn headers(&self, version: u32, category: DriftChangeSetCategory) -> Headers {
        Headers::new(
            self.name.as_str(),
            self.basedir.to_string_lossy().into_owned(),
            category,
        )
        .with_resource_id(self.resource_id)
        .with_definition_id(self.definition_id)
        .with_version(version)
    }
}

/// Compiled include and exclude globs
#[derive(Debug, Clone)]
pub struct PathFilter {
    includes: Option<GlobSet>,
    excludes: GlobSet,
}

impl PathFilter {
    /// Whether a basedir-relative path (with `/` separators) is tracked
    pub fn matches(&self, relative: &str) -> bool {
        let included = self
            .includes
            .as_ref()
            .map(|set| set.is_match(relative))
            .unwrap_or(true);
        included && !self.excludes.is_match(relative)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Glob::new(pattern).map_err(|source| ConfigError::Glob {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .fold(&mut GlobSetBuilder::new(), |builder, glob| builder.add(glob))
        .build()
        .map_err(|source| ConfigError::Glob {
            pattern: patterns.join(", "),
            source,
        })
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
