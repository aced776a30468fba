// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change-set level metadata and its header block
//!
//! The block is the first thing in a change-set file, one `key: value` per
//! line, terminated by a blank line:
//!
//! ```text
//! resource-id: 10001
//! definition-id: 7
//! definition-name: etc-config
//! basedir: /etc
//! type: C
//! version: 0
//!
//! ```

use super::error::ChangeSetError;
use super::format::LineSource;
use crate::category::DriftChangeSetCategory;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

const RESOURCE_ID: &str = "resource-id";
const DEFINITION_ID: &str = "definition-id";
const DEFINITION_NAME: &str = "definition-name";
const BASEDIR: &str = "basedir";
const TYPE: &str = "type";
const VERSION: &str = "version";

/// Metadata describing one change set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers {
    pub resource_id: u32,
    pub definition_id: u32,
    pub definition_name: String,
    pub basedir: String,
    pub category: DriftChangeSetCategory,
    pub version: u32,
}

impl Headers {
    pub fn new(
        definition_name: impl Into<String>,
        basedir: impl Into<String>,
        category: DriftChangeSetCategory,
    ) -> Self {
        Self {
            resource_id: 0,
            definition_id: 0,
            definition_name: definition_name.into(),
            basedir: basedir.into(),
            category,
            version: 0,
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

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// True for a full snapshot, false for an incremental delta
    pub fn is_coverage(&self) -> bool {
        self.category == DriftChangeSetCategory::Coverage
    }

    /// Check that the text fields can be written as single header lines
    pub fn validate(&self) -> Result<(), ChangeSetError> {
        for (field, value) in [
            (DEFINITION_NAME, &self.definition_name),
            (BASEDIR, &self.basedir),
        ] {
            if value.trim().is_empty() {
                return Err(ChangeSetError::InvalidHeader {
                    field,
                    reason: "value is empty",
                });
            }
            if value.contains(['\n', '\r']) {
                return Err(ChangeSetError::InvalidHeader {
                    field,
                    reason: "value contains a line break",
                });
            }
            if value.trim() != value.as_str() {
                return Err(ChangeSetError::InvalidHeader {
                    field,
                    reason: "value has leading or trailing whitespace",
                });
            }
        }
        Ok(())
    }

    /// Render the header block, including its terminating blank line
    pub fn to_block(&self) -> String {
        format!(
            "{RESOURCE_ID}: {}\n{DEFINITION_ID}: {}\n{DEFINITION_NAME}: {}\n{BASEDIR}: {}\n{TYPE}: {}\n{VERSION}: {}\n\n",
            self.resource_id,
            self.definition_id,
            self.definition_name,
            self.basedir,
            self.category.code(),
            self.version,
        )
    }

    /// Parse a header block from the start of a change-set stream
    pub(crate) fn read_block<R: BufRead>(
        lines: &mut LineSource<R>,
    ) -> Result<Self, ChangeSetError> {
        let mut resource_id = None;
        let mut definition_id = None;
        let mut definition_name = None;
        let mut basedir = None;
        let mut category = None;
        let mut version = None;

        loop {
            let line = match lines.next_line()? {
                Some(line) => line,
                None => {
                    return Err(corrupt(
                        lines.line_number() + 1,
                        "end of file inside header block",
                    ))
                }
            };
            let line_no = lines.line_number();
            if line.trim().is_empty() {
                break;
            }

            let Some((key, value)) = line.split_once(": ") else {
                return Err(corrupt(line_no, format!("expected `key: value`, got {line:?}")));
            };
            let key = key.trim();
            let value = value.trim();

            let duplicate = match key {
                RESOURCE_ID => resource_id.replace(parse_number(key, value, line_no)?).is_some(),
                DEFINITION_ID => definition_id
                    .replace(parse_number(key, value, line_no)?)
                    .is_some(),
                VERSION => version.replace(parse_number(key, value, line_no)?).is_some(),
                DEFINITION_NAME => definition_name.replace(value.to_string()).is_some(),
                BASEDIR => basedir.replace(value.to_string()).is_some(),
                TYPE => {
                    let parsed = DriftChangeSetCategory::from_code(value)
                        .map_err(|e| corrupt(line_no, e.to_string()))?;
                    category.replace(parsed).is_some()
                }
                other => {
                    tracing::warn!(line = line_no, key = other, "ignoring unknown change set header");
                    false
                }
            };
            if duplicate {
                return Err(corrupt(line_no, format!("duplicate header {key:?}")));
            }
        }

        let line_no = lines.line_number();
        let definition_name = required(non_empty(definition_name), DEFINITION_NAME, line_no)?;
        let basedir = required(non_empty(basedir), BASEDIR, line_no)?;
        let category = required(category, TYPE, line_no)?;

        Ok(Self {
            resource_id: resource_id.unwrap_or(0),
            definition_id: definition_id.unwrap_or(0),
            definition_name,
            basedir,
            category,
            version: version.unwrap_or(0),
        })
    }
}

fn corrupt(line: u64, reason: impl Into<String>) -> ChangeSetError {
    ChangeSetError::CorruptHeaders {
        line,
        reason: reason.into(),
    }
}

fn parse_number(key: &str, value: &str, line: u64) -> Result<u32, ChangeSetError> {
    value
        .parse()
        .map_err(|_| corrupt(line, format!("{key} is not a number: {value:?}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required<T>(value: Option<T>, key: &str, line: u64) -> Result<T, ChangeSetError> {
    value.ok_or_else(|| corrupt(line, format!("missing required header {key:?}")))
}

#[cfg(test)]
#[path = "headers_tests.rs"]
mod tests;
