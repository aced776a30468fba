// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod detect;
pub mod diff;
pub mod purge;
pub mod show;
pub mod validate;
