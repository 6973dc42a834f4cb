// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core environment handling.
//!
//! ```text
//!              core
//!               |
//!              env
//!               |
//!   +-----------+-----------+
//!   |           |           |
//!   v           v           v
//! variable  environment   store
//! key/value read/set/unset ProcessEnv
//!                          MemoryEnv
//! ```

pub mod env;
