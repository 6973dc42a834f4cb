// branchenv: Branch-Specific Environment Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |             show / get / exec
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, BRANCHENV_*, flags |
//!              '-------------+-------------'
//!                            | SetupOptions
//!                            v
//!                  context::EnvironmentContext
//!                     setup / get / breakdown
//!                     |                  |
//!                     v                  v
//!                discovery          core::env
//!              wax glob, Selection  Environment, EnvStore
//!
//!   +-----------------------------------------+
//!   |  foundation        error, logging       |
//!   +-----------------------------------------+
//! ```
//!
//! # Example
//!
//! ```no_run
//! use branchenv::context::EnvironmentContext;
//!
//! let mut ctx = EnvironmentContext::setup()?;
//! println!("{} -> {}", ctx.environment(), ctx.get("DB_HOST"));
//! ctx.breakdown();
//! # Ok::<(), branchenv::error::EnvError>(())
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod context;
pub mod core;
pub mod discovery;
pub mod error;
pub mod logging;
