//! Localise - i18n extraction and catalog sync for React/React Native
//!
//! Localise rewrites hardcoded UI text in JSX/TSX sources into keyed `t(...)`
//! calls, keeps per-locale JSON catalogs in sync through a translation
//! provider, and ships the runtime store those calls resolve against.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Project config and credentials loading
//! - `core`: Scanning, extraction/rewrite, catalogs and entry injection
//! - `icu`: ICU plural expression reader/writer
//! - `issues`: Issue types reported by `replace` and `check`
//! - `rules`: Detection rules over lowered syntax candidates
//! - `runtime`: Runtime lookup store
//! - `sync`: Translation sync engine and providers
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod icu;
pub mod issues;
pub mod rules;
pub mod runtime;
pub mod sync;
pub mod utils;
