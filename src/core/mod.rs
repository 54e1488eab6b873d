//! Build-time engine: scanning, extraction, catalogs and entry injection.
//!
//! - `scanner` / `ignore`: which source files take part
//! - `parsers`: swc front end and catalog JSON I/O
//! - `extract`: candidate collection and source rewriting
//! - `catalog` / `key`: source catalog and key minting
//! - `inject`: entry-file registration of locale catalogs
//! - `check`: read-only verification

pub mod catalog;
pub mod check;
pub mod context;
pub mod edit;
pub mod extract;
pub mod ignore;
pub mod imports;
pub mod inject;
pub mod key;
pub mod parsers;
pub mod scanner;

pub use catalog::KeyCatalog;
pub use context::ProjectContext;
