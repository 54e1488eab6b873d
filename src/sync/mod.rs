//! Translation sync: fill target catalogs through a translation provider.

pub mod engine;
pub mod icu;
pub mod provider;

pub use engine::{
    LocaleOutcome, LocaleReport, SyncError, SyncMode, SyncOptions, SyncReport, run_sync,
    sync_catalogs,
};
pub use provider::{HttpProvider, ProviderError, PseudoProvider, TranslationProvider};
