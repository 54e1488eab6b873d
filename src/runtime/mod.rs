//! Runtime lookup store consumed by applications.

pub mod store;
pub mod translator;

pub use store::{
    FALLBACK_LOCALE, LocaleSnapshot, LocalisationStore, SubscriptionId, init_localisation,
};
pub use translator::{ArgValue, Translator, lookup};
