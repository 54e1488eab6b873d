//! Process-wide locale state with change notification.

use std::{collections::HashMap, sync::Arc};

use super::translator::Translator;
use crate::core::parsers::json::Catalog;

/// Locale used when the requested initial locale has no catalog.
pub const FALLBACK_LOCALE: &str = "en";

/// Immutable view of the active locale. Readers keep the `Arc` they were
/// handed; a mutation builds a new snapshot instead of changing this one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LocaleSnapshot {
    pub locale: String,
    pub translations: Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Arc<LocaleSnapshot>)>;

/// Runtime translation store.
///
/// Mutation goes through `&mut self`, so a listener cannot mutate the store
/// it is registered on. Listeners run synchronously in registration order.
pub struct LocalisationStore {
    locale: String,
    translations: HashMap<String, Catalog>,
    snapshot: Arc<LocaleSnapshot>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for LocalisationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalisationStore")
            .field("locale", &self.locale)
            .field("locales", &self.available_locales())
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl LocalisationStore {
    pub fn new(locale: impl Into<String>, translations: HashMap<String, Catalog>) -> Self {
        let mut store = Self {
            locale: locale.into(),
            translations,
            snapshot: Arc::default(),
            listeners: Vec::new(),
            next_id: 0,
        };
        store.snapshot = store.build_snapshot();
        store
    }

    fn build_snapshot(&self) -> Arc<LocaleSnapshot> {
        Arc::new(LocaleSnapshot {
            locale: self.locale.clone(),
            translations: self
                .translations
                .get(&self.locale)
                .cloned()
                .unwrap_or_default(),
        })
    }

    fn refresh(&mut self) {
        self.snapshot = self.build_snapshot();
        let snapshot = Arc::clone(&self.snapshot);
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }

    /// Replace every catalog. The active locale is kept even if the new map
    /// lacks it; lookups then fall back to keys.
    pub fn set_translations(&mut self, translations: HashMap<String, Catalog>) {
        self.translations = translations;
        self.refresh();
    }

    /// Switch the active locale. Returns `false` and changes nothing when the
    /// locale has no catalog.
    pub fn set_locale(&mut self, locale: &str) -> bool {
        if !self.translations.contains_key(locale) {
            tracing::warn!(
                "locale \"{}\" is not available (have: {})",
                locale,
                self.available_locales().join(", ")
            );
            return false;
        }
        self.locale = locale.to_string();
        self.refresh();
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Arc<LocaleSnapshot>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether a listener was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// The same `Arc` is returned until the next mutation.
    pub fn snapshot(&self) -> Arc<LocaleSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn current_locale(&self) -> &str {
        &self.locale
    }

    pub fn available_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.translations.keys().cloned().collect();
        locales.sort();
        locales
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.snapshot())
    }
}

/// Build the store an application starts with. An unknown `locale` falls
/// back to [`FALLBACK_LOCALE`].
pub fn init_localisation(
    locale: &str,
    translations: HashMap<String, Catalog>,
) -> LocalisationStore {
    let locale = if translations.contains_key(locale) {
        locale
    } else {
        tracing::warn!(
            "locale \"{}\" is not available, falling back to \"{}\"",
            locale,
            FALLBACK_LOCALE
        );
        FALLBACK_LOCALE
    };
    LocalisationStore::new(locale, translations)
}
