//! Persisted UI preferences: list view mode, items-per-page and UI
//! language. Each is an independent scalar, loaded fail-soft at startup
//! (missing, invalid or unreadable values fall back to the default) and
//! written back on every change. Invalid inputs are logged and ignored;
//! the current value stands.

use crate::store::{StorageBackend, ITEMS_PER_PAGE_KEY, LANGUAGE_KEY, VIEW_MODE_KEY};
use tracing::warn;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;
/// Page sizes a UI offers in its dropdown. `set_items_per_page` accepts
/// any positive integer; this list is only the conventional menu.
pub const ITEMS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// How the employee list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    List,
}

impl ViewMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "table" => Some(ViewMode::Table),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Table => "table",
            ViewMode::List => "list",
        }
    }
}

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "en" => Some(Language::En),
            "tr" => Some(Language::Tr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }
}

/// Store for the scalar UI preferences, mirrored to a storage backend.
pub struct PreferenceStore<B: StorageBackend> {
    backend: B,
    view_mode: ViewMode,
    items_per_page: usize,
    language: Language,
}

impl<B: StorageBackend> PreferenceStore<B> {
    /// Load all preferences from storage. Never fails: anything missing or
    /// unreadable becomes its default.
    pub fn new(backend: B) -> Self {
        let view_mode = load_enum(&backend, VIEW_MODE_KEY, ViewMode::from_name);
        let language = load_enum(&backend, LANGUAGE_KEY, Language::from_name);
        let items_per_page = load_items_per_page(&backend);
        Self {
            backend,
            view_mode,
            items_per_page,
            language,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.persist(VIEW_MODE_KEY, mode.as_str());
    }

    /// Raw-string setter for callers wired to UI events. Unknown names are
    /// logged and ignored.
    pub fn set_view_mode_name(&mut self, name: &str) {
        match ViewMode::from_name(name) {
            Some(mode) => self.set_view_mode(mode),
            None => warn!(value = name, "ignoring invalid view mode"),
        }
    }

    /// Accepts any positive page size; zero is logged and ignored.
    pub fn set_items_per_page(&mut self, count: usize) {
        if count == 0 {
            warn!("ignoring invalid items-per-page count of 0");
            return;
        }
        self.items_per_page = count;
        self.persist(ITEMS_PER_PAGE_KEY, &count.to_string());
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.persist(LANGUAGE_KEY, language.as_str());
    }

    /// Raw-string setter; unsupported codes are logged and ignored.
    pub fn set_language_name(&mut self, name: &str) {
        match Language::from_name(name) {
            Some(language) => self.set_language(language),
            None => warn!(value = name, "ignoring unsupported language"),
        }
    }

    /// Restore the default view mode and drop the persisted key.
    pub fn reset_view_mode(&mut self) {
        self.view_mode = ViewMode::default();
        self.remove(VIEW_MODE_KEY);
    }

    /// Restore the default page size and drop the persisted key.
    pub fn reset_items_per_page(&mut self) {
        self.items_per_page = DEFAULT_ITEMS_PER_PAGE;
        self.remove(ITEMS_PER_PAGE_KEY);
    }

    /// Restore the default language and drop the persisted key.
    pub fn reset_language(&mut self) {
        self.language = Language::default();
        self.remove(LANGUAGE_KEY);
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.backend.set(key, value) {
            warn!(key, error = %err, "failed to persist preference");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove(key) {
            warn!(key, error = %err, "failed to remove persisted preference");
        }
    }
}

fn load_enum<B: StorageBackend, T: Default>(
    backend: &B,
    key: &str,
    parse: fn(&str) -> Option<T>,
) -> T {
    match backend.get(key) {
        Ok(Some(raw)) => parse(&raw).unwrap_or_else(|| {
            warn!(key, value = %raw, "stored preference is invalid, using default");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, error = %err, "failed to load preference, using default");
            T::default()
        }
    }
}

fn load_items_per_page<B: StorageBackend>(backend: &B) -> usize {
    match backend.get(ITEMS_PER_PAGE_KEY) {
        Ok(Some(raw)) => match raw.trim().parse::<usize>() {
            Ok(count) if count > 0 => count,
            _ => {
                warn!(value = %raw, "stored items-per-page is invalid, using default");
                DEFAULT_ITEMS_PER_PAGE
            }
        },
        Ok(None) => DEFAULT_ITEMS_PER_PAGE,
        Err(err) => {
            warn!(error = %err, "failed to load items-per-page, using default");
            DEFAULT_ITEMS_PER_PAGE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;

    #[test]
    fn defaults_apply_when_storage_is_empty() {
        let prefs = PreferenceStore::new(MemBackend::new());
        assert_eq!(prefs.view_mode(), ViewMode::Table);
        assert_eq!(prefs.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(prefs.language(), Language::En);
    }

    #[test]
    fn settings_round_trip_through_the_backend() {
        let backend = MemBackend::new();
        {
            let mut prefs = PreferenceStore::new(&backend);
            prefs.set_view_mode(ViewMode::List);
            prefs.set_items_per_page(25);
            prefs.set_language(Language::Tr);
        }

        let reloaded = PreferenceStore::new(&backend);
        assert_eq!(reloaded.view_mode(), ViewMode::List);
        assert_eq!(reloaded.items_per_page(), 25);
        assert_eq!(reloaded.language(), Language::Tr);
    }

    #[test]
    fn invalid_stored_values_fall_back_to_defaults() {
        let backend = MemBackend::new();
        backend.set(VIEW_MODE_KEY, "grid").unwrap();
        backend.set(ITEMS_PER_PAGE_KEY, "-3").unwrap();
        backend.set(LANGUAGE_KEY, "de").unwrap();

        let prefs = PreferenceStore::new(&backend);
        assert_eq!(prefs.view_mode(), ViewMode::Table);
        assert_eq!(prefs.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(prefs.language(), Language::En);
    }

    #[test]
    fn read_errors_fall_back_to_defaults() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let prefs = PreferenceStore::new(&backend);
        assert_eq!(prefs.view_mode(), ViewMode::Table);
        assert_eq!(prefs.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn invalid_inputs_are_ignored() {
        let mut prefs = PreferenceStore::new(MemBackend::new());
        prefs.set_view_mode(ViewMode::List);

        prefs.set_view_mode_name("grid");
        assert_eq!(prefs.view_mode(), ViewMode::List);

        prefs.set_items_per_page(0);
        assert_eq!(prefs.items_per_page(), DEFAULT_ITEMS_PER_PAGE);

        prefs.set_language_name("de");
        assert_eq!(prefs.language(), Language::En);
    }

    #[test]
    fn raw_setters_accept_known_names() {
        let mut prefs = PreferenceStore::new(MemBackend::new());
        prefs.set_view_mode_name("list");
        assert_eq!(prefs.view_mode(), ViewMode::List);
        prefs.set_language_name("tr");
        assert_eq!(prefs.language(), Language::Tr);
    }

    #[test]
    fn reset_restores_default_and_removes_the_key() {
        let backend = MemBackend::new();
        let mut prefs = PreferenceStore::new(&backend);
        prefs.set_view_mode(ViewMode::List);
        prefs.set_items_per_page(50);
        prefs.set_language(Language::Tr);
        assert!(backend.contains(VIEW_MODE_KEY));

        prefs.reset_view_mode();
        prefs.reset_items_per_page();
        prefs.reset_language();

        assert_eq!(prefs.view_mode(), ViewMode::Table);
        assert_eq!(prefs.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(prefs.language(), Language::En);
        assert!(!backend.contains(VIEW_MODE_KEY));
        assert!(!backend.contains(ITEMS_PER_PAGE_KEY));
        assert!(!backend.contains(LANGUAGE_KEY));
    }

    #[test]
    fn write_failures_keep_the_in_memory_value() {
        let backend = MemBackend::new();
        let mut prefs = PreferenceStore::new(&backend);
        backend.set_simulate_write_error(true);
        prefs.set_view_mode(ViewMode::List);
        assert_eq!(prefs.view_mode(), ViewMode::List);
    }

    #[test]
    fn nonstandard_but_positive_page_sizes_are_accepted() {
        let mut prefs = PreferenceStore::new(MemBackend::new());
        prefs.set_items_per_page(7);
        assert_eq!(prefs.items_per_page(), 7);
        assert!(!ITEMS_PER_PAGE_OPTIONS.contains(&7));
    }
}
