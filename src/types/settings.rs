use serde::{Deserialize, Serialize};

/// Top-level application settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub general: GeneralSettings,
    pub appearance: AppearanceSettings,
    pub search: SearchSettings,
    pub pagination: PaginationSettings,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    pub language: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

/// Appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppearanceSettings {
    pub theme: ThemeMode,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::System,
        }
    }
}

/// Incremental search tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSettings {
    /// Quiescence window before a typed query is applied.
    pub debounce_ms: u64,
    /// Maximum number of results shown in the dropdown.
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            max_results: 8,
        }
    }
}

/// Dashboard paging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationSettings {
    pub page_size: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self { page_size: 12 }
    }
}
