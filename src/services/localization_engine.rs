use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::types::errors::LocaleError;

/// Supported locales.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "ar"];

/// Locale used when nothing else is configured or detected.
pub const DEFAULT_LOCALE: &str = "en";

const BUNDLED_EN: &str = include_str!("../../locales/en.json");
const BUNDLED_AR: &str = include_str!("../../locales/ar.json");

/// Layout direction of a locale's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Trait defining the localization engine interface.
pub trait LocalizationEngineTrait {
    fn initialize(&mut self) -> Result<(), LocaleError>;
    fn set_locale(&mut self, lang: &str) -> Result<(), LocaleError>;
    fn toggle_locale(&mut self) -> Result<&str, LocaleError>;
    fn get_locale(&self) -> &str;
    fn text_direction(&self) -> TextDirection;
    fn t(&self, key: &str, params: Option<&HashMap<String, String>>) -> String;
    fn plural(&self, key: &str, count: u64, params: Option<&HashMap<String, String>>) -> String;
    fn detect_system_locale(&self) -> String;
    fn get_available_locales(&self) -> Vec<String>;
}

/// Where locale catalogues come from.
enum LocaleSource {
    Directory(PathBuf),
    Bundled,
}

/// Translation lookup for English and Arabic.
pub struct LocalizationEngine {
    current_locale: String,
    /// Parsed catalogue per locale code.
    locales: HashMap<String, Value>,
    source: LocaleSource,
}

impl LocalizationEngine {
    /// Engine reading `<locale>.json` files from `locales_dir`.
    pub fn new(locales_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_locale: DEFAULT_LOCALE.to_string(),
            locales: HashMap::new(),
            source: LocaleSource::Directory(locales_dir.into()),
        }
    }

    /// Engine using the catalogues compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            current_locale: DEFAULT_LOCALE.to_string(),
            locales: HashMap::new(),
            source: LocaleSource::Bundled,
        }
    }

    fn parse(name: &str, content: &str) -> Result<Value, LocaleError> {
        serde_json::from_str(content)
            .map_err(|e| LocaleError::FileNotFound(format!("Failed to parse {}: {}", name, e)))
    }

    /// Dot-notation lookup, so nested catalogues (`"auth.login"`) also work.
    fn lookup_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
        if let Some(v) = data.get(key) {
            return Some(v);
        }
        key.split('.').try_fold(data, |current, part| current.get(part))
    }

    /// Replaces `{name}` placeholders with values from `params`.
    fn interpolate(template: &str, params: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in params {
            result = result.replace(&format!("{{{}}}", key), value);
        }
        result
    }

    /// CLDR plural categories for Arabic.
    fn arabic_plural_form(count: u64) -> &'static str {
        let mod100 = count % 100;
        match count {
            0 => "zero",
            1 => "one",
            2 => "two",
            _ if (3..=10).contains(&mod100) => "few",
            _ if (11..=99).contains(&mod100) => "many",
            _ => "other",
        }
    }

    fn english_plural_form(count: u64) -> &'static str {
        if count == 1 {
            "one"
        } else {
            "other"
        }
    }

    fn get_plural_form(&self, count: u64) -> &'static str {
        match self.current_locale.as_str() {
            "ar" => Self::arabic_plural_form(count),
            _ => Self::english_plural_form(count),
        }
    }
}

impl LocalizationEngineTrait for LocalizationEngine {
    /// Loads every supported catalogue that is available. At least one must load.
    fn initialize(&mut self) -> Result<(), LocaleError> {
        match &self.source {
            LocaleSource::Bundled => {
                self.locales.insert("en".to_string(), Self::parse("en.json", BUNDLED_EN)?);
                self.locales.insert("ar".to_string(), Self::parse("ar.json", BUNDLED_AR)?);
            }
            LocaleSource::Directory(dir) => {
                if !dir.exists() {
                    return Err(LocaleError::FileNotFound(dir.to_string_lossy().to_string()));
                }
                for locale in SUPPORTED_LOCALES {
                    let file_path = dir.join(format!("{}.json", locale));
                    if !file_path.exists() {
                        continue;
                    }
                    let name = file_path.to_string_lossy().to_string();
                    let content = fs::read_to_string(&file_path)
                        .map_err(|e| LocaleError::FileNotFound(format!("{}: {}", name, e)))?;
                    let data = Self::parse(&name, &content)?;
                    self.locales.insert(locale.to_string(), data);
                }
            }
        }

        if self.locales.is_empty() {
            return Err(LocaleError::FileNotFound("No locale files found".to_string()));
        }
        Ok(())
    }

    fn set_locale(&mut self, lang: &str) -> Result<(), LocaleError> {
        if !SUPPORTED_LOCALES.contains(&lang) {
            return Err(LocaleError::UnsupportedLocale(lang.to_string()));
        }
        if !self.locales.contains_key(lang) {
            return Err(LocaleError::FileNotFound(format!("Locale '{}' not loaded", lang)));
        }
        self.current_locale = lang.to_string();
        Ok(())
    }

    /// Switches between English and Arabic and returns the new locale.
    fn toggle_locale(&mut self) -> Result<&str, LocaleError> {
        let next = if self.current_locale == "ar" { "en" } else { "ar" };
        self.set_locale(next)?;
        Ok(&self.current_locale)
    }

    fn get_locale(&self) -> &str {
        &self.current_locale
    }

    fn text_direction(&self) -> TextDirection {
        if self.current_locale == "ar" {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    /// Translates `key`, returning the key itself when no translation exists.
    fn t(&self, key: &str, params: Option<&HashMap<String, String>>) -> String {
        let text = self
            .locales
            .get(&self.current_locale)
            .and_then(|data| Self::lookup_key(data, key))
            .and_then(Value::as_str);

        match (text, params) {
            (Some(text), Some(p)) => Self::interpolate(text, p),
            (Some(text), None) => text.to_string(),
            (None, _) => key.to_string(),
        }
    }

    /// Looks up `<key>_<form>` for the locale's plural form, then `<key>_other`,
    /// then gives back `key`. `{count}` is always available to the template.
    fn plural(&self, key: &str, count: u64, params: Option<&HashMap<String, String>>) -> String {
        let mut merged = params.cloned().unwrap_or_default();
        merged
            .entry("count".to_string())
            .or_insert_with(|| count.to_string());

        for form in [self.get_plural_form(count), "other"] {
            let plural_key = format!("{}_{}", key, form);
            let result = self.t(&plural_key, Some(&merged));
            if result != plural_key {
                return result;
            }
        }
        key.to_string()
    }

    /// Language code from `LC_ALL` or `LANG` (e.g. `ar_EG.UTF-8` → `ar`), else `en`.
    fn detect_system_locale(&self) -> String {
        let lang = std::env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var("LANG").ok())
            .unwrap_or_default();

        let code = lang
            .split(['_', '.', '-'])
            .next()
            .unwrap_or("")
            .to_lowercase();

        if SUPPORTED_LOCALES.contains(&code.as_str()) {
            code
        } else {
            DEFAULT_LOCALE.to_string()
        }
    }

    fn get_available_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.locales.keys().cloned().collect();
        locales.sort();
        locales
    }
}
