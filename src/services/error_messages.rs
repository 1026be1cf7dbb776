//! Maps identity-provider error codes to user-facing translation keys.

use crate::services::localization_engine::{LocalizationEngine, LocalizationEngineTrait};

/// Translation key for an identity-provider error code such as `auth/wrong-password`.
pub fn friendly_error_key(code: &str) -> &'static str {
    match code {
        "auth/invalid-credential" | "auth/wrong-password" | "auth/invalid-email" => {
            "err_invalid_login"
        }
        "auth/user-not-found" => "err_user_not_found",
        "auth/email-already-in-use" => "err_email_exists",
        "auth/weak-password" => "err_weak_pass",
        _ => "err_generic",
    }
}

/// The translated message for `code` in the engine's current locale.
pub fn friendly_error_message(code: &str, i18n: &LocalizationEngine) -> String {
    i18n.t(friendly_error_key(code), None)
}
