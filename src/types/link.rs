use serde::{Deserialize, Serialize};
use url::Url;

/// Glyph shown when a link has no icon of its own.
pub const DEFAULT_ICON: &str = "🔗";

/// Fixed mask rendered in place of a hidden password.
pub const PASSWORD_MASK: &str = "••••••••";

/// Prefix marking an icon as an embedded image payload rather than a glyph.
pub const IMAGE_ICON_PREFIX: &str = "data:image";

/// A saved website/service entry owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub note: Option<String>,
    pub accounts: Vec<Account>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A credential nested under a link. Stored in plaintext.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub title: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Client-side input for creating or replacing a link.
///
/// Identity and timestamps are never part of a draft; the store assigns them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LinkDraft {
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// How a link's icon should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkIcon<'a> {
    /// Short emoji or text glyph.
    Glyph(&'a str),
    /// Embedded `data:image/...` payload.
    Image(&'a str),
}

impl Link {
    /// Hostname of `link` with a leading `www.` removed.
    ///
    /// Missing or unparseable URLs yield `None` instead of an error.
    pub fn display_hostname(&self) -> Option<String> {
        let raw = self.link.as_deref()?;
        let parsed = Url::parse(raw).ok()?;
        let host = parsed.host_str()?;
        let host = host.strip_prefix("www.").unwrap_or(host);
        if host.is_empty() {
            None
        } else {
            Some(host.to_string())
        }
    }

    pub fn icon(&self) -> LinkIcon<'_> {
        match self.icon.as_deref() {
            Some(icon) if icon.starts_with(IMAGE_ICON_PREFIX) => LinkIcon::Image(icon),
            Some(icon) if !icon.is_empty() => LinkIcon::Glyph(icon),
            _ => LinkIcon::Glyph(DEFAULT_ICON),
        }
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl Account {
    /// The account label, or `None` when the generic "main account" label applies.
    pub fn display_title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    pub fn display_email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }

    /// Password as shown in a card: the plaintext when revealed, else a fixed mask.
    /// Accounts without a password show nothing.
    pub fn display_password(&self, revealed: bool) -> Option<&str> {
        let password = non_empty(self.password.as_deref())?;
        Some(if revealed { password } else { PASSWORD_MASK })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
