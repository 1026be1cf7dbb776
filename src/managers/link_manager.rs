//! Link Manager for LinkSaver.
//!
//! Implements `LinkManagerTrait`: per-user CRUD for links and their
//! accounts, backed by SQLite via `rusqlite`, plus live snapshot
//! subscriptions: every mutation re-delivers the owner's full collection
//! (newest first) to that owner's subscribers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use url::Url;
use uuid::Uuid;

use crate::database::connection::Database;
use crate::types::errors::LinkError;
use crate::types::link::{Account, Link, LinkDraft, IMAGE_ICON_PREFIX};

/// Receives a full replacement snapshot of one user's links.
pub type SnapshotListener = Box<dyn FnMut(&[Link]) + Send>;

/// Handle returned by [`LinkManagerTrait::subscribe`].
pub type SubscriptionId = u64;

/// Trait defining link store operations.
pub trait LinkManagerTrait {
    fn create_link(&mut self, user_id: &str, draft: &LinkDraft) -> Result<String, LinkError>;
    fn update_link(&mut self, user_id: &str, id: &str, draft: &LinkDraft) -> Result<(), LinkError>;
    /// Deleting an id that does not exist is not an error.
    fn delete_link(&mut self, user_id: &str, id: &str) -> Result<(), LinkError>;
    fn get_link(&self, user_id: &str, id: &str) -> Result<Link, LinkError>;
    /// All links of `user_id`, newest first.
    fn list_links(&self, user_id: &str) -> Result<Vec<Link>, LinkError>;
    /// Registers `listener` and immediately delivers the current snapshot.
    fn subscribe(&mut self, user_id: &str, listener: SnapshotListener) -> Result<SubscriptionId, LinkError>;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

struct Subscription {
    id: SubscriptionId,
    user_id: String,
    listener: SnapshotListener,
}

/// Link store backed by the shared SQLite database.
pub struct LinkManager {
    db: Arc<Database>,
    subscriptions: Vec<Subscription>,
    next_subscription_id: SubscriptionId,
}

/// Checks a draft and normalizes empty optional strings to `None`.
///
/// Name is required; a URL must be absolute; an image icon must carry a
/// base64 `data:image/...` payload.
pub fn validate_draft(draft: &LinkDraft) -> Result<LinkDraft, LinkError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(LinkError::InvalidInput("name is required".to_string()));
    }

    let link = normalize(&draft.link);
    if let Some(url) = &link {
        Url::parse(url).map_err(|e| LinkError::InvalidInput(format!("invalid url '{}': {}", url, e)))?;
    }

    let icon = normalize(&draft.icon);
    if let Some(icon) = &icon {
        if icon.starts_with(IMAGE_ICON_PREFIX) {
            validate_image_icon(icon)?;
        }
    }

    let accounts = draft
        .accounts
        .iter()
        .map(|a| Account {
            title: normalize(&a.title),
            email: normalize(&a.email),
            password: a.password.clone().filter(|p| !p.is_empty()),
        })
        .collect();

    Ok(LinkDraft {
        name: name.to_string(),
        link,
        icon,
        note: normalize(&draft.note),
        accounts,
    })
}

fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_image_icon(icon: &str) -> Result<(), LinkError> {
    let (header, payload) = icon
        .split_once(',')
        .ok_or_else(|| LinkError::InvalidInput("image icon has no payload".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(LinkError::InvalidInput("image icon must be base64 encoded".to_string()));
    }
    BASE64
        .decode(payload)
        .map_err(|e| LinkError::InvalidInput(format!("image icon payload: {}", e)))?;
    Ok(())
}

impl LinkManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            subscriptions: Vec::new(),
            next_subscription_id: 1,
        }
    }

    fn conn(&self) -> &Connection {
        self.db.connection()
    }

    /// Current UNIX time in milliseconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    fn insert_accounts(conn: &Connection, link_id: &str, accounts: &[Account]) -> Result<(), LinkError> {
        let mut stmt = conn.prepare(
            "INSERT INTO link_accounts (link_id, position, title, email, password) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (position, account) in accounts.iter().enumerate() {
            stmt.execute(params![
                link_id,
                position as i64,
                account.title,
                account.email,
                account.password
            ])?;
        }
        Ok(())
    }

    fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<Link> {
        Ok(Link {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            link: row.get(3)?,
            icon: row.get(4)?,
            note: row.get(5)?,
            accounts: Vec::new(),
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn row_to_account(row: &rusqlite::Row) -> rusqlite::Result<Account> {
        Ok(Account {
            title: row.get(0)?,
            email: row.get(1)?,
            password: row.get(2)?,
        })
    }

    /// Pushes a fresh snapshot to every subscriber of `user_id`.
    fn notify(&mut self, user_id: &str) {
        if !self.subscriptions.iter().any(|s| s.user_id == user_id) {
            return;
        }
        let snapshot = match self.list_links(user_id) {
            Ok(links) => links,
            Err(e) => {
                warn!("Skipping snapshot delivery for {}: {}", user_id, e);
                return;
            }
        };
        for sub in self.subscriptions.iter_mut().filter(|s| s.user_id == user_id) {
            debug!("Delivering {} links to subscription {}", snapshot.len(), sub.id);
            (sub.listener)(&snapshot);
        }
    }
}

impl LinkManagerTrait for LinkManager {
    /// Stores a new link and returns its generated ID.
    fn create_link(&mut self, user_id: &str, draft: &LinkDraft) -> Result<String, LinkError> {
        let draft = validate_draft(draft)?;
        let id = Uuid::new_v4().to_string();
        let now = Self::now();

        {
            let tx = self.conn().unchecked_transaction()?;
            tx.execute(
                "INSERT INTO links (id, user_id, name, link, icon, note, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![id, user_id, draft.name, draft.link, draft.icon, draft.note, now, now],
            )?;
            Self::insert_accounts(&tx, &id, &draft.accounts)?;
            tx.commit()?;
        }

        self.notify(user_id);
        Ok(id)
    }

    /// Replaces every editable field of a link, including its account list.
    fn update_link(&mut self, user_id: &str, id: &str, draft: &LinkDraft) -> Result<(), LinkError> {
        let draft = validate_draft(draft)?;
        let now = Self::now();

        {
            let tx = self.conn().unchecked_transaction()?;
            let affected = tx.execute(
                "UPDATE links SET name = ?1, link = ?2, icon = ?3, note = ?4, updated_at = ?5 \
                 WHERE id = ?6 AND user_id = ?7",
                params![draft.name, draft.link, draft.icon, draft.note, now, id, user_id],
            )?;
            if affected == 0 {
                return Err(LinkError::NotFound(id.to_string()));
            }
            tx.execute("DELETE FROM link_accounts WHERE link_id = ?1", params![id])?;
            Self::insert_accounts(&tx, id, &draft.accounts)?;
            tx.commit()?;
        }

        self.notify(user_id);
        Ok(())
    }

    fn delete_link(&mut self, user_id: &str, id: &str) -> Result<(), LinkError> {
        let affected = self.conn().execute(
            "DELETE FROM links WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if affected > 0 {
            self.notify(user_id);
        }
        Ok(())
    }

    fn get_link(&self, user_id: &str, id: &str) -> Result<Link, LinkError> {
        let mut link = self
            .conn()
            .query_row(
                "SELECT id, user_id, name, link, icon, note, created_at, updated_at \
                 FROM links WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                Self::row_to_link,
            )
            .optional()?
            .ok_or_else(|| LinkError::NotFound(id.to_string()))?;

        let mut stmt = self.conn().prepare(
            "SELECT title, email, password FROM link_accounts WHERE link_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![id], Self::row_to_account)?;
        for row in rows {
            link.accounts.push(row?);
        }
        Ok(link)
    }

    fn list_links(&self, user_id: &str) -> Result<Vec<Link>, LinkError> {
        let mut accounts: HashMap<String, Vec<Account>> = HashMap::new();
        {
            let mut stmt = self.conn().prepare(
                "SELECT a.link_id, a.title, a.email, a.password FROM link_accounts a \
                 JOIN links l ON l.id = a.link_id \
                 WHERE l.user_id = ?1 ORDER BY a.link_id, a.position",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                let link_id: String = row.get(0)?;
                let account = Account {
                    title: row.get(1)?,
                    email: row.get(2)?,
                    password: row.get(3)?,
                };
                Ok((link_id, account))
            })?;
            for row in rows {
                let (link_id, account) = row?;
                accounts.entry(link_id).or_default().push(account);
            }
        }

        let mut stmt = self.conn().prepare(
            "SELECT id, user_id, name, link, icon, note, created_at, updated_at \
             FROM links WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![user_id], Self::row_to_link)?;

        let mut links = Vec::new();
        for row in rows {
            let mut link = row?;
            link.accounts = accounts.remove(&link.id).unwrap_or_default();
            links.push(link);
        }
        Ok(links)
    }

    fn subscribe(&mut self, user_id: &str, mut listener: SnapshotListener) -> Result<SubscriptionId, LinkError> {
        let snapshot = self.list_links(user_id)?;
        listener(&snapshot);

        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.subscriptions.push(Subscription {
            id,
            user_id: user_id.to_string(),
            listener,
        });
        debug!("Subscription {} opened for {}", id, user_id);
        Ok(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }
}
