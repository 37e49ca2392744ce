use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// Customer record as returned by the user directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// Absent or `null` means the account is active.
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Only an explicit `false` marks the account as blocked.
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match against first name, last name or email.
    ///
    /// `term` must already be lower-cased.
    pub fn matches(&self, term: &str) -> bool {
        term.is_empty()
            || self.first_name.to_lowercase().contains(term)
            || self.last_name.to_lowercase().contains(term)
            || self.email.to_lowercase().contains(term)
    }
}

/// One page of a server-side listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 0,
        }
    }
}
