//! Todo records as handed out by the store.
//!
//! A `TodoItem` is a plain value: the store keeps the authoritative copy and
//! every read returns a snapshot. Identity is a `TodoId` assigned by the store
//! from a monotonic counter, rendered as `T<N>`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub fn new(number: u64) -> Self {
        TodoId(number)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    pub(crate) fn new(id: TodoId, title: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            checked: false,
            created_at: now,
            updated_at: None,
        }
    }

    /// Copy title and completion state into a brand new record.
    ///
    /// The copy gets `id`, is created at `now` and has never been edited.
    pub fn duplicate(&self, id: TodoId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: self.title.clone(),
            checked: self.checked,
            created_at: now,
            updated_at: None,
        }
    }
}

/// Fields to change in an edit. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub checked: Option<bool>,
}

impl TodoPatch {
    pub fn title<S: Into<String>>(title: S) -> Self {
        Self {
            title: Some(title.into()),
            checked: None,
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            title: None,
            checked: Some(checked),
        }
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub(crate) fn apply(self, item: &mut TodoItem, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(checked) = self.checked {
            item.checked = checked;
        }
        // Stamped even when nothing actually changed.
        item.updated_at = Some(now);
    }
}
