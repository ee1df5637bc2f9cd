//! The in-memory, observable todo collection.
//!
//! `TodoManager` is the single owner of the ordered todo sequence. Callers
//! mutate it only through `add`, `edit`, `remove` and `duplicate`; everything
//! handed back is a snapshot. Insertion order is display order, and the
//! `unchecked`/`checked` views are recomputed from the live sequence on every
//! call.
//!
//! All state sits behind one mutex that each operation holds for its whole
//! duration, so the store can be shared as `Arc<TodoManager>` and the derived
//! views never observe a half-applied mutation.
//!
//! Observers call `subscribe` and receive a channel. Every successful mutation
//! pushes the full current sequence to each subscriber while the lock is still
//! held, which keeps notifications in mutation order. Delivery is deferred: a
//! subscriber drains its channel on its own next turn, so no user code ever
//! runs under the store lock and `unsubscribe` is safe from anywhere.

use std::sync::mpsc::{self, Receiver, Sender, TryIter};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, trace, warn};

use crate::error::{Result, TodoError};
use crate::time::SharedClock;
use crate::todo::{TodoId, TodoItem, TodoPatch};

/// What the store accepts as a title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitlePolicy {
    /// Any text, including the empty string.
    #[default]
    AcceptAny,
    /// Titles that are empty or whitespace-only fail with `InvalidArgument`.
    RejectEmpty,
}

impl TitlePolicy {
    fn check(self, title: &str) -> Result<()> {
        match self {
            TitlePolicy::AcceptAny => Ok(()),
            TitlePolicy::RejectEmpty if title.trim().is_empty() => {
                Err(TodoError::invalid_argument("title must not be empty"))
            }
            TitlePolicy::RejectEmpty => Ok(()),
        }
    }
}

/// A change notification: the whole collection right after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub items: Vec<TodoItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a subscription.
///
/// Dropping it is enough to stop delivery; the store prunes the dead sender
/// on its next notification.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<Notification>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Next pending notification, if one has been delivered.
    pub fn try_next(&self) -> Option<Notification> {
        self.receiver.try_recv().ok()
    }

    /// All notifications delivered so far, oldest first.
    pub fn drain(&self) -> TryIter<'_, Notification> {
        self.receiver.try_iter()
    }
}

#[derive(Debug)]
struct Inner {
    items: Vec<TodoItem>,
    last_id: u64,
    subscribers: Vec<(SubscriptionId, Sender<Notification>)>,
    last_subscription: u64,
}

impl Inner {
    fn next_id(&mut self) -> TodoId {
        self.last_id += 1;
        TodoId::new(self.last_id)
    }

    fn position(&self, id: TodoId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TodoError::NotFound(id))
    }

    fn notify(&mut self) {
        let notification = Notification {
            items: self.items.clone(),
        };
        self.subscribers.retain(|(id, sender)| {
            let alive = sender.send(notification.clone()).is_ok();
            if !alive {
                trace!("dropping subscriber {id:?} with closed receiver");
            }
            alive
        });
    }
}

#[derive(Debug)]
pub struct TodoManager {
    inner: Mutex<Inner>,
    clock: SharedClock,
    policy: TitlePolicy,
}

impl TodoManager {
    pub fn new(clock: SharedClock) -> Self {
        Self::with_policy(clock, TitlePolicy::default())
    }

    pub fn with_policy(clock: SharedClock, policy: TitlePolicy) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: Vec::new(),
                last_id: 0,
                subscribers: Vec::new(),
                last_subscription: 0,
            }),
            clock,
            policy,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a new unchecked item and return a snapshot of it.
    pub fn add<S: Into<String>>(&self, title: S) -> Result<TodoItem> {
        let title = title.into();
        if let Err(err) = self.policy.check(&title) {
            warn!("add rejected: {err}");
            return Err(err);
        }

        let mut inner = self.lock();
        let id = inner.next_id();
        let item = TodoItem::new(id, title, self.clock.now());
        inner.items.push(item.clone());
        debug!("added {} {:?}", item.id, item.title);
        inner.notify();
        Ok(item)
    }

    /// Apply `patch` to the item with `id`.
    ///
    /// `updated_at` is stamped on every successful edit, even when the patch
    /// is empty or repeats the current values.
    pub fn edit(&self, id: TodoId, patch: TodoPatch) -> Result<TodoItem> {
        if let Some(title) = &patch.title
            && let Err(err) = self.policy.check(title)
        {
            warn!("edit of {id} rejected: {err}");
            return Err(err);
        }

        let mut inner = self.lock();
        let index = inner.position(id).inspect_err(|err| warn!("edit failed: {err}"))?;
        let item = &mut inner.items[index];
        patch.apply(item, self.clock.now());
        let item = item.clone();
        debug!(
            "edited {} title={:?} checked={}",
            item.id, item.title, item.checked
        );
        inner.notify();
        Ok(item)
    }

    /// Remove the item with `id`, keeping the relative order of the rest.
    pub fn remove(&self, id: TodoId) -> Result<()> {
        let mut inner = self.lock();
        let index = inner
            .position(id)
            .inspect_err(|err| warn!("remove failed: {err}"))?;
        let removed = inner.items.remove(index);
        debug!("removed {} {:?}", removed.id, removed.title);
        inner.notify();
        Ok(())
    }

    /// Append a copy of the item with `id` under a new id.
    pub fn duplicate(&self, id: TodoId) -> Result<TodoItem> {
        let mut inner = self.lock();
        let index = inner
            .position(id)
            .inspect_err(|err| warn!("duplicate failed: {err}"))?;
        let new_id = inner.next_id();
        let copy = inner.items[index].duplicate(new_id, self.clock.now());
        inner.items.push(copy.clone());
        debug!("duplicated {id} as {}", copy.id);
        inner.notify();
        Ok(copy)
    }

    pub fn get(&self, id: TodoId) -> Option<TodoItem> {
        self.lock().items.iter().find(|item| item.id == id).cloned()
    }

    /// The whole collection in display order.
    pub fn items(&self) -> Vec<TodoItem> {
        self.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Items still to do, in collection order.
    pub fn unchecked(&self) -> Vec<TodoItem> {
        self.filtered(false)
    }

    /// Completed items, in collection order.
    pub fn checked(&self) -> Vec<TodoItem> {
        self.filtered(true)
    }

    fn filtered(&self, checked: bool) -> Vec<TodoItem> {
        self.lock()
            .items
            .iter()
            .filter(|item| item.checked == checked)
            .cloned()
            .collect()
    }

    /// Register for change notifications.
    ///
    /// The channel behind the returned `Subscription` is unbounded. Holders
    /// must drain it regularly or drop it (or call `unsubscribe`), otherwise
    /// every later mutation keeps queueing a full snapshot for them.
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        let mut inner = self.lock();
        inner.last_subscription += 1;
        let id = SubscriptionId(inner.last_subscription);
        inner.subscribers.push((id, sender));
        debug!("subscriber {id:?} registered");
        Subscription { id, receiver }
    }

    /// Stop notifications for `id`. Returns false if it was not subscribed.
    ///
    /// Notifications already delivered stay readable on the `Subscription`.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub, _)| *sub != id);
        let removed = inner.subscribers.len() != before;
        if removed {
            debug!("subscriber {id:?} released");
        }
        removed
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}
