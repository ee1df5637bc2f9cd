//! A single-screen TODO list built around an observable in-memory store.
//!
//! [`manager::TodoManager`] owns the ordered collection and is the only thing
//! that mutates it. The [`ui`] module is a thin terminal shell that issues
//! explicit store calls and re-renders when notified.

pub mod config;
pub mod error;
pub mod manager;
pub mod samples;
pub mod time;
pub mod todo;
pub mod ui;

pub use error::{Result, TodoError};
pub use manager::{Notification, Subscription, SubscriptionId, TitlePolicy, TodoManager};
pub use todo::{TodoId, TodoItem, TodoPatch};
