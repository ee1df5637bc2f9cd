//! Startup data shown on first launch.

use std::sync::Arc;

use log::info;

use crate::config::{SAMPLE_TITLES, Settings};
use crate::error::Result;
use crate::manager::TodoManager;
use crate::time::SharedClock;
use crate::todo::TodoPatch;

/// Add the two sample todos and mark the second one done.
pub fn seed_samples(manager: &TodoManager) -> Result<()> {
    let [first, second] = SAMPLE_TITLES;
    manager.add(first)?;
    let second = manager.add(second)?;
    manager.edit(second.id, TodoPatch::checked(true))?;
    info!("seeded {} sample todos", SAMPLE_TITLES.len());
    Ok(())
}

/// Build the shared store the binary runs against.
pub fn build_manager(settings: &Settings, clock: SharedClock) -> Result<Arc<TodoManager>> {
    let manager = TodoManager::with_policy(clock, settings.title_policy());
    if settings.seed_samples {
        seed_samples(&manager)?;
    }
    Ok(Arc::new(manager))
}
