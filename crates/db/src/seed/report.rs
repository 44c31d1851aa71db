//! Progress reporting for the seed orchestrator.
//!
//! The orchestrator never logs directly. It emits [`SeedEvent`]s to an
//! injected [`SeedReporter`]; [`TracingReporter`] is the production default.

use std::sync::Mutex;

use super::{Category, SeedStage};

/// Something that happened while seeding, reconciling or cleaning up.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedEvent {
    /// Roles were absent; the one-shot bulk insert is starting.
    FreshSeedStarted,
    StageCompleted { stage: SeedStage, rows: u64 },
    FreshSeedCommitted,
    FreshSeedRolledBack { stage: SeedStage, error: String },
    /// Roles already exist; categories are reconciled independently.
    ReconcileStarted { existing_roles: i64 },
    CategoryInserted { category: Category, rows: u64 },
    CategoryPatched { category: Category, rows: u64 },
    CategoryActivated { category: Category, rows: u64 },
    /// A reconcile step failed; other steps and categories carry on.
    CategoryWarning { category: Category, error: String },
    TableCleared { table: &'static str, rows: u64 },
    TableCleanupFailed { table: &'static str, error: String },
}

impl SeedEvent {
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            SeedEvent::FreshSeedRolledBack { .. }
                | SeedEvent::CategoryWarning { .. }
                | SeedEvent::TableCleanupFailed { .. }
        )
    }
}

/// Receives seed progress events.
pub trait SeedReporter: Send + Sync {
    fn report(&self, event: SeedEvent);
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl SeedReporter for TracingReporter {
    fn report(&self, event: SeedEvent) {
        match event {
            SeedEvent::FreshSeedStarted => {
                tracing::info!("No roles found, performing fresh seed");
            }
            SeedEvent::StageCompleted { stage, rows } => {
                tracing::info!(%stage, rows, "Seed stage completed");
            }
            SeedEvent::FreshSeedCommitted => {
                tracing::info!("Fresh seed committed");
            }
            SeedEvent::FreshSeedRolledBack { stage, error } => {
                tracing::warn!(%stage, %error, "Fresh seed rolled back");
            }
            SeedEvent::ReconcileStarted { existing_roles } => {
                tracing::info!(existing_roles, "Baseline present, reconciling reference data");
            }
            SeedEvent::CategoryInserted { category, rows } => {
                tracing::info!(%category, rows, "Inserted missing reference rows");
            }
            SeedEvent::CategoryPatched { category, rows } => {
                tracing::info!(%category, rows, "Patched reference rows missing attributes");
            }
            SeedEvent::CategoryActivated { category, rows } => {
                tracing::info!(%category, rows, "Activated rows with indeterminate flag");
            }
            SeedEvent::CategoryWarning { category, error } => {
                tracing::warn!(%category, %error, "Reconcile step failed, skipping");
            }
            SeedEvent::TableCleared { table, rows } => {
                tracing::info!(table, rows, "Cleared table");
            }
            SeedEvent::TableCleanupFailed { table, error } => {
                tracing::warn!(table, %error, "Failed to clear table, continuing");
            }
        }
    }
}

/// Keeps every event in memory. Useful for tests and for surfacing a run
/// summary to callers.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<SeedEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SeedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<SeedEvent> {
        self.events()
            .into_iter()
            .filter(SeedEvent::is_warning)
            .collect()
    }
}

impl SeedReporter for RecordingReporter {
    fn report(&self, event: SeedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
