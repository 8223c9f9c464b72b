//! Daily snapshot scheduler with bounded retention.
//!
//! # Responsibility
//! - Decide once per process start whether a diary snapshot is due,
//!   capture it, and prune snapshots beyond the retention bound.
//!
//! # Invariants
//! - The guard marker is persisted only after the snapshot landed; a
//!   failed capture leaves the marker untouched so the next start
//!   retries.
//! - Pruning keeps the newest snapshots by `ts`; position is decided by
//!   capture time, never by snapshot `date`.
//! - Nothing here surfaces an error to the user.

use crate::model::{today_key, BackupSnapshot, SchedulerState};
use crate::service::gateway::RecordGateway;
use crate::store::SchedulerStateStore;
use log::{info, warn};

/// How many daily snapshots are kept.
pub const SNAPSHOT_RETENTION_LIMIT: usize = 30;

/// Terminal outcome of one scheduler pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// The marker already names today; nothing to do.
    AlreadyRan,
    /// A snapshot was captured and the marker advanced.
    Created,
    /// Capture failed; marker untouched, next start retries.
    Deferred,
}

/// Once-per-start snapshot scheduler.
pub struct RetentionScheduler<S: SchedulerStateStore> {
    state_store: S,
    retention: usize,
}

impl<S: SchedulerStateStore> RetentionScheduler<S> {
    pub fn new(state_store: S) -> Self {
        Self {
            state_store,
            retention: SNAPSHOT_RETENTION_LIMIT,
        }
    }

    /// Overrides the retention bound. Exists for tests; production uses
    /// [`SNAPSHOT_RETENTION_LIMIT`].
    pub fn with_retention(state_store: S, retention: usize) -> Self {
        Self {
            state_store,
            retention,
        }
    }

    /// Runs the scheduler for the current local calendar day. Call once
    /// at process start.
    pub fn run_at_startup(&self, gateway: &RecordGateway) -> SnapshotOutcome {
        self.run_for_day(gateway, &today_key())
    }

    /// Scheduler pass for an explicit day key.
    pub fn run_for_day(&self, gateway: &RecordGateway, day_key: &str) -> SnapshotOutcome {
        let mut state = match self.state_store.load() {
            Ok(state) => state,
            Err(err) => {
                // An unreadable marker must not block the snapshot; the
                // worst case is one duplicate for today.
                warn!("event=auto_backup module=retention status=degraded error={err}");
                SchedulerState::default()
            }
        };

        if state.ran_on(day_key) {
            info!("event=auto_backup module=retention status=skipped day={day_key}");
            return SnapshotOutcome::AlreadyRan;
        }

        let snapshot = BackupSnapshot::capture(day_key, gateway.all_diary_entries());
        if let Err(err) = gateway.put_snapshot(&snapshot) {
            warn!("event=auto_backup module=retention status=deferred day={day_key} error={err}");
            return SnapshotOutcome::Deferred;
        }

        self.prune(gateway);

        state.last_auto_backup_date = Some(day_key.to_string());
        if let Err(err) = self.state_store.save(&state) {
            // The snapshot is safe; a stale marker only risks one extra
            // snapshot on the next start, which pruning absorbs.
            warn!("event=auto_backup module=retention status=marker_failed day={day_key} error={err}");
        }

        info!(
            "event=auto_backup module=retention status=created day={} logs={}",
            day_key,
            snapshot.logs.len()
        );
        SnapshotOutcome::Created
    }

    fn prune(&self, gateway: &RecordGateway) {
        let mut snapshots = gateway.all_snapshots();
        if snapshots.len() <= self.retention {
            return;
        }

        snapshots.sort_by(|a, b| b.ts.cmp(&a.ts).then_with(|| a.id.cmp(&b.id)));
        for stale in &snapshots[self.retention..] {
            gateway.delete_snapshot(&stale.id);
        }

        info!(
            "event=auto_backup module=retention status=pruned removed={}",
            snapshots.len() - self.retention
        );
    }
}
