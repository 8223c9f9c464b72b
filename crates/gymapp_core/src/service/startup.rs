//! Production store wiring.
//!
//! # Responsibility
//! - Open the process-wide stores once and assemble the gateway and
//!   scheduler the presentation layer uses.
//!
//! # Invariants
//! - A primary-store open failure degrades to mirror-only operation; it
//!   never aborts startup.

use crate::db::open_db;
use crate::service::gateway::{PrimaryCollections, RecordGateway};
use crate::service::retention::RetentionScheduler;
use crate::store::{JsonFileCollection, JsonFileSchedulerState};
use log::warn;
use std::path::Path;
use std::rc::Rc;

pub const PRIMARY_DB_FILE: &str = "gymapp.db";
pub const MIRROR_FILE: &str = "day_entries.json";
pub const SCHEDULER_STATE_FILE: &str = "scheduler_state.json";

/// Everything a host needs to run the persistence core.
pub struct CoreServices {
    pub gateway: RecordGateway,
    pub scheduler: RetentionScheduler<JsonFileSchedulerState>,
}

/// Opens the stores under `data_dir` and wires the services.
///
/// The SQLite primary lives at `gymapp.db`; the day-entry mirror and the
/// scheduler marker are JSON files beside it. The caller is expected to
/// invoke `scheduler.run_at_startup(&gateway)` exactly once afterwards.
pub fn open_core(data_dir: impl AsRef<Path>) -> CoreServices {
    let data_dir = data_dir.as_ref();

    let primary = match open_db(data_dir.join(PRIMARY_DB_FILE)) {
        Ok(conn) => Some(PrimaryCollections::sqlite(Rc::new(conn))),
        Err(err) => {
            warn!("event=core_init module=startup status=degraded primary_error={err}");
            None
        }
    };

    let mirror: JsonFileCollection<crate::model::DayEntry> =
        JsonFileCollection::new(data_dir.join(MIRROR_FILE));
    let gateway = RecordGateway::new(primary, Box::new(mirror));
    let scheduler = RetentionScheduler::new(JsonFileSchedulerState::new(
        data_dir.join(SCHEDULER_STATE_FILE),
    ));

    CoreServices { gateway, scheduler }
}
