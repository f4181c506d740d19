use std::path::Path;

use log::{warn, Level};
use serde_json::json;

use super::errors::{id_str, ApiError};
use super::OwnershipSync;
use crate::logging::audit::AuditCtx;
use crate::logging::{AuditSink, FactsEmitter, StageLogger};
use crate::osdata::OsDataSetter;
use crate::types::{FileRecord, ReplayOutcome};

pub(crate) fn run<E: FactsEmitter, A: AuditSink>(
    api: &OwnershipSync<E, A>,
    record: &FileRecord,
    path: &Path,
) -> Result<ReplayOutcome, ApiError> {
    if !api.policy.replay.enabled {
        return Ok(ReplayOutcome::NoData);
    }
    let ctx = AuditCtx::new(&api.facts, api.handler.os_tag());
    let slog = StageLogger::new(&ctx);

    match api.handler.set_os_data(record, path) {
        Ok(ReplayOutcome::NoData) => {
            slog.replay()
                .path(record.name.clone())
                .field("reason", json!("no_data"))
                .emit_warn();
            Ok(ReplayOutcome::NoData)
        }
        Ok(outcome) => {
            slog.replay()
                .path(record.name.clone())
                .merge(serde_json::to_value(&outcome).unwrap_or_default())
                .emit_success();
            Ok(outcome)
        }
        Err(e) => {
            let err = ApiError::from_replay(e);
            warn!("ownsync: keeping default ownership for {}: {err}", path.display());
            api.audit.log(
                Level::Warn,
                &format!("replay of {} onto {} failed: {err}", record.name, path.display()),
            );
            slog.replay()
                .path(record.name.clone())
                .field("error_id", json!(id_str(err.id())))
                .field("error", json!(err.to_string()))
                .emit_failure();
            Err(err)
        }
    }
}
