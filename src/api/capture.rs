use std::path::Path;

use log::Level;
use serde_json::json;

use super::errors::{id_str, ApiError};
use super::OwnershipSync;
use crate::logging::audit::AuditCtx;
use crate::logging::{AuditSink, FactsEmitter, StageLogger};
use crate::osdata::OsDataGetter;
use crate::types::{FileRecord, OwnershipInfo, SafePath};

pub(crate) fn run<E: FactsEmitter, A: AuditSink>(
    api: &OwnershipSync<E, A>,
    record: &mut FileRecord,
    stat: &OwnershipInfo,
) -> Result<(), ApiError> {
    if !api.policy.capture.enabled {
        return Ok(());
    }
    let ctx = AuditCtx::new(&api.facts, api.handler.os_tag());
    let slog = StageLogger::new(&ctx);

    match api.handler.get_os_data(record, stat) {
        Ok(pd) => {
            let tags: Vec<String> = pd.iter().map(|(tag, _)| tag.to_string()).collect();
            record.private_data.merge(pd);
            slog.capture()
                .path(record.name.clone())
                .merge(json!({
                    "uid": stat.uid,
                    "gid": stat.gid,
                    "tags": tags,
                }))
                .emit_success();
            Ok(())
        }
        Err(e) => Err(fail(api, &slog, &record.name, ApiError::from_capture(e))),
    }
}

pub(crate) fn run_rooted<E: FactsEmitter, A: AuditSink>(
    api: &OwnershipSync<E, A>,
    record: &mut FileRecord,
    root: &Path,
) -> Result<(), ApiError> {
    if !api.policy.capture.enabled {
        return Ok(());
    }
    let stat = SafePath::from_record_name(root, &record.name)
        .and_then(|sp| api.oracle.owner_of(&sp))
        .map_err(ApiError::from_capture);
    match stat {
        Ok(stat) => run(api, record, &stat),
        Err(err) => {
            let ctx = AuditCtx::new(&api.facts, api.handler.os_tag());
            let slog = StageLogger::new(&ctx);
            Err(fail(api, &slog, &record.name, err))
        }
    }
}

fn fail<E: FactsEmitter, A: AuditSink>(
    api: &OwnershipSync<E, A>,
    slog: &StageLogger<'_>,
    name: &str,
    err: ApiError,
) -> ApiError {
    api.audit.log(Level::Warn, &format!("capture of {name} failed: {err}"));
    slog.capture()
        .path(name)
        .field("error_id", json!(id_str(err.id())))
        .field("error", json!(err.to_string()))
        .emit_failure();
    err
}
