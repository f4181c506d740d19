// Audit helpers that emit facts for the capture and replay stages.
//
// Every fact carries a minimal envelope: `schema_version`, `ts`, `os`,
// `stage`, `path` and `decision`.
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::constants::FACTS_SUBSYSTEM;
use crate::logging::FactsEmitter;
use crate::types::OsTag;

pub(crate) const SCHEMA_VERSION: i64 = 1;

pub const TS_ZERO: &str = "1970-01-01T00:00:00Z";

pub fn now_iso() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| TS_ZERO.to_string())
}

pub(crate) struct AuditCtx<'a> {
    pub facts: &'a dyn FactsEmitter,
    pub os: OsTag,
    pub ts: String,
}

impl<'a> AuditCtx<'a> {
    pub(crate) fn new(facts: &'a dyn FactsEmitter, os: OsTag) -> Self {
        Self {
            facts,
            os,
            ts: now_iso(),
        }
    }
}

/// Stage for typed audit emission.
#[derive(Clone, Copy, Debug)]
pub enum Stage {
    Capture,
    Replay,
}

impl Stage {
    fn as_event(self) -> &'static str {
        match self {
            Stage::Capture => "capture",
            Stage::Replay => "replay",
        }
    }
}

/// Decision severity for audit events.
#[derive(Clone, Copy, Debug)]
pub enum Decision {
    Success,
    Failure,
    Warn,
}

impl Decision {
    fn as_str(self) -> &'static str {
        match self {
            Decision::Success => "success",
            Decision::Failure => "failure",
            Decision::Warn => "warn",
        }
    }
}

/// Builder facade over audit emission with a centralized envelope.
pub struct StageLogger<'a> {
    ctx: &'a AuditCtx<'a>,
}

impl<'a> StageLogger<'a> {
    pub(crate) fn new(ctx: &'a AuditCtx<'a>) -> Self {
        Self { ctx }
    }

    pub fn capture(&self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Capture)
    }

    pub fn replay(&self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Replay)
    }
}

pub struct EventBuilder<'a> {
    ctx: &'a AuditCtx<'a>,
    stage: Stage,
    fields: serde_json::Map<String, Value>,
}

impl<'a> EventBuilder<'a> {
    fn new(ctx: &'a AuditCtx<'a>, stage: Stage) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("stage".to_string(), json!(stage.as_event()));
        Self { ctx, stage, fields }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.fields.insert("path".into(), json!(path.into()));
        self
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn merge(mut self, extra: Value) -> Self {
        if let Value::Object(obj) = extra {
            self.fields.extend(obj);
        }
        self
    }

    pub fn emit(self, decision: Decision) {
        let mut fields = self.fields;
        fields.entry("schema_version").or_insert(json!(SCHEMA_VERSION));
        fields.entry("ts").or_insert(json!(self.ctx.ts));
        fields.entry("os").or_insert(json!(self.ctx.os.as_str()));
        fields.entry("path").or_insert(json!(""));
        fields.entry("decision").or_insert(json!(decision.as_str()));
        self.ctx.facts.emit(
            FACTS_SUBSYSTEM,
            self.stage.as_event(),
            decision.as_str(),
            Value::Object(fields),
        );
    }

    pub fn emit_success(self) {
        self.emit(Decision::Success)
    }

    pub fn emit_failure(self) {
        self.emit(Decision::Failure)
    }

    pub fn emit_warn(self) {
        self.emit(Decision::Warn)
    }
}
