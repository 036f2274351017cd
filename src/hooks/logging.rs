//! Invocation listener writing dispatch log lines

use serde_json::Value;

use super::{Invocation, InvocationListener};
use crate::handler::Handler;
use crate::logger::{self, DispatchLogEntry};

/// Writes one dispatch log line per handler invocation
#[derive(Debug, Clone)]
pub struct InvocationLogger {
    format: String,
}

impl InvocationLogger {
    /// `format` is `text`, `json` or a custom `$variable` pattern
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn entry(invocation: &Invocation<'_>, result: &Value) -> DispatchLogEntry {
        let mut entry = DispatchLogEntry::new(
            invocation.template.display().to_string(),
            invocation.route.slug.clone(),
            invocation.route.handler.clone(),
            invocation.route.method_name().to_string(),
        );
        entry.args = invocation.args.len();
        entry.result_kind = logger::value_kind(result);
        entry.elapsed_us = u64::try_from(invocation.elapsed.as_micros()).unwrap_or(u64::MAX);
        entry
    }
}

impl InvocationListener for InvocationLogger {
    fn on_invoked(&self, invocation: &Invocation<'_>, _handler: &dyn Handler, result: &Value) {
        logger::log_dispatch(&Self::entry(invocation, result), &self.format);
    }
}
