//! Dispatch log format module
//!
//! Supports multiple log formats:
//! - `text` (single human-readable line)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;
use serde_json::json;

/// Dispatch log entry describing one handler invocation
#[derive(Debug, Clone)]
pub struct DispatchLogEntry {
    /// Invocation timestamp
    pub time: chrono::DateTime<Local>,
    /// Template path the host asked to render
    pub template: String,
    /// Slug derived from the template path
    pub slug: String,
    /// Handler identifier
    pub handler: String,
    /// Invoked method
    pub method: String,
    /// Number of arguments supplied by argument providers
    pub args: usize,
    /// JSON type of the method's return value
    pub result_kind: &'static str,
    /// Invocation time in microseconds
    pub elapsed_us: u64,
}

impl DispatchLogEntry {
    /// Create a new entry with current timestamp
    pub fn new(template: String, slug: String, handler: String, method: String) -> Self {
        Self {
            time: Local::now(),
            template,
            slug,
            handler,
            method,
            args: 0,
            result_kind: "null",
            elapsed_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "text" => self.format_text(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// `[$time_local] $slug -> $handler@$method ($template) args=$args result=$result $elapsed`
    fn format_text(&self) -> String {
        format!(
            "[{}] [Dispatch] {} -> {}@{} ({}) args={} result={} {}us",
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.slug,
            self.handler,
            self.method,
            self.template,
            self.args,
            self.result_kind,
            self.elapsed_us,
        )
    }

    fn format_json(&self) -> String {
        json!({
            "time": self.time.to_rfc3339(),
            "template": self.template,
            "slug": self.slug,
            "handler": self.handler,
            "method": self.method,
            "args": self.args,
            "result": self.result_kind,
            "elapsed_us": self.elapsed_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$time_local` - Local time in Common Log Format
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$template` - Requested template path
    /// - `$slug` - Derived slug
    /// - `$handler` - Handler identifier
    /// - `$method` - Invoked method
    /// - `$args` - Argument count
    /// - `$result` - JSON type of the return value
    /// - `$elapsed` - Invocation time in seconds
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let elapsed = self.elapsed_us as f64 / 1_000_000.0;

        let variables: [(&str, String); 9] = [
            (
                "time_local",
                self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            ),
            ("time_iso8601", self.time.to_rfc3339()),
            ("template", self.template.clone()),
            ("slug", self.slug.clone()),
            ("handler", self.handler.clone()),
            ("method", self.method.clone()),
            ("args", self.args.to_string()),
            ("result", self.result_kind.to_string()),
            ("elapsed", format!("{elapsed:.3}")),
        ];

        // Single pass over the pattern: substituted values are never rescanned
        let mut result = String::with_capacity(pattern.len());
        let mut rest = pattern;
        while let Some(pos) = rest.find('$') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            match variables
                .iter()
                .find(|(name, _)| after.starts_with(*name))
            {
                Some((name, value)) => {
                    result.push_str(value);
                    rest = &after[name.len()..];
                }
                None => {
                    result.push('$');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        result
    }
}

/// JSON type name of a handler result
pub const fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
