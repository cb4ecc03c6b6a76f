use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Verbosity of the daemon's log output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only failures that stop the daemon.
    Error,

    /// Failed player calls and other recoverable problems.
    Warn,

    /// Players appearing and disappearing, commands received (default level).
    #[default]
    Info,

    /// Every classification change and routing decision.
    Debug,

    /// Everything, including bus internals.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}
