//! Human-readable log of a single swap run

use tracing::{error, info};

/// Lines collected during one run. Every line is mirrored to tracing.
#[derive(Debug, Default)]
pub struct OperationLog {
    lines: Vec<String>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!("{}", line);
        self.lines.push(line);
    }

    pub fn push_error(&mut self, line: impl Into<String>) {
        let line = line.into();
        error!("{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
