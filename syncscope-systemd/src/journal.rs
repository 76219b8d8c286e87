//! Journal access through `journalctl`

use async_trait::async_trait;
use std::time::Duration;
use syncscope_core::{JournalSource, LogQuery, SourceError, StatsQuery};
use tracing::{debug, instrument};

use crate::command::{self, Invocation, OutputLimits};

/// Reads one unit's journal by running `journalctl`
#[derive(Debug, Clone)]
pub struct JournalctlReader {
    unit: String,
    program: String,
    use_sudo: bool,
    limits: OutputLimits,
}

impl JournalctlReader {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            program: "journalctl".to_string(),
            use_sudo: false,
            limits: OutputLimits::default(),
        }
    }

    /// Use a different `journalctl` binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_sudo(mut self, use_sudo: bool) -> Self {
        self.use_sudo = use_sudo;
        self
    }

    pub fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.limits.max_output_bytes = max_output_bytes;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.limits.timeout = timeout;
        self
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Arguments for the structured log query
    pub fn log_args(&self, query: &LogQuery) -> Vec<String> {
        let mut args = vec!["-u".to_string(), self.unit.clone(), "-n".to_string(), query.line_count.to_string()];
        args.extend(Self::window_tail(query.since.to_since_arg()));
        args.extend(["-o".to_string(), "json".to_string()]);
        args
    }

    /// Arguments for the plain-text window used by statistics
    pub fn window_args(&self, query: &StatsQuery) -> Vec<String> {
        let mut args = vec!["-u".to_string(), self.unit.clone()];
        args.extend(Self::window_tail(query.time_range.to_since_arg()));
        args
    }

    fn window_tail(since: String) -> [String; 3] {
        ["--since".to_string(), since, "--no-pager".to_string()]
    }

    fn invocation(&self, args: Vec<String>) -> Invocation {
        let invocation = Invocation::new(self.program.clone(), args);
        if self.use_sudo {
            invocation.with_sudo()
        } else {
            invocation
        }
    }

    async fn read(&self, args: Vec<String>) -> Result<String, SourceError> {
        let invocation = self.invocation(args);
        let output = command::run(&invocation, self.limits)
            .await?
            .require_success(&invocation.program)?;

        debug!(bytes = output.len(), "Journal query complete");
        Ok(output)
    }
}

#[async_trait]
impl JournalSource for JournalctlReader {
    #[instrument(skip(self), fields(unit = %self.unit))]
    async fn fetch_logs(&self, query: &LogQuery) -> Result<String, SourceError> {
        self.read(self.log_args(query)).await
    }

    #[instrument(skip(self), fields(unit = %self.unit))]
    async fn fetch_raw_window(&self, query: &StatsQuery) -> Result<String, SourceError> {
        self.read(self.window_args(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syncscope_core::TimeWindow;

    #[test]
    fn test_log_args() {
        let reader = JournalctlReader::new("github-sync.service");
        let query = LogQuery {
            line_count: 50,
            since: TimeWindow::parse("2d").unwrap(),
        };

        assert_eq!(
            reader.log_args(&query),
            vec![
                "-u",
                "github-sync.service",
                "-n",
                "50",
                "--since",
                "2d ago",
                "--no-pager",
                "-o",
                "json"
            ]
        );
    }

    #[test]
    fn test_window_args() {
        let reader = JournalctlReader::new("github-sync.service");
        let query = StatsQuery {
            time_range: TimeWindow::parse("7d").unwrap(),
        };

        assert_eq!(
            reader.window_args(&query),
            vec!["-u", "github-sync.service", "--since", "7d ago", "--no-pager"]
        );
    }

    #[test]
    fn test_sudo_invocation() {
        let reader = JournalctlReader::new("github-sync.service").with_sudo(true);
        let invocation = reader.invocation(reader.window_args(&StatsQuery::default()));
        assert_eq!(invocation.program, "sudo");
        assert_eq!(&invocation.args[..2], ["-n", "journalctl"]);
    }
}
