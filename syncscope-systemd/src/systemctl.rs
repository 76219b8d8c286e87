//! Unit state through `systemctl`

use async_trait::async_trait;
use std::time::Duration;
use syncscope_core::{ServiceProbe, SourceError};
use tracing::instrument;

use crate::command::{self, Invocation, OutputLimits};

const ACTIVE_ENTER_PROPERTY: &str = "ActiveEnterTimestamp";

/// Small answers only; anything bigger is not systemctl talking to us
const PROBE_OUTPUT_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct SystemctlProbe {
    unit: String,
    program: String,
    limits: OutputLimits,
}

impl SystemctlProbe {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            program: "systemctl".to_string(),
            limits: OutputLimits {
                max_output_bytes: PROBE_OUTPUT_BYTES,
                timeout: Duration::from_secs(5),
            },
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.limits.timeout = timeout;
        self
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn invocation(&self, args: &[&str]) -> Invocation {
        Invocation::new(self.program.clone(), args.iter().map(|a| a.to_string()).collect())
    }
}

/// `is-active` prints the state; only `active` counts
fn parse_is_active(stdout: &str) -> bool {
    stdout.trim() == "active"
}

/// Value of a `Key=Value` line from `systemctl show`, if non-blank
fn parse_property(stdout: &str) -> Option<String> {
    let (_, value) = stdout.split_once('=')?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[async_trait]
impl ServiceProbe for SystemctlProbe {
    #[instrument(skip(self), fields(unit = %self.unit))]
    async fn is_active(&self) -> Result<bool, SourceError> {
        // Non-zero exit is the normal answer for an inactive unit
        let captured = command::run(&self.invocation(&["is-active", &self.unit]), self.limits).await?;
        Ok(parse_is_active(&captured.stdout))
    }

    #[instrument(skip(self), fields(unit = %self.unit))]
    async fn active_since(&self) -> Result<Option<String>, SourceError> {
        let property = format!("--property={}", ACTIVE_ENTER_PROPERTY);
        let invocation = self.invocation(&["show", &self.unit, &property]);
        let stdout = command::run(&invocation, self.limits)
            .await?
            .require_success(&invocation.program)?;
        Ok(parse_property(&stdout))
    }
}
