//! Bounded subprocess execution

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use syncscope_core::SourceError;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::debug;

/// Cap on captured stdout when none is configured
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Per-call deadline when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Only the head of stderr is kept for error messages
const STDERR_KEEP_BYTES: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLimits {
    pub max_output_bytes: usize,
    pub timeout: Duration,
}

impl Default for OutputLimits {
    fn default() -> Self {
        Self {
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A program and its argument vector. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Run through `sudo -n` so a missing sudoers rule fails instead of prompting
    pub fn with_sudo(self) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 2);
        args.push("-n".to_string());
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    /// Turn a non-zero exit into [`SourceError::NonZeroExit`]
    pub fn require_success(self, program: &str) -> Result<String, SourceError> {
        if self.status.success() {
            Ok(self.stdout)
        } else {
            Err(SourceError::NonZeroExit {
                program: program.to_string(),
                code: self.status.code(),
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Spawn the invocation and collect its output within `limits`.
///
/// The child is killed when this future is dropped or gives up early.
pub(crate) async fn run(invocation: &Invocation, limits: OutputLimits) -> Result<Captured, SourceError> {
    let program = invocation.program.as_str();
    debug!(program, args = ?invocation.args, "Spawning");

    let mut child = Command::new(program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| SourceError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("stderr was not captured"))?;

    let collect = async {
        let (stdout, stderr) = tokio::try_join!(
            read_capped(stdout, limits.max_output_bytes, program),
            read_head(stderr, STDERR_KEEP_BYTES),
        )?;
        let status = child.wait().await?;

        Ok::<_, SourceError>(Captured {
            status,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    };

    match tokio::time::timeout(limits.timeout, collect).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout {
            program: program.to_string(),
            timeout: limits.timeout,
        }),
    }
}

async fn read_capped<R>(reader: R, limit: usize, program: &str) -> Result<Vec<u8>, SourceError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.take(limit as u64 + 1).read_to_end(&mut buf).await?;

    if buf.len() > limit {
        return Err(SourceError::OutputTooLarge {
            program: program.to_string(),
            limit,
        });
    }
    Ok(buf)
}

/// Keep the first `keep` bytes and drain the rest so the child never blocks on a full pipe
async fn read_head<R>(mut reader: R, keep: usize) -> Result<Vec<u8>, SourceError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    (&mut reader).take(keep as u64).read_to_end(&mut buf).await?;
    tokio::io::copy(&mut reader, &mut tokio::io::sink()).await?;
    Ok(buf)
}
