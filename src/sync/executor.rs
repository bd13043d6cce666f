// file: src/sync/executor.rs
// description: external command invocation with combined output capture
// reference: https://doc.rust-lang.org/std/process/struct.Command.html

use crate::error::{Result, SyncError};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Outcome of one external invocation.
#[derive(Debug)]
pub struct CommandOutput {
    pub command: String,
    pub success: bool,
    /// Captured stdout and stderr as one buffer.
    pub output: Vec<u8>,
}

impl CommandOutput {
    pub fn output_lossy(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// Runs tokenized command lines with an explicit working directory.
///
/// Command lines never pass through a shell; the working directory is always
/// supplied per invocation, so discovered path names cannot alter the command.
pub struct CommandRunner {
    timeout: Option<Duration>,
}

impl CommandRunner {
    /// `timeout_secs == 0` leaves invocations unbounded.
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_timeout((timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)))
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Run `command` inside `workdir`, capturing stdout and stderr combined.
    ///
    /// A non-zero exit status is a normal `CommandOutput` with
    /// `success == false`; only spawn failures and timeouts are `Err`.
    pub fn run(&self, command: &str, workdir: &Path) -> Result<CommandOutput> {
        let argv: Vec<&str> = command.split_whitespace().collect();
        let Some((program, args)) = argv.split_first() else {
            return Err(SyncError::Validation("Empty command line".to_string()));
        };

        info!("Running \"{}\" in {}", command, workdir.display());

        let mut child = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SyncError::CommandSpawn {
                command: command.to_string(),
                source,
            })?;

        // Drain both pipes off-thread so the child never blocks on a full pipe
        // while we wait on its exit status.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_reader = thread::spawn(move || drain(stdout));
        let stderr_reader = thread::spawn(move || drain(stderr));

        let status = match self.timeout {
            None => child.wait()?,
            Some(limit) => {
                let started = Instant::now();
                loop {
                    if let Some(status) = child.try_wait()? {
                        break status;
                    }
                    if started.elapsed() >= limit {
                        child.kill().ok();
                        child.wait().ok();
                        return Err(SyncError::CommandTimeout {
                            command: command.to_string(),
                            timeout_secs: limit.as_secs(),
                        });
                    }
                    thread::sleep(WAIT_POLL_INTERVAL);
                }
            }
        };

        let mut output = stdout_reader.join().unwrap_or_default();
        output.extend(stderr_reader.join().unwrap_or_default());

        Ok(CommandOutput {
            command: command.to_string(),
            success: status.success(),
            output,
        })
    }
}

fn drain<R: Read>(source: Option<R>) -> Vec<u8> {
    let mut buffer = Vec::new();
    if let Some(mut source) = source {
        source.read_to_end(&mut buffer).ok();
    }
    buffer
}
