//! Child processes with deadlines
//!
//! Every external tool (ssh, rsync, tar) runs through here. Output pipes are
//! drained on helper threads so a chatty child never blocks on a full pipe,
//! and the child is killed when its deadline passes.

use std::ffi::OsStr;
use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long readers get to flush after a deadline kill
const SETTLE_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{program} is not installed or not on PATH")]
    NotFound { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("error while waiting for {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} timed out after {secs}s")]
    TimedOut {
        program: String,
        secs: u64,
        /// stdout then stderr printed before the kill
        output: String,
    },
}

/// Captured result of a finished child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// None when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Seconds from configuration; zero disables the deadline.
pub fn deadline(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Check that `program --version` runs.
pub fn is_installed(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Render a command line for logs.
pub fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `cmd` to completion, optionally feeding `stdin`.
pub fn run(
    mut cmd: Command,
    stdin: Option<&[u8]>,
    timeout: Option<Duration>,
) -> Result<CommandOutput, ProcessError> {
    let program = program_name(&cmd);
    debug!(command = %describe(&cmd), "running");

    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

    let mut child = spawn(&mut cmd, &program)?;

    let writer = stdin.map(|data| {
        let data = data.to_vec();
        let pipe = child.stdin.take();
        thread::spawn(move || {
            if let Some(mut pipe) = pipe {
                // The child may exit without reading everything; its status says why.
                let _ = pipe.write_all(&data);
            }
        })
    });
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    // On timeout the reader threads are left detached: a killed child's own
    // children may still hold the pipes open.
    let statuses = match wait_all(std::slice::from_mut(&mut child), timeout) {
        Ok(Some(statuses)) => statuses,
        Ok(None) => {
            settle(&[&stdout, &stderr]);
            let partial = CommandOutput {
                code: None,
                stdout: stdout.snapshot(),
                stderr: stderr.snapshot(),
            };
            return Err(timed_out(program, timeout, partial.combined()));
        }
        Err(source) => return Err(ProcessError::Io { program, source }),
    };
    if let Some(writer) = writer {
        let _ = writer.join();
    }

    Ok(CommandOutput {
        code: statuses.first().and_then(ExitStatus::code),
        stdout: stdout.collect(),
        stderr: stderr.collect(),
    })
}

/// Run `producer | consumer`, both concurrently, under one deadline.
///
/// Returns both outputs; the producer's stdout is consumed by the pipe and
/// comes back empty.
pub fn run_pipe(
    mut producer: Command,
    mut consumer: Command,
    timeout: Option<Duration>,
) -> Result<(CommandOutput, CommandOutput), ProcessError> {
    let producer_name = program_name(&producer);
    let consumer_name = program_name(&consumer);
    debug!(
        producer = %describe(&producer),
        consumer = %describe(&consumer),
        "running pipe"
    );

    producer
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut first = spawn(&mut producer, &producer_name)?;

    let Some(pipe) = first.stdout.take() else {
        reap(&mut first);
        return Err(ProcessError::Io {
            program: producer_name,
            source: io::Error::new(io::ErrorKind::BrokenPipe, "stdout was not captured"),
        });
    };

    consumer
        .stdin(Stdio::from(pipe))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let second = match spawn(&mut consumer, &consumer_name) {
        Ok(child) => child,
        Err(e) => {
            reap(&mut first);
            return Err(e);
        }
    };
    // Release our handle on the pipe's read end so the producer sees EPIPE if
    // the consumer dies.
    drop(consumer);

    let producer_err = drain(first.stderr.take());
    let mut children = [first, second];
    let consumer_out = drain(children[1].stdout.take());
    let consumer_err = drain(children[1].stderr.take());

    let statuses = match wait_all(&mut children, timeout) {
        Ok(Some(statuses)) => statuses,
        Ok(None) => {
            settle(&[&producer_err, &consumer_err]);
            return Err(timed_out(
                format!("{producer_name} | {consumer_name}"),
                timeout,
                format!("{}{}", producer_err.snapshot(), consumer_err.snapshot()),
            ));
        }
        Err(source) => {
            return Err(ProcessError::Io {
                program: consumer_name,
                source,
            })
        }
    };

    Ok((
        CommandOutput {
            code: statuses.first().and_then(ExitStatus::code),
            stdout: String::new(),
            stderr: producer_err.collect(),
        },
        CommandOutput {
            code: statuses.get(1).and_then(ExitStatus::code),
            stdout: consumer_out.collect(),
            stderr: consumer_err.collect(),
        },
    ))
}

fn program_name(cmd: &Command) -> String {
    cmd.get_program().to_string_lossy().into_owned()
}

fn spawn(cmd: &mut Command, program: &str) -> Result<Child, ProcessError> {
    cmd.spawn().map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ProcessError::NotFound {
                program: program.to_string(),
            }
        } else {
            ProcessError::Spawn {
                program: program.to_string(),
                source,
            }
        }
    })
}

fn timed_out(program: String, timeout: Option<Duration>, output: String) -> ProcessError {
    ProcessError::TimedOut {
        program,
        secs: timeout.map(|t| t.as_secs()).unwrap_or_default(),
        output,
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Poll until every child exits. `Ok(None)` means the deadline passed and the
/// stragglers were killed.
fn wait_all(children: &mut [Child], timeout: Option<Duration>) -> io::Result<Option<Vec<ExitStatus>>> {
    let deadline = timeout.map(|t| Instant::now() + t);
    let mut statuses: Vec<Option<ExitStatus>> = vec![None; children.len()];

    loop {
        for (child, status) in children.iter_mut().zip(statuses.iter_mut()) {
            if status.is_none() {
                *status = child.try_wait()?;
            }
        }
        if statuses.iter().all(Option::is_some) {
            return Ok(Some(statuses.into_iter().flatten().collect()));
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            for (child, status) in children.iter_mut().zip(&statuses) {
                if status.is_none() {
                    reap(child);
                }
            }
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// A pipe being read on a helper thread into a shared buffer.
struct Drain {
    buf: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

impl Drain {
    /// Wait for EOF and take everything read.
    fn collect(self) -> String {
        let Drain { buf, handle } = self;
        let _ = handle.join();
        buf.lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }

    /// Whatever has been read so far.
    fn snapshot(&self) -> String {
        self.buf
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Drain {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buf);
    let handle = thread::spawn(move || {
        let Some(mut pipe) = pipe else { return };
        let mut chunk = [0u8; 8192];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => match sink.lock() {
                    Ok(mut buf) => buf.extend_from_slice(&chunk[..n]),
                    Err(_) => break,
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    });
    Drain { buf, handle }
}

/// Give readers a moment to reach EOF after a kill. Pipes still held by
/// orphaned grandchildren never close, so this is bounded.
fn settle(drains: &[&Drain]) {
    let until = Instant::now() + SETTLE_GRACE;
    while Instant::now() < until && !drains.iter().all(|d| d.handle.is_finished()) {
        thread::sleep(Duration::from_millis(10));
    }
}
