//! Ghostscript discovery and bounded invocation.
//!
//! Ghostscript is the only external tool this crate shells out to. It is
//! located by probing a short list of known binary names on the search
//! path, run with a fixed argument set in batch mode, and killed if it
//! exceeds its wall-clock budget.

use std::env;
use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error};

use crate::config::defaults::DEFAULT_GHOSTSCRIPT_TIMEOUT;
use crate::error::CompressError;

use super::quality::Quality;

/// Binary names Ghostscript ships under: `gs` on Unix-likes, the console
/// binaries `gswin64c`/`gswin32c` on Windows. Probed in this order.
const CANDIDATES: &[&str] = &["gs", "gswin64c", "gswin32c"];

/// How often the bounded wait polls the child for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A resolved Ghostscript installation.
#[derive(Debug, Clone)]
pub struct Ghostscript {
    exe: PathBuf,
    timeout: Duration,
}

impl Ghostscript {
    /// Locate Ghostscript on the search path.
    ///
    /// Fails with [`CompressError::ToolUnavailable`] when none of the known
    /// binary names resolve. That is a deployment problem, not an input
    /// problem, and nothing is spawned in that case.
    pub fn discover() -> Result<Self, CompressError> {
        let path_var = env::var_os("PATH").unwrap_or_default();
        match find_executable(&path_var) {
            Some(exe) => {
                debug!("using Ghostscript at {}", exe.display());
                Ok(Self::with_executable(exe))
            }
            None => Err(CompressError::ToolUnavailable {
                candidates: CANDIDATES.join(", "),
            }),
        }
    }

    /// Use a specific executable instead of probing the search path.
    pub fn with_executable(exe: impl Into<PathBuf>) -> Self {
        Self {
            exe: exe.into(),
            timeout: DEFAULT_GHOSTSCRIPT_TIMEOUT,
        }
    }

    /// Override the wall-clock limit for subsequent runs.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.exe
    }

    /// Recompress `input` into `output` at the given quality.
    ///
    /// Blocks until Ghostscript exits or the timeout fires. A non-zero
    /// exit carries the captured stdout/stderr verbatim. The exit status
    /// is the only validation performed here; whether the written file is
    /// usable is the caller's call. No retries either: rerunning a
    /// deterministic failure with the same input changes nothing.
    pub fn compress(
        &self,
        input: &Path,
        output: &Path,
        quality: Quality,
    ) -> Result<(), CompressError> {
        let mut command = Command::new(&self.exe);
        command
            .arg("-sDEVICE=pdfwrite")
            .arg("-dCompatibilityLevel=1.4")
            .arg(format!("-dPDFSETTINGS={}", quality.gs_setting()))
            .arg("-dNOPAUSE")
            .arg("-dQUIET")
            .arg("-dBATCH")
            .arg(format!("-sOutputFile={}", output.display()))
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!("running {command:?}");

        let mut child = command.spawn()?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match wait_with_timeout(&mut child, self.timeout)? {
            Some(status) => status,
            None => {
                child.kill().ok();
                child.wait().ok();
                return Err(CompressError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let stdout = join(stdout);
        let stderr = join(stderr);

        if !status.success() {
            error!("Ghostscript failed ({status}): {}", stderr.trim());
            return Err(CompressError::Exited {
                status,
                stdout,
                stderr,
            });
        }
        Ok(())
    }
}

/// Read a piped stream to the end on its own thread so the child never
/// blocks on a full pipe while we poll for exit.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<thread::JoinHandle<String>> {
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).ok();
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Poll the child until it exits or `timeout` elapses. `None` means the
/// deadline passed with the child still running.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// First candidate binary found in `path_var`. Candidate-major order: every
/// search-path entry is tried for `gs` before `gswin64c` is considered.
fn find_executable(path_var: &OsStr) -> Option<PathBuf> {
    for name in CANDIDATES {
        for dir in env::split_paths(path_var) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            if let Some(hit) = probe(&dir, name) {
                return Some(hit);
            }
        }
    }
    None
}

fn probe(dir: &Path, name: &str) -> Option<PathBuf> {
    let direct = dir.join(name);
    if direct.is_file() {
        return Some(direct);
    }
    if cfg!(windows) {
        let with_ext = dir.join(format!("{name}.exe"));
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;

    #[test]
    fn test_empty_search_path_finds_nothing() {
        assert!(find_executable(&OsString::new()).is_none());
    }

    #[test]
    fn test_finds_gs_in_search_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gs"), b"").unwrap();
        let path_var = env::join_paths([dir.path()]).unwrap();
        assert_eq!(find_executable(&path_var), Some(dir.path().join("gs")));
    }

    #[test]
    fn test_candidate_order_beats_directory_order() {
        // gswin64c earlier on the path must lose to gs later on it.
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(first.path().join("gswin64c"), b"").unwrap();
        fs::write(second.path().join("gs"), b"").unwrap();
        let path_var = env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(
            find_executable(&path_var),
            Some(second.path().join("gs"))
        );
    }

    #[cfg(unix)]
    fn stub_tool(dir: &Path, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-gs");
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let tool = stub_tool(dir.path(), "exit 0");
        let gs = Ghostscript::with_executable(tool);
        let result = gs.compress(Path::new("in.pdf"), Path::new("out.pdf"), Quality::Ebook);
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_carries_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let tool = stub_tool(dir.path(), "echo oops >&2; echo partial; exit 3");
        let gs = Ghostscript::with_executable(tool);
        let err = gs
            .compress(Path::new("in.pdf"), Path::new("out.pdf"), Quality::Screen)
            .unwrap_err();
        match err {
            CompressError::Exited {
                status,
                stdout,
                stderr,
            } => {
                assert_eq!(status.code(), Some(3));
                assert!(stdout.contains("partial"));
                assert!(stderr.contains("oops"));
            }
            other => panic!("expected Exited, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_hung_tool_is_killed() {
        let dir = tempfile::tempdir().unwrap();
        let tool = stub_tool(dir.path(), "exec sleep 30");
        let gs = Ghostscript::with_executable(tool).timeout(Duration::from_millis(200));
        let started = Instant::now();
        let err = gs
            .compress(Path::new("in.pdf"), Path::new("out.pdf"), Quality::Ebook)
            .unwrap_err();
        assert!(matches!(err, CompressError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
