//! SSH Remote Session
//!
//! Runs one short shell command per operation through the system `ssh`
//! client. All commands share one multiplexed connection (`ControlMaster`),
//! so only the first pays for the handshake.
//!
//! Exit status 255 is ssh's own failure code and maps to
//! `SessionError::Connection`. The remote scripts use exit status 3 for
//! "path does not exist".

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::SshTarget;
use crate::domain::ports::{
    RemoteEntry, RemoteSession, SessionConnector, SessionError, SessionResult,
};
use crate::domain::value_objects::RemotePath;

const SSH_CONNECTION_FAILURE: i32 = 255;
const MISSING_PATH: i32 = 3;
const CONNECT_TIMEOUT_SECS: u32 = 10;
const CONTROL_PERSIST_SECS: u32 = 60;

/// Opens `SshSession`s for a configured target
#[derive(Debug, Clone)]
pub struct SshConnector {
    target: SshTarget,
}

impl SshConnector {
    pub fn new(target: SshTarget) -> Self {
        Self { target }
    }
}

impl SessionConnector for SshConnector {
    fn destination(&self) -> String {
        format!("{}:{}", self.target.destination(), self.target.port)
    }

    fn connect(&self) -> SessionResult<Box<dyn RemoteSession>> {
        let session = SshSession::open(self.target.clone())?;
        Ok(Box::new(session))
    }
}

/// A multiplexed ssh connection
pub struct SshSession {
    target: SshTarget,
    control_path: PathBuf,
    /// Holds the control socket; removed on drop
    control_dir: Option<TempDir>,
}

impl SshSession {
    /// Start the master connection and verify it works
    pub fn open(target: SshTarget) -> SessionResult<Self> {
        let control_dir = tempfile::Builder::new().prefix("upsync-ssh-").tempdir()?;
        let control_path = control_dir.path().join("ctl");
        let session = Self {
            target,
            control_path,
            control_dir: Some(control_dir),
        };

        info!(destination = %session.target.destination(), port = session.target.port, "opening ssh session");
        let output = session.run("true", None)?;
        if !output.status.success() {
            return Err(SessionError::Connection(stderr_text(&output)));
        }
        Ok(session)
    }

    /// Options shared by every invocation
    fn base_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-p".into(),
            self.target.port.to_string().into(),
            "-o".into(),
            "BatchMode=yes".into(),
            "-o".into(),
            format!("ConnectTimeout={}", CONNECT_TIMEOUT_SECS).into(),
            "-o".into(),
            "ControlMaster=auto".into(),
            "-o".into(),
            format!("ControlPersist={}", CONTROL_PERSIST_SECS).into(),
            "-o".into(),
        ];
        let mut control = OsString::from("ControlPath=");
        control.push(&self.control_path);
        args.push(control);

        if let Some(identity) = &self.target.identity {
            args.push("-i".into());
            args.push(identity.into());
            args.push("-o".into());
            args.push("IdentitiesOnly=yes".into());
        }
        args
    }

    /// Run a remote shell command; `stdin` streams a local file to it
    fn run(&self, command: &str, stdin: Option<&Path>) -> SessionResult<Output> {
        let input = match stdin {
            Some(path) => Stdio::from(File::open(path)?),
            None => Stdio::null(),
        };

        debug!(command, "ssh");
        let output = Command::new("ssh")
            .args(self.base_args())
            .arg(self.target.destination())
            .arg(command)
            .stdin(input)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if output.status.code() == Some(SSH_CONNECTION_FAILURE) {
            return Err(SessionError::Connection(stderr_text(&output)));
        }
        Ok(output)
    }

    /// Run a command that exits `MISSING_PATH` when `path` is absent
    fn run_checked(&self, command: &str, path: &RemotePath) -> SessionResult<Output> {
        let output = self.run(command, None)?;
        match output.status.code() {
            Some(0) => Ok(output),
            Some(MISSING_PATH) => Err(SessionError::NotFound(path.to_string())),
            _ => Err(command_failed(path, &output)),
        }
    }

    fn stop_master(&mut self) -> SessionResult<()> {
        let Some(dir) = self.control_dir.take() else {
            return Ok(());
        };
        if self.control_path.exists() {
            let status = Command::new("ssh")
                .arg("-o")
                .arg({
                    let mut control = OsString::from("ControlPath=");
                    control.push(&self.control_path);
                    control
                })
                .args(["-O", "exit"])
                .arg(self.target.destination())
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()?;
            debug!(success = status.success(), "ssh master stopped");
        }
        dir.close()?;
        Ok(())
    }
}

impl RemoteSession for SshSession {
    fn exists(&self, path: &RemotePath) -> SessionResult<bool> {
        let output = self.run(&format!("test -e {}", shell_quote(path.as_str())), None)?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(command_failed(path, &output)),
        }
    }

    fn ensure_dir(&self, path: &RemotePath) -> SessionResult<()> {
        let output = self.run(&format!("mkdir -p -- {}", shell_quote(path.as_str())), None)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(command_failed(path, &output))
        }
    }

    fn list(&self, path: &RemotePath) -> SessionResult<Vec<RemoteEntry>> {
        let p = shell_quote(path.as_str());
        let script = format!(
            "if [ -d {p} ]; then ls -1Ap -- {p}; else exit {code}; fi",
            p = p,
            code = MISSING_PATH
        );
        let output = self.run_checked(&script, path)?;
        Ok(parse_listing(&String::from_utf8_lossy(&output.stdout)))
    }

    fn remove(&self, path: &RemotePath) -> SessionResult<()> {
        let p = shell_quote(path.as_str());
        let script = format!(
            "if [ -e {p} ] || [ -L {p} ]; then rm -f -- {p}; else exit {code}; fi",
            p = p,
            code = MISSING_PATH
        );
        self.run_checked(&script, path).map(|_| ())
    }

    fn remove_dir(&self, path: &RemotePath) -> SessionResult<()> {
        let p = shell_quote(path.as_str());
        let script = format!(
            "if [ -d {p} ]; then rmdir -- {p}; else exit {code}; fi",
            p = p,
            code = MISSING_PATH
        );
        self.run_checked(&script, path).map(|_| ())
    }

    fn transfer(&self, local: &Path, remote: &RemotePath) -> SessionResult<()> {
        let output = self.run(&transfer_script(remote), Some(local))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(command_failed(remote, &output))
        }
    }

    fn close(&mut self) -> SessionResult<()> {
        self.stop_master()
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        if let Err(err) = self.stop_master() {
            warn!(error = %err, "failed to stop ssh master");
        }
    }
}

/// Write stdin to a sibling temp file, then rename over the target
fn transfer_script(remote: &RemotePath) -> String {
    let target = shell_quote(remote.as_str());
    let tmp = shell_quote(&format!("{}.upsync-tmp", remote.as_str()));
    format!(
        "cat > {tmp} && mv -f -- {tmp} {target} || {{ rm -f -- {tmp}; exit 1; }}",
        tmp = tmp,
        target = target
    )
}

/// Parse `ls -1Ap` output: one name per line, directories end in `/`
fn parse_listing(stdout: &str) -> Vec<RemoteEntry> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_suffix('/') {
            Some(dir) => RemoteEntry::dir(dir),
            None => RemoteEntry::file(line),
        })
        .collect()
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

fn stderr_text(output: &Output) -> String {
    let text = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if text.is_empty() {
        format!("ssh exited with {}", output.status)
    } else {
        text
    }
}

fn command_failed(path: &RemotePath, output: &Output) -> SessionError {
    SessionError::CommandFailed(format!("{}: {}", path, stderr_text(output)))
}
