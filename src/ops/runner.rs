use std::io;
use std::process::{Command, Stdio};

/// Captured result of a finished command.
#[derive(Clone, Debug)]
pub struct CaptureOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Seam over external command-line tools, so command construction can be
/// verified without a container engine or a cluster on the test host.
pub trait CommandRunner {
    /// Run with inherited stdio; the tool's own output streams straight to
    /// the operator. Returns whether the command exited successfully.
    fn run(&mut self, program: &str, args: &[&str]) -> io::Result<bool>;

    /// Run with captured stdout/stderr.
    fn capture(&mut self, program: &str, args: &[&str]) -> io::Result<CaptureOutput>;
}

/// Production runner over `std::process::Command`. Commands inherit the
/// current working directory, which is what the scoped-directory build path
/// relies on.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> io::Result<bool> {
        let status = Command::new(program).args(args).status()?;
        Ok(status.success())
    }

    fn capture(&mut self, program: &str, args: &[&str]) -> io::Result<CaptureOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(CaptureOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
