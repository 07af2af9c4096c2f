use std::io;
use std::process::{Command, Output};

/// Trait for executing system commands, allowing for mocking in tests
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with arguments and return its captured output
    fn execute(&self, command: &str, args: &[&str]) -> io::Result<Output>;
}

/// Real command executor using std::process::Command
pub struct RealCommandExecutor;

impl RealCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for RealCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> io::Result<Output> {
        Command::new(command).args(args).output()
    }
}

/// Mock command executor for testing
///
/// Queued results are handed out in order; once the queue is empty every
/// further call succeeds with empty output. Each invocation is recorded so
/// tests can assert on the exact argument vector.
#[cfg(test)]
pub struct MockCommandExecutor {
    results: std::sync::Mutex<std::collections::VecDeque<MockCommandResult>>,
    calls: std::sync::Mutex<Vec<Vec<String>>>,
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub struct MockCommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
impl MockCommandResult {
    pub fn ok(stdout: &str) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: &str) -> Self {
        Self {
            exit_code: 1,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn new() -> Self {
        Self::with_results(Vec::new())
    }

    pub fn with_results(results: Vec<MockCommandResult>) -> Self {
        Self {
            results: std::sync::Mutex::new(results.into()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Every invocation so far, as `[command, arg, arg, ...]` vectors.
    pub fn recorded_calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl CommandExecutor for MockCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> io::Result<Output> {
        let mut call = vec![command.to_string()];
        call.extend(args.iter().map(|arg| arg.to_string()));
        self.calls.lock().unwrap().push(call);

        let result = self.results.lock().unwrap().pop_front();
        match result {
            Some(result) => Ok(Output {
                status: create_exit_status(result.exit_code),
                stdout: result.stdout.into_bytes(),
                stderr: result.stderr.into_bytes(),
            }),
            // Default: successful empty output
            None => Ok(Output {
                status: create_exit_status(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
fn create_exit_status(code: i32) -> std::process::ExitStatus {
    // ExitStatus can't be constructed directly; go through the raw form
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code)
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code as u32)
    }
}
