use async_trait::async_trait;
use polyscan::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Response {
    Output(String),
    Failure(String),
    Panic,
}

/// Mock Sandbox for testing
///
/// Responses are keyed on a substring of the command (e.g. `"yarn audit"`);
/// commands without a registered response produce empty output.
#[derive(Clone, Default)]
pub struct MockSandbox {
    responses: Vec<(String, Response)>,
    delay: Option<Duration>,
    slow_commands: Vec<(String, Duration)>,
    pub requests: Arc<Mutex<Vec<SandboxRequest>>>,
}

impl MockSandbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, command_contains: &str, output: &str) -> Self {
        self.responses
            .push((command_contains.to_string(), Response::Output(output.to_string())));
        self
    }

    pub fn with_failure(mut self, command_contains: &str, message: &str) -> Self {
        self.responses
            .push((command_contains.to_string(), Response::Failure(message.to_string())));
        self
    }

    pub fn with_panic(mut self, command_contains: &str) -> Self {
        self.responses
            .push((command_contains.to_string(), Response::Panic));
        self
    }

    /// Every execution sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Only commands containing `command_contains` sleep this long
    pub fn with_slow_command(mut self, command_contains: &str, delay: Duration) -> Self {
        self.slow_commands.push((command_contains.to_string(), delay));
        self
    }

    pub fn get_requests(&self) -> Vec<SandboxRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.get_requests().into_iter().map(|r| r.command).collect()
    }
}

#[async_trait]
impl Sandbox for MockSandbox {
    async fn execute(&self, request: &SandboxRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());

        let delay = self
            .slow_commands
            .iter()
            .find(|(pattern, _)| request.command.contains(pattern.as_str()))
            .map(|(_, delay)| *delay)
            .or(self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self
            .responses
            .iter()
            .find(|(pattern, _)| request.command.contains(pattern.as_str()))
            .map(|(_, response)| response.clone());

        match response {
            Some(Response::Output(output)) => Ok(output),
            Some(Response::Failure(message)) => Err(anyhow::anyhow!(message)),
            Some(Response::Panic) => panic!("sandbox crashed"),
            None => Ok(String::new()),
        }
    }
}
