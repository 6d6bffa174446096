use crate::ports::outbound::{Sandbox, SandboxRequest};
use crate::shared::Result;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default upper bound for a single tool run
pub const DEFAULT_SANDBOX_TIMEOUT: Duration = Duration::from_secs(600);

/// Mount point of the project inside the container
const CONTAINER_WORKDIR: &str = "/src";

/// Exit codes docker itself uses when it cannot start the container
const DOCKER_FAILURE_CODES: [i32; 3] = [125, 126, 127];

/// Prefix of the names given to tool containers
const CONTAINER_PREFIX: &str = "polyscan";

/// DockerSandbox adapter running each tool in a throwaway container
///
/// The project directory is mounted read-only and every container gets a
/// unique name. A run outliving `timeout`, or dropped before it returns, has
/// its container force-removed with `docker rm -f`.
pub struct DockerSandbox {
    docker_binary: String,
    timeout: Duration,
}

impl DockerSandbox {
    pub fn new(timeout: Duration) -> Self {
        Self {
            docker_binary: "docker".to_string(),
            timeout,
        }
    }

    /// Uses another docker-compatible CLI (e.g. `podman`)
    pub fn with_binary(mut self, docker_binary: impl Into<String>) -> Self {
        self.docker_binary = docker_binary.into();
        self
    }

    /// Arguments passed to `docker` for a request
    pub fn build_args(request: &SandboxRequest, container_name: &str) -> Vec<String> {
        vec![
            "run".to_string(),
            "--rm".to_string(),
            "--name".to_string(),
            container_name.to_string(),
            "-v".to_string(),
            format!("{}:{}:ro", request.project_path.display(), CONTAINER_WORKDIR),
            "-w".to_string(),
            CONTAINER_WORKDIR.to_string(),
            request.image.reference(),
            "/bin/sh".to_string(),
            "-c".to_string(),
            request.command.clone(),
        ]
    }
}

impl Default for DockerSandbox {
    fn default() -> Self {
        Self::new(DEFAULT_SANDBOX_TIMEOUT)
    }
}

/// Removes a named container unless disarmed.
///
/// Killing the `docker run` client leaves the container running, so a run
/// that is dropped mid-flight removes it here. `Drop` cannot await, so the
/// removal is fire-and-forget.
struct ContainerGuard<'a> {
    docker_binary: &'a str,
    name: &'a str,
    armed: bool,
}

impl<'a> ContainerGuard<'a> {
    fn new(docker_binary: &'a str, name: &'a str) -> Self {
        Self {
            docker_binary,
            name,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    /// Removes the container and waits for docker to acknowledge it
    async fn remove(&mut self) -> std::io::Result<()> {
        self.disarm();
        Command::new(self.docker_binary)
            .args(["rm", "-f", self.name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|_| ())
    }
}

impl Drop for ContainerGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Nowhere to report a failure from here
        let _ = std::process::Command::new(self.docker_binary)
            .args(["rm", "-f", self.name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
    }
}

#[async_trait]
impl Sandbox for DockerSandbox {
    async fn execute(&self, request: &SandboxRequest) -> Result<String> {
        let container_name = format!("{}-{}", CONTAINER_PREFIX, uuid::Uuid::new_v4());
        let mut command = Command::new(&self.docker_binary);
        command
            .args(Self::build_args(request, &container_name))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut guard = ContainerGuard::new(&self.docker_binary, &container_name);
        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(output) => {
                guard.disarm();
                output.map_err(|e| {
                    anyhow::anyhow!("Failed to start {}: {}", self.docker_binary, e)
                })?
            }
            Err(_) => {
                let cleanup = match guard.remove().await {
                    Ok(()) => String::new(),
                    Err(e) => {
                        format!(" (container {} may still be running: {})", container_name, e)
                    }
                };
                anyhow::bail!(
                    "{} did not finish within {}s{}",
                    request.image.reference(),
                    self.timeout.as_secs(),
                    cleanup
                );
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if let Some(code) = output.status.code() {
            if DOCKER_FAILURE_CODES.contains(&code) {
                anyhow::bail!(
                    "{} could not run {} (exit code {}): {}",
                    self.docker_binary,
                    request.image.reference(),
                    code,
                    stderr.trim()
                );
            }
        }

        // Tools exiting non-zero still produce data; fall back to stderr when
        // nothing was printed on stdout so error markers are not lost.
        if stdout.trim().is_empty() {
            Ok(stderr)
        } else {
            Ok(stdout)
        }
    }
}
