/// Sandbox adapters for isolated tool execution
mod docker_sandbox;

pub use docker_sandbox::{DockerSandbox, DEFAULT_SANDBOX_TIMEOUT};
