use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds surfaced by the config store, the REST client and the server launcher.
#[derive(Debug, Error)]
pub enum VmwsError {
    #[error("configuration file not found at {}, run with --configure to create it", .0.display())]
    ConfigMissing(PathBuf),

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("vmrest server is unreachable: {0}")]
    ServerUnreachable(String),

    #[error("vmrest server rejected the credentials (401 Unauthorized)")]
    Unauthorized,

    #[error("virtual machine {0} was not found")]
    VmNotFound(String),

    #[error("vmrest server rejected the operation with status {status}: {message}")]
    OperationRejected { status: u16, message: String },

    #[error("unexpected response from vmrest server: {0}")]
    ProtocolError(String),

    #[error("vmrest executable not found or not executable: {}", .0.display())]
    ExecutableNotFound(PathBuf),
}

impl VmwsError {
    /// Codes start at 3, leaving 1 for other failures and 2 for usage errors reported by clap.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigMissing(_) => 3,
            Self::ConfigInvalid(_) => 4,
            Self::ServerUnreachable(_) => 5,
            Self::Unauthorized => 6,
            Self::VmNotFound(_) => 7,
            Self::OperationRejected { .. } => 8,
            Self::ProtocolError(_) => 9,
            Self::ExecutableNotFound(_) => 10,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigMissing(_) | Self::ConfigInvalid(_))
    }
}

/// Maps any error bubbled up to the top level onto a process exit code.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<VmwsError>()
        .map(VmwsError::exit_code)
        .unwrap_or(1)
}
