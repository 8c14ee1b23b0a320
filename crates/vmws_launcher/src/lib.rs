mod process;

pub use process::*;

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info};
use vmws_utils::errors::VmwsError;

#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;

/// Fails with `ExecutableNotFound` unless `path` is a regular file that can be executed.
pub fn check_executable(path: &Path) -> Result<(), VmwsError> {
    let not_found = || VmwsError::ExecutableNotFound(path.to_path_buf());
    let metadata = path.metadata().map_err(|e| {
        debug!("unable to read metadata of {}: {e}", path.display());
        not_found()
    })?;

    if !metadata.is_file() {
        return Err(not_found());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(not_found());
        }
    }

    Ok(())
}

fn detach(command: &mut Command) {
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        command.creation_flags(CREATE_NEW_PROCESS_GROUP | DETACHED_PROCESS);
    }
}

/// Spawns vmrest in its own process group and returns its pid without waiting on it.
pub fn start_server(vmrest_path: &Path) -> Result<u32, VmwsError> {
    check_executable(vmrest_path)?;
    info!("starting vmrest server from {}", vmrest_path.display());

    let mut command = Command::new(vmrest_path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut command);

    let child = command.spawn().map_err(|e| {
        debug!("unable to spawn {}: {e}", vmrest_path.display());
        VmwsError::ExecutableNotFound(vmrest_path.to_path_buf())
    })?;
    let pid = child.id();
    debug!("vmrest server spawned with pid {pid}");
    Ok(pid)
}

/// Runs `vmrest -C` attached to the terminal so the user can set the server's credentials.
pub fn configure_credentials(vmrest_path: &Path) -> Result<ExitStatus, VmwsError> {
    check_executable(vmrest_path)?;
    debug!("running {} -C", vmrest_path.display());
    Command::new(vmrest_path)
        .arg("-C")
        .status()
        .map_err(|e| {
            debug!("unable to run {}: {e}", vmrest_path.display());
            VmwsError::ExecutableNotFound(vmrest_path.to_path_buf())
        })
}
