use std::ffi::OsStr;
use std::thread::sleep;
use std::time::{Duration, Instant};
use sysinfo::{Pid, Process, ProcessStatus, ProcessesToUpdate, System};
use tracing::{debug, info, warn};
use vmws_config::definitions::VMREST_PROCESS_NAMES;

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn refreshed_system() -> System {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    system
}

fn is_alive(process: &Process) -> bool {
    process.status() != ProcessStatus::Zombie
}

fn vmrest_pids(system: &System) -> Vec<Pid> {
    VMREST_PROCESS_NAMES
        .iter()
        .flat_map(|name| system.processes_by_exact_name(OsStr::new(name)))
        .filter(|process| is_alive(process))
        .map(|process| process.pid())
        .collect()
}

/// Pids of every vmrest process visible to this user.
pub fn running_servers() -> Vec<u32> {
    vmrest_pids(&refreshed_system())
        .into_iter()
        .map(|pid| pid.as_u32())
        .collect()
}

pub fn is_server_running() -> bool {
    let running = !running_servers().is_empty();
    debug!("vmrest server running: {running}");
    running
}

/// Kills every vmrest process and waits up to `timeout` for them to exit.
/// Returns the number of processes that were signalled.
pub fn stop_server(timeout: Duration) -> usize {
    let system = refreshed_system();
    let pids = vmrest_pids(&system);

    for pid in &pids {
        if let Some(process) = system.process(*pid) {
            info!("terminating {} (pid {pid})", process.name().to_string_lossy());
            if !process.kill() {
                warn!("unable to signal vmrest process {pid}");
            }
        }
    }

    if pids.is_empty() {
        return 0;
    }

    let started = Instant::now();
    while started.elapsed() < timeout {
        let system = refreshed_system();
        if pids
            .iter()
            .all(|pid| system.process(*pid).is_none_or(|p| !is_alive(p)))
        {
            debug!("all vmrest processes exited");
            return pids.len();
        }
        sleep(STOP_POLL_INTERVAL);
    }

    warn!("vmrest processes still running after {}s", timeout.as_secs());
    pids.len()
}
