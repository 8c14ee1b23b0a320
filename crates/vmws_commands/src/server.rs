use crate::context::Context;
use anyhow::{Result, bail};
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;
use tracing::debug;
use vmws_http::VmrestClient;
use vmws_launcher::{
    configure_credentials as run_vmrest_configure, is_server_running, start_server, stop_server,
};
use vmws_utils::term::{print_info, print_warning};

const STARTUP_GRACE: Duration = Duration::from_secs(3);
const STOP_TIMEOUT: Duration = Duration::from_secs(10);

pub fn start(ctx: &Context) -> Result<()> {
    if is_server_running() {
        return print_info("VMware Workstation REST server is already running.");
    }

    let config = ctx.config()?;
    let pid = start_server(Path::new(&config.vmrest_path))?;
    debug!("waiting {}s for vmrest to come up", STARTUP_GRACE.as_secs());
    sleep(STARTUP_GRACE);

    let client = VmrestClient::new(&config);
    if ctx.block_on(client.is_reachable()) || is_server_running() {
        print_info(&format!(
            "VMware Workstation REST server started successfully (pid {pid})."
        ))
    } else {
        print_warning("VMware Workstation REST server was launched but is not answering yet.")
    }
}

pub fn stop() -> Result<()> {
    match stop_server(STOP_TIMEOUT) {
        0 => print_info("VMware Workstation REST server is not running."),
        count => print_info(&format!(
            "VMware Workstation REST server stopped ({count} process(es) terminated)."
        )),
    }
}

pub fn configure_credentials(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let status = run_vmrest_configure(Path::new(&config.vmrest_path))?;
    if !status.success() {
        bail!("vmrest credential setup exited with {status}");
    }
    print_info(
        "vmrest credentials updated, remember to configure the same username and password here.",
    )
}
