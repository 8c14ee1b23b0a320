use crate::action::{self, Action};
use crate::context::Context;
use crate::menu;
use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::io::{IsTerminal, stdin};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use vmws_config::definitions::{TOOL_TITLE, VERSION};
use vmws_config::{ConfigInput, VmwsConfig};
use vmws_utils::term::print_title;

#[derive(Parser, Debug)]
#[command(name = "vmws", version = VERSION, about = "VMware Workstation REST interface")]
#[command(group(
    ArgGroup::new("action")
        .args([
            "show_vms",
            "show_vm_ids",
            "show_power_state",
            "power_on",
            "power_off",
            "show_net",
            "start_server",
            "stop_server",
            "configure",
            "configure_credentials",
        ])
        .multiple(false)
))]
#[command(group(
    ArgGroup::new("configure_values")
        .args(["base_url", "username", "password", "vmrest_path"])
        .multiple(true)
        .conflicts_with_all([
            "show_vms",
            "show_vm_ids",
            "show_power_state",
            "power_on",
            "power_off",
            "show_net",
            "start_server",
            "stop_server",
            "configure_credentials",
        ])
))]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", help = "Sets the level of verbosity")]
    verbose: bool,

    #[arg(long = "config", value_name = "PATH", help = "Path to the configuration file")]
    config: Option<PathBuf>,

    #[arg(long = "show-vms", help = "Show all VMs and quit")]
    show_vms: bool,

    #[arg(
        long = "show-vm-ids",
        alias = "show-vms-ids",
        help = "Show all VM IDs and quit"
    )]
    show_vm_ids: bool,

    #[arg(
        long = "show-power-state",
        value_name = "VM_ID",
        help = "Show the current power state of a VM"
    )]
    show_power_state: Option<String>,

    #[arg(long = "power-on", value_name = "VM_ID", help = "Power on a VM")]
    power_on: Option<String>,

    #[arg(long = "power-off", value_name = "VM_ID", help = "Power off a VM")]
    power_off: Option<String>,

    #[arg(long = "show-net", help = "Show all networks and quit")]
    show_net: bool,

    #[arg(long = "start-server", help = "Start the VMware REST server")]
    start_server: bool,

    #[arg(long = "stop-server", help = "Stop the VMware REST server")]
    stop_server: bool,

    #[arg(long = "configure", help = "Write the configuration file")]
    configure: bool,

    #[arg(long = "configure-credentials", help = "Run vmrest's own credential setup")]
    configure_credentials: bool,

    #[arg(
        long = "go-live",
        help = "Start the VMware REST server before running the command"
    )]
    go_live: bool,

    #[arg(
        long = "go-off",
        help = "Stop the VMware REST server after running the command"
    )]
    go_off: bool,

    #[arg(long = "base-url", help = "Base URL to configure, implies --configure")]
    base_url: Option<String>,

    #[arg(long = "username", help = "Username to configure, implies --configure")]
    username: Option<String>,

    #[arg(long = "password", help = "Password to configure, implies --configure")]
    password: Option<String>,

    #[arg(
        long = "vmrest-path",
        help = "Path to vmrest to configure, implies --configure"
    )]
    vmrest_path: Option<String>,
}

impl Cli {
    fn tracing_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }

    fn tracing(&self) {
        tracing_subscriber::fmt()
            .with_max_level(self.tracing_level())
            .init()
    }

    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(VmwsConfig::default_path)
    }

    fn has_config_values(&self) -> bool {
        self.base_url.is_some()
            || self.username.is_some()
            || self.password.is_some()
            || self.vmrest_path.is_some()
    }

    /// The action selected by flags, `None` when the menu should run.
    pub fn action(&self) -> Option<Action> {
        if self.show_vms {
            return Some(Action::ShowVms { full: true });
        }
        if self.show_vm_ids {
            return Some(Action::ShowVmIds);
        }
        if let Some(id) = &self.show_power_state {
            return Some(Action::ShowPowerState(id.clone()));
        }
        if let Some(id) = &self.power_on {
            return Some(Action::PowerOn(id.clone()));
        }
        if let Some(id) = &self.power_off {
            return Some(Action::PowerOff(id.clone()));
        }
        if self.show_net {
            return Some(Action::ShowNetworks);
        }
        if self.start_server {
            return Some(Action::StartServer);
        }
        if self.stop_server {
            return Some(Action::StopServer);
        }
        if self.configure || self.has_config_values() {
            return Some(Action::Configure(ConfigInput {
                base_url: self.base_url.clone(),
                username: self.username.clone(),
                password: self.password.clone(),
                vmrest_path: self.vmrest_path.clone(),
            }));
        }
        if self.configure_credentials {
            return Some(Action::ConfigureCredentials);
        }
        None
    }

    pub fn invoke(self) -> Result<()> {
        self.tracing();

        let ctx = Context::new(self.config_path(), stdin().is_terminal());
        match self.action() {
            Some(action) => {
                if action.shows_title() {
                    print_title(TOOL_TITLE);
                }
                action::run(&ctx, &action, self.go_live, self.go_off)
            }
            None => {
                print_title(TOOL_TITLE);
                menu::run(&ctx)
            }
        }
    }
}
