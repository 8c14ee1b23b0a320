use crate::context::Context;
use crate::{configure, network, power, server, vms};
use anyhow::Result;
use tracing::{debug, warn};
use vmws_config::ConfigInput;
use vmws_models::PowerAction;

/// Everything the tool can do. Flags and menu entries both resolve to one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowVms { full: bool },
    ShowVmIds,
    ShowPowerState(String),
    PowerOn(String),
    PowerOff(String),
    ShowNetworks,
    StartServer,
    StopServer,
    Configure(ConfigInput),
    ConfigureCredentials,
}

impl Action {
    /// Actions that talk to the vmrest server and so honour `--go-live`/`--go-off`.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::ShowVms { .. }
                | Self::ShowVmIds
                | Self::ShowPowerState(_)
                | Self::PowerOn(_)
                | Self::PowerOff(_)
                | Self::ShowNetworks
        )
    }

    pub fn shows_title(&self) -> bool {
        !matches!(self, Self::Configure(_))
    }
}

pub fn dispatch(ctx: &Context, action: &Action) -> Result<()> {
    debug!("dispatching {action:?}");
    match action {
        Action::ShowVms { full } => vms::show_vms(ctx, *full),
        Action::ShowVmIds => vms::show_vm_ids(ctx),
        Action::ShowPowerState(id) => power::show_power_state(ctx, id),
        Action::PowerOn(id) => power::change_power_state(ctx, id, PowerAction::On),
        Action::PowerOff(id) => power::change_power_state(ctx, id, PowerAction::Off),
        Action::ShowNetworks => network::show_networks(ctx),
        Action::StartServer => server::start(ctx),
        Action::StopServer => server::stop(),
        Action::Configure(input) => configure::configure(ctx, input.clone()),
        Action::ConfigureCredentials => server::configure_credentials(ctx),
    }
}

/// Runs an action, optionally bracketed by starting and stopping the vmrest server.
pub fn run(ctx: &Context, action: &Action, go_live: bool, go_off: bool) -> Result<()> {
    let bracket = action.is_remote();
    if go_live && bracket {
        server::start(ctx)?;
    }

    let result = dispatch(ctx, action);

    if go_off && bracket {
        if let Err(e) = server::stop() {
            warn!("unable to stop vmrest server: {e}");
        }
    }

    result
}
