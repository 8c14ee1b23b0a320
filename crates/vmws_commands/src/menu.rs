use crate::action::{Action, dispatch};
use crate::context::Context;
use crate::vms::show_vm_ids;
use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::fmt::{Display, Formatter, Result as FmtResult};
use vmws_config::ConfigInput;
use vmws_utils::term::print_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    ShowVms,
    ShowPowerState,
    PowerOn,
    PowerOff,
    ShowNetworks,
    StartServer,
    StopServer,
    Configure,
    ConfigureCredentials,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 10] = [
        Self::ShowVms,
        Self::ShowPowerState,
        Self::PowerOn,
        Self::PowerOff,
        Self::ShowNetworks,
        Self::StartServer,
        Self::StopServer,
        Self::Configure,
        Self::ConfigureCredentials,
        Self::Quit,
    ];

    pub fn needs_vm_id(&self) -> bool {
        matches!(self, Self::ShowPowerState | Self::PowerOn | Self::PowerOff)
    }

    /// `None` means leave the menu.
    pub fn action(&self, vm_id: Option<String>) -> Option<Action> {
        let vm_id = vm_id.unwrap_or_default();
        match self {
            Self::ShowVms => Some(Action::ShowVms { full: false }),
            Self::ShowPowerState => Some(Action::ShowPowerState(vm_id)),
            Self::PowerOn => Some(Action::PowerOn(vm_id)),
            Self::PowerOff => Some(Action::PowerOff(vm_id)),
            Self::ShowNetworks => Some(Action::ShowNetworks),
            Self::StartServer => Some(Action::StartServer),
            Self::StopServer => Some(Action::StopServer),
            Self::Configure => Some(Action::Configure(ConfigInput::default())),
            Self::ConfigureCredentials => Some(Action::ConfigureCredentials),
            Self::Quit => None,
        }
    }
}

impl Display for MenuItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::ShowVms => "Show all VMs",
            Self::ShowPowerState => "Show power state for VM by ID",
            Self::PowerOn => "Power on VM by ID",
            Self::PowerOff => "Power off VM by ID",
            Self::ShowNetworks => "Show all networks",
            Self::StartServer => "Start VMware REST server",
            Self::StopServer => "Stop VMware REST server",
            Self::Configure => "Configure connection settings",
            Self::ConfigureCredentials => "Configure VMware REST server credentials",
            Self::Quit => "Quit",
        };
        write!(f, "{label}")
    }
}

fn resolve(ctx: &Context, theme: &ColorfulTheme, item: MenuItem) -> Result<Option<Action>> {
    if !item.needs_vm_id() {
        return Ok(item.action(None));
    }
    show_vm_ids(ctx)?;
    let vm_id: String = Input::with_theme(theme)
        .with_prompt("Enter VM ID")
        .interact_text()?;
    Ok(item.action(Some(vm_id.trim().to_string())))
}

/// Loops until the user quits; action failures are printed and the menu is shown again.
pub fn run(ctx: &Context) -> Result<()> {
    let theme = ColorfulTheme::default();
    loop {
        println!();
        let selection = Select::with_theme(&theme)
            .with_prompt("Menu")
            .items(&MenuItem::ALL)
            .default(0)
            .interact_opt()?;
        let item = selection.map(|i| MenuItem::ALL[i]).unwrap_or(MenuItem::Quit);

        let result = resolve(ctx, &theme, item).and_then(|action| match action {
            Some(action) => dispatch(ctx, &action).map(|_| true),
            None => Ok(false),
        });

        match result {
            Ok(true) => {}
            Ok(false) => {
                println!("Exiting program.");
                return Ok(());
            }
            Err(e) => print_error(&format!("{e:#}"))?,
        }
    }
}
