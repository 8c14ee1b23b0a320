//! Plain-text rendering of vmrest records. Absent values are shown as `unknown`.

use crate::vm::capitalize;
use crate::{NetworkRecord, Nic, PowerAction, PowerState, VmRecord};
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub const UNKNOWN: &str = "unknown";
pub const MAX_PARAM_LENGTH: usize = 120;

/// Details that vmrest only reports for a running VM.
#[derive(Debug, Default, Clone)]
pub struct RuntimeDetails {
    pub ip: Option<String>,
    pub nics: Vec<Nic>,
    pub processors: Option<i64>,
    pub memory: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct VmDetails {
    pub record: VmRecord,
    pub power_state: Option<PowerState>,
    pub runtime: Option<RuntimeDetails>,
    pub params: Vec<(String, Option<String>)>,
}

impl VmDetails {
    pub fn new(record: VmRecord) -> Self {
        Self {
            power_state: record.power_state,
            record,
            runtime: None,
            params: vec![],
        }
    }
}

#[derive(Tabled)]
struct VmIdRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Path")]
    path: String,
}

fn or_unknown(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(UNKNOWN)
}

fn number_or_unknown(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| UNKNOWN.to_string())
}

fn state_or_unknown(state: Option<PowerState>) -> String {
    state
        .map(|s| s.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

pub fn vm_lines(position: usize, details: &VmDetails) -> Vec<String> {
    let record = &details.record;
    let mut lines = vec![
        format!("{position}. VM Name: {}", or_unknown(Some(&record.name()))),
        format!("   VM Path: {}", or_unknown(Some(&record.path))),
        format!("   VM ID: {}", or_unknown(Some(&record.id))),
        format!("   Power State: {}", state_or_unknown(details.power_state)),
    ];

    if let Some(runtime) = &details.runtime {
        lines.push(format!("   IP Address: {}", or_unknown(runtime.ip.as_deref())));
        if runtime.nics.is_empty() {
            lines.push(format!("   MAC Address: {UNKNOWN}"));
        }
        for nic in &runtime.nics {
            lines.push(format!(
                "   MAC Address (NIC {}): {}",
                number_or_unknown(nic.index),
                or_unknown(nic.mac_address.as_deref())
            ));
        }
        lines.push(format!("   Processors: {}", number_or_unknown(runtime.processors)));
        lines.push(format!("   Memory: {} MB", number_or_unknown(runtime.memory)));
    }

    for (name, value) in &details.params {
        let value = truncate(or_unknown(value.as_deref()), MAX_PARAM_LENGTH);
        lines.push(format!("   {} : {value}", capitalize(name)));
    }

    lines
}

pub fn vm_list_lines(vms: &[VmDetails]) -> Vec<String> {
    if vms.is_empty() {
        return vec!["No VMs available.".to_string()];
    }
    let mut lines = vec![];
    for (i, details) in vms.iter().enumerate() {
        lines.push(String::new());
        lines.extend(vm_lines(i + 1, details));
    }
    lines
}

pub fn vm_ids_table(vms: &[VmRecord]) -> String {
    if vms.is_empty() {
        return "No VMs available.".to_string();
    }
    let rows = vms.iter().map(|vm| VmIdRow {
        name: or_unknown(Some(&vm.name())).to_string(),
        id: vm.id.clone(),
        path: or_unknown(Some(&vm.path)).to_string(),
    });
    Table::new(rows).with(Style::modern()).to_string()
}

pub fn power_state_line(name: Option<&str>, id: &str, state: Option<PowerState>) -> String {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => format!("Power state of {name} VM {id}: {}", state_or_unknown(state)),
        None => format!("Power state of VM {id}: {}", state_or_unknown(state)),
    }
}

pub fn power_change_line(name: Option<&str>, id: &str, state: Option<PowerState>) -> String {
    format!(
        "VM {} {id} is now {}.",
        or_unknown(name),
        state_or_unknown(state)
    )
}

pub fn already_powered_line(name: Option<&str>, id: &str, action: PowerAction) -> String {
    format!("VM {} {id} is already powered {action}.", or_unknown(name))
}

pub fn network_lines(networks: &[NetworkRecord]) -> Vec<String> {
    if networks.is_empty() {
        return vec!["No networks available.".to_string()];
    }
    let mut lines = vec![];
    for (i, net) in networks.iter().enumerate() {
        let dhcp = net
            .dhcp
            .map(|d| d.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let kind = net
            .kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        lines.push(String::new());
        lines.push(format!("{}. Network Name: {}", i + 1, or_unknown(net.name.as_deref())));
        lines.push(format!("   Type: {kind}"));
        lines.push(format!("   DHCP: {dhcp}"));
        lines.push(format!("   Subnet: {}", or_unknown(net.subnet.as_deref())));
        lines.push(format!("   Mask: {}", or_unknown(net.mask.as_deref())));
    }
    lines
}
