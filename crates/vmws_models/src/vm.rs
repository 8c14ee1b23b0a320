use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    #[serde(rename = "poweredOn")]
    PoweredOn,
    #[serde(rename = "poweredOff")]
    PoweredOff,
    #[serde(rename = "suspended")]
    Suspended,
    #[serde(other)]
    Unknown,
}

impl Display for PowerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::PoweredOn => write!(f, "poweredOn"),
            Self::PoweredOff => write!(f, "poweredOff"),
            Self::Suspended => write!(f, "suspended"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// The two states a caller may ask the server to move a VM into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    On,
    Off,
}

impl PowerAction {
    pub fn target_state(&self) -> PowerState {
        match self {
            Self::On => PowerState::PoweredOn,
            Self::Off => PowerState::PoweredOff,
        }
    }
}

impl Display for PowerAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerRequest {
    pub state: PowerAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStateResponse {
    pub power_state: PowerState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmRecord {
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_state: Option<PowerState>,
}

impl VmRecord {
    pub fn name(&self) -> String {
        vm_name_from_path(&self.path)
    }
}

/// vmrest answers `/vms` with a bare array; some deployments wrap it in `{"vms": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum VmListResponse {
    Wrapped { vms: Vec<VmRecord> },
    Bare(Vec<VmRecord>),
}

impl From<VmListResponse> for Vec<VmRecord> {
    fn from(value: VmListResponse) -> Self {
        match value {
            VmListResponse::Wrapped { vms } => vms,
            VmListResponse::Bare(vms) => vms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmIp {
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nic {
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub vmnet: Option<String>,
    #[serde(default, rename = "macAddress")]
    pub mac_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicList {
    #[serde(default)]
    pub num: Option<i64>,
    #[serde(default)]
    pub nics: Vec<Nic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSettings {
    #[serde(default)]
    pub processors: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSettings {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub cpu: Option<CpuSettings>,
    #[serde(default)]
    pub memory: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmParam {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Turns a `.vmx` path into a display name,
/// e.g. `C:\VMs\ubuntu-server.vmx` becomes `Ubuntu server`.
pub fn vm_name_from_path(path: &str) -> String {
    let file = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let stem = file.strip_suffix(".vmx").unwrap_or(file).replace('-', " ");
    capitalize(&stem)
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
