pub const VERSION: &str = "0.1.0";
pub const TOOL_NAME: &str = "vmws";
pub const TOOL_TITLE: &str = "VMware Workstation Rest";
pub const TOOL_DIR: &str = ".vmws";
pub const TOOL_DEFAULT_CONFIG_FILE: &str = "config.yaml";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8697/api";

#[cfg(windows)]
pub const DEFAULT_VMREST_PATH: &str =
    r"C:\Program Files (x86)\VMware\VMware Workstation\vmrest.exe";

#[cfg(not(windows))]
pub const DEFAULT_VMREST_PATH: &str =
    "/mnt/c/Program Files (x86)/VMware/VMware Workstation/vmrest.exe";

pub const VMREST_PROCESS_NAMES: [&str; 2] = ["vmrest", "vmrest.exe"];
pub const VMREST_MEDIA_TYPE: &str = "application/vnd.vmware.vmw.rest-v1+json";
