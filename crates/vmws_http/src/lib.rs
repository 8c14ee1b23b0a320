mod request;

pub use request::Request;

use tracing::debug;
use vmws_config::VmwsConfig;
use vmws_models::{
    NetworkListResponse, NetworkRecord, NicList, PowerAction, PowerRequest, PowerState,
    PowerStateResponse, VmIp, VmListResponse, VmParam, VmRecord, VmSettings,
};
use vmws_utils::errors::VmwsError;

/// Client for the vmrest REST API. Every call is a single authenticated
/// request with no retries.
#[derive(Debug, Clone)]
pub struct VmrestClient {
    base_url: String,
    username: String,
    password: String,
}

impl VmrestClient {
    pub fn new(config: &VmwsConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn get(&self, endpoint: &str) -> Request {
        Request::get(&self.url(endpoint)).basic_auth(&self.username, &self.password)
    }

    fn put(&self, endpoint: &str) -> Request {
        Request::put(&self.url(endpoint)).basic_auth(&self.username, &self.password)
    }

    pub async fn list_vms(&self) -> Result<Vec<VmRecord>, VmwsError> {
        let response: VmListResponse = self.get("vms").json().await?;
        let vms: Vec<VmRecord> = response.into();
        debug!("server reported {} vms", vms.len());
        Ok(vms)
    }

    pub async fn get_power_state(&self, vm_id: &str) -> Result<PowerState, VmwsError> {
        let response: PowerStateResponse = self
            .get(&format!("vms/{vm_id}/power"))
            .vm(vm_id)
            .json()
            .await?;
        Ok(response.power_state)
    }

    pub async fn set_power_state(
        &self,
        vm_id: &str,
        action: PowerAction,
    ) -> Result<PowerState, VmwsError> {
        debug!("requesting power {action} for vm {vm_id}");
        let response: PowerStateResponse = self
            .put(&format!("vms/{vm_id}/power"))
            .vm(vm_id)
            .json_with_data(&PowerRequest { state: action })
            .await?;
        Ok(response.power_state)
    }

    pub async fn list_networks(&self) -> Result<Vec<NetworkRecord>, VmwsError> {
        let response: NetworkListResponse = self.get("vmnet").json().await?;
        Ok(response.into())
    }

    pub async fn get_vm_ip(&self, vm_id: &str) -> Result<String, VmwsError> {
        let response: VmIp = self.get(&format!("vms/{vm_id}/ip")).vm(vm_id).json().await?;
        Ok(response.ip)
    }

    pub async fn get_vm_nics(&self, vm_id: &str) -> Result<NicList, VmwsError> {
        self.get(&format!("vms/{vm_id}/nic")).vm(vm_id).json().await
    }

    pub async fn get_vm_settings(&self, vm_id: &str) -> Result<VmSettings, VmwsError> {
        self.get(&format!("vms/{vm_id}")).vm(vm_id).json().await
    }

    pub async fn get_vm_param(&self, vm_id: &str, name: &str) -> Result<VmParam, VmwsError> {
        self.get(&format!("vms/{vm_id}/params/{name}"))
            .vm(vm_id)
            .json()
            .await
    }

    /// True when anything answers HTTP at the base url, whatever the status.
    pub async fn is_reachable(&self) -> bool {
        self.get("vms").status().await.is_ok()
    }
}
