use crate::context::Context;
use anyhow::Result;
use tracing::warn;
use vmws_http::VmrestClient;
use vmws_models::display::{RuntimeDetails, VmDetails, vm_ids_table, vm_list_lines};
use vmws_models::{PowerState, VmRecord};
use vmws_utils::errors::VmwsError;

const VM_PARAMS: [&str; 4] = [
    "guestOS",
    "displayName",
    "workingDir",
    "guestInfo.detailed.data",
];

pub fn show_vms(ctx: &Context, full: bool) -> Result<()> {
    let client = ctx.client()?;
    let details = ctx.block_on(collect_details(&client, full))?;
    for line in vm_list_lines(&details) {
        println!("{line}");
    }
    Ok(())
}

pub fn show_vm_ids(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let vms = ctx.block_on(client.list_vms())?;
    println!("{}", vm_ids_table(&vms));
    Ok(())
}

/// Looks a VM up in the listing to show its name next to its id.
pub async fn vm_name(client: &VmrestClient, vm_id: &str) -> Option<String> {
    client
        .list_vms()
        .await
        .ok()?
        .into_iter()
        .find(|vm| vm.id == vm_id)
        .map(|vm| vm.name())
}

fn or_warn<T>(result: Result<T, VmwsError>, what: &str, vm_id: &str) -> Option<T> {
    result
        .map_err(|e| warn!("unable to fetch {what} of vm {vm_id}: {e}"))
        .ok()
}

async fn collect_details(client: &VmrestClient, full: bool) -> Result<Vec<VmDetails>, VmwsError> {
    let vms = client.list_vms().await?;
    let mut details = Vec::with_capacity(vms.len());
    for vm in vms {
        details.push(vm_details(client, vm, full).await);
    }
    Ok(details)
}

async fn vm_details(client: &VmrestClient, record: VmRecord, full: bool) -> VmDetails {
    let id = record.id.clone();
    let mut details = VmDetails::new(record);
    details.power_state = or_warn(client.get_power_state(&id).await, "power state", &id);

    if details.power_state == Some(PowerState::PoweredOn) {
        let ip = or_warn(client.get_vm_ip(&id).await, "ip address", &id);
        let nics = or_warn(client.get_vm_nics(&id).await, "nics", &id)
            .map(|list| list.nics)
            .unwrap_or_default();
        let settings = or_warn(client.get_vm_settings(&id).await, "settings", &id);
        details.runtime = Some(RuntimeDetails {
            ip,
            nics,
            processors: settings
                .as_ref()
                .and_then(|s| s.cpu.as_ref())
                .and_then(|cpu| cpu.processors),
            memory: settings.and_then(|s| s.memory),
        });
    }

    if full {
        for name in VM_PARAMS {
            let value = or_warn(client.get_vm_param(&id, name).await, name, &id)
                .and_then(|param| param.value);
            details.params.push((name.to_string(), value));
        }
    }

    details
}
