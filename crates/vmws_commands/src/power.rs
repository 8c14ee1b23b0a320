use crate::context::Context;
use crate::vms::vm_name;
use anyhow::Result;
use vmws_models::PowerAction;
use vmws_models::display::{already_powered_line, power_change_line, power_state_line};
use vmws_utils::term::print_info;

pub fn show_power_state(ctx: &Context, vm_id: &str) -> Result<()> {
    let client = ctx.client()?;
    ctx.block_on(async {
        let state = client.get_power_state(vm_id).await?;
        let name = vm_name(&client, vm_id).await;
        println!("{}", power_state_line(name.as_deref(), vm_id, Some(state)));
        anyhow::Ok(())
    })
}

pub fn change_power_state(ctx: &Context, vm_id: &str, action: PowerAction) -> Result<()> {
    let client = ctx.client()?;
    ctx.block_on(async {
        let current = client.get_power_state(vm_id).await?;
        let name = vm_name(&client, vm_id).await;

        if current == action.target_state() {
            return print_info(&already_powered_line(name.as_deref(), vm_id, action));
        }

        let state = client.set_power_state(vm_id, action).await?;
        println!("{}", power_change_line(name.as_deref(), vm_id, Some(state)));
        anyhow::Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{context, serve};

    #[test]
    fn power_on_is_skipped_when_already_running() {
        let (base_url, calls) = serve();
        let (_dir, ctx) = context(&base_url);

        change_power_state(&ctx, "vm-on", PowerAction::On).unwrap();
        assert_eq!(calls.power_puts(), 0);

        change_power_state(&ctx, "vm-off", PowerAction::Off).unwrap();
        assert_eq!(calls.power_puts(), 0);
    }

    #[test]
    fn power_change_is_sent_when_state_differs() {
        let (base_url, calls) = serve();
        let (_dir, ctx) = context(&base_url);

        change_power_state(&ctx, "vm-on", PowerAction::Off).unwrap();
        change_power_state(&ctx, "vm-off", PowerAction::On).unwrap();
        assert_eq!(calls.power_puts(), 2);
    }

    #[test]
    fn unknown_vm_is_reported_before_any_change() {
        let (base_url, calls) = serve();
        let (_dir, ctx) = context(&base_url);

        let error = change_power_state(&ctx, "vm-missing", PowerAction::On).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<vmws_utils::errors::VmwsError>(),
            Some(vmws_utils::errors::VmwsError::VmNotFound(id)) if id == "vm-missing"
        ));
        assert_eq!(calls.power_puts(), 0);
    }
}
