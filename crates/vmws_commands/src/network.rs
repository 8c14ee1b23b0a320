use crate::context::Context;
use anyhow::Result;
use vmws_models::display::network_lines;

pub fn show_networks(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let networks = ctx.block_on(client.list_networks())?;
    for line in network_lines(&networks) {
        println!("{line}");
    }
    Ok(())
}
