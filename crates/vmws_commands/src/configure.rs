use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use std::path::Path;
use tracing::debug;
use vmws_config::definitions::{DEFAULT_BASE_URL, DEFAULT_VMREST_PATH};
use vmws_config::{ConfigInput, VmwsConfig};
use vmws_utils::term::{print_info, print_warning};

use crate::context::Context;

pub fn ensure_config(path: &Path, interactive: bool) -> Result<VmwsConfig> {
    match VmwsConfig::load_from(path) {
        Ok(config) => Ok(config),
        Err(e) if e.is_config_error() && interactive => {
            print_warning(&e.to_string())?;
            let answers = prompt(ConfigInput::read(path))?;
            save(path, answers)
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes a new configuration from explicit values, prompting for whatever
/// the caller left out when a terminal is attached.
pub fn configure(ctx: &Context, explicit: ConfigInput) -> Result<()> {
    let path = ctx.config_path();
    let input = if explicit.is_complete() || !ctx.interactive() {
        explicit
    } else {
        prompt(explicit.or(ConfigInput::read(path)))?
    };
    save(path, input).map(|_| ())
}

fn save(path: &Path, input: ConfigInput) -> Result<VmwsConfig> {
    let config = VmwsConfig::configure(path, input)?;
    print_info(&format!("Configuration saved to {}", path.display()))?;
    Ok(config)
}

fn prompt(current: ConfigInput) -> Result<ConfigInput> {
    debug!("prompting for configuration values");
    let theme = ColorfulTheme::default();
    println!("Configure the vmrest connection:");

    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Base URL")
        .default(current.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
        .interact_text()?;

    let mut username_input = Input::<String>::with_theme(&theme).with_prompt("Username");
    if let Some(username) = current.username {
        username_input = username_input.default(username);
    }
    let username = username_input.interact_text()?;

    let keep_password = current.password.is_some();
    let password_prompt = if keep_password {
        "Password (leave empty to keep the current one)"
    } else {
        "Password"
    };
    let password = Password::with_theme(&theme)
        .with_prompt(password_prompt)
        .allow_empty_password(keep_password)
        .interact()?;
    let password = if password.is_empty() {
        current.password
    } else {
        Some(password)
    };

    let vmrest_path: String = Input::with_theme(&theme)
        .with_prompt("Path to vmrest")
        .default(current.vmrest_path.unwrap_or_else(|| DEFAULT_VMREST_PATH.to_string()))
        .interact_text()?;

    Ok(ConfigInput {
        base_url: Some(base_url),
        username: Some(username),
        password,
        vmrest_path: Some(vmrest_path),
    })
}
