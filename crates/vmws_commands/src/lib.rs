pub mod action;
pub mod cli;
mod configure;
pub mod context;
mod menu;
#[cfg(test)]
mod mock;
mod network;
mod power;
mod server;
mod vms;

pub use cli::*;
