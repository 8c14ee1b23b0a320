pub mod display;
pub mod network;
pub mod vm;

pub use network::*;
pub use vm::*;
