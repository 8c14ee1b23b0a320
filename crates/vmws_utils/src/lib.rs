pub mod errors;
pub mod term;
