pub mod cli;
pub mod shutdown;
