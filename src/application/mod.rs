pub mod dashboard;
pub mod resolve;
