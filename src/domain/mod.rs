pub mod dashboard;
pub mod error;
pub mod model;
pub mod resolver;
pub mod throttle;
pub mod traits;
