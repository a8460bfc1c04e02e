mod driver;
mod easing;
mod spring;
mod store;

pub use driver::Driver;
pub use easing::Easing;
pub use spring::{SpringConfig, SpringMotion};
pub use store::{AnimatedStore, Completion, Param};
