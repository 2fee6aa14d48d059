pub mod fault_tolerance;
pub mod logging;
pub mod math;
pub mod time;

pub use fault_tolerance::*;
pub use logging::init_logging;
