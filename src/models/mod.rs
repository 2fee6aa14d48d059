pub mod chain;
pub mod token_data;
pub mod factor;
pub mod security_check;
pub mod risk_result;
pub mod explanation;

pub use chain::*;
pub use token_data::*;
pub use factor::*;
pub use security_check::*;
pub use risk_result::*;
pub use explanation::*;
