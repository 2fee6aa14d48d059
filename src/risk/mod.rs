// Token risk scoring
// Factor scoring, chain weighting, security checks, overrides and the engine that ties them together

pub mod errors;
pub mod factors;
pub mod weights;
pub mod confidence;
pub mod security_checks;
pub mod overrides;
pub mod forecast;
pub mod engine;

pub use errors::*;
pub use factors::*;
pub use weights::*;
pub use confidence::*;
pub use security_checks::*;
pub use overrides::*;
pub use forecast::*;
pub use engine::*;

