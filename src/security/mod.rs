pub mod input_validation;

pub use input_validation::{
    canonicalize_units,
    PercentUnit,
    ProviderUnits,
    TokenDataValidator,
};
