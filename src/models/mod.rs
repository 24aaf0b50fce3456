//! Classical reliability laws combined by the damage calculator

mod arrhenius;
mod coffin_manson;
mod weibull;

pub use arrhenius::arrhenius_degradation;
pub use coffin_manson::{coffin_manson_cycles, plastic_strain};
pub use weibull::weibull_failure_probability;
