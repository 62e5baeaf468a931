pub mod launcher;
pub mod options;

pub use launcher::{EvolutionLauncher, EvolutionResult, GenerationStats};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
