pub mod error;
pub mod evaluator;
pub mod evolution;
pub mod fitness;
pub mod gene;
pub mod individual;
pub mod io;
pub mod pixel_grid;
pub mod population;
pub mod render;
pub mod rng;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evaluator::FitnessEvaluator;
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult, GenerationStats};
pub use gene::Gene;
pub use individual::Individual;
pub use io::{load_reference, NoSnapshot, PngSnapshot, SnapshotSink};
pub use pixel_grid::PixelGrid;
pub use population::Population;
pub use render::BlendRule;
pub use rng::RandomNumberGenerator;
