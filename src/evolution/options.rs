//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the hyperparameters of a run: how many
//! generations to evolve, how large the population is, how many genes each individual
//! carries, whether mass mutation is applied, which compositing rule renders the genes
//! and how many worker threads score fitness.
//!
//! ## Example
//!
//! ```rust
//! use genpaint::evolution::options::EvolutionOptions;
//! use genpaint::render::BlendRule;
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(200, 50, 100);
//!
//! // Or with the builder
//! let options = EvolutionOptions::builder()
//!     .num_generations(500)
//!     .population_size(200)
//!     .gene_count(400)
//!     .mass_mutation(true)
//!     .blend_rule(BlendRule::WeightedAlpha)
//!     .worker_threads(4)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! ```

use crate::error::{GeneticError, Result};
use crate::render::BlendRule;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    population_size: usize,
    gene_count: usize,
    mass_mutation: bool,
    blend_rule: BlendRule,
    /// `None` means one worker per available core.
    worker_threads: Option<usize>,
}

impl EvolutionOptions {
    /// Creates options with the given sizes and defaults for everything else.
    pub fn new(num_generations: usize, population_size: usize, gene_count: usize) -> Self {
        Self {
            num_generations,
            population_size,
            gene_count,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_gene_count(&self) -> usize {
        self.gene_count
    }

    pub fn is_mass_mutation(&self) -> bool {
        self.mass_mutation
    }

    pub fn get_blend_rule(&self) -> BlendRule {
        self.blend_rule
    }

    pub fn get_worker_threads(&self) -> Option<usize> {
        self.worker_threads
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the number of genes per individual.
    pub fn set_gene_count(&mut self, gene_count: usize) {
        self.gene_count = gene_count;
    }

    /// Enables or disables mass mutation.
    pub fn set_mass_mutation(&mut self, enabled: bool) {
        self.mass_mutation = enabled;
    }

    /// Sets the compositing rule.
    pub fn set_blend_rule(&mut self, blend_rule: BlendRule) {
        self.blend_rule = blend_rule;
    }

    /// Sets the worker pool size.
    pub fn set_worker_threads(&mut self, worker_threads: Option<usize>) {
        self.worker_threads = worker_threads;
    }

    /// Checks that the options describe a runnable evolution.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if there are no generations, fewer than
    /// two individuals (breeding needs a non-empty fit half) or zero worker threads.
    pub fn validate(&self) -> Result<()> {
        if self.num_generations == 0 {
            return Err(GeneticError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }

        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.population_size < 2 {
            return Err(GeneticError::Configuration(format!(
                "Population size must be at least 2, got {}",
                self.population_size
            )));
        }

        if self.worker_threads == Some(0) {
            return Err(GeneticError::Configuration(
                "Number of worker threads cannot be zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 10_000,
            population_size: 1_000,
            gene_count: 2_000,
            mass_mutation: false,
            blend_rule: BlendRule::Averaged,
            worker_threads: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
/// Unset fields take the values of `EvolutionOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    population_size: Option<usize>,
    gene_count: Option<usize>,
    mass_mutation: Option<bool>,
    blend_rule: Option<BlendRule>,
    worker_threads: Option<usize>,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the number of genes per individual.
    pub fn gene_count(mut self, value: usize) -> Self {
        self.gene_count = Some(value);
        self
    }

    /// Enables or disables mass mutation.
    pub fn mass_mutation(mut self, value: bool) -> Self {
        self.mass_mutation = Some(value);
        self
    }

    /// Sets the compositing rule.
    pub fn blend_rule(mut self, value: BlendRule) -> Self {
        self.blend_rule = Some(value);
        self
    }

    /// Sets the worker pool size.
    pub fn worker_threads(mut self, value: usize) -> Self {
        self.worker_threads = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            gene_count: self.gene_count.unwrap_or(defaults.gene_count),
            mass_mutation: self.mass_mutation.unwrap_or(defaults.mass_mutation),
            blend_rule: self.blend_rule.unwrap_or(defaults.blend_rule),
            worker_threads: self.worker_threads.or(defaults.worker_threads),
        }
    }
}
