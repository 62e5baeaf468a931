use std::sync::Arc;

use tracing::{info, warn};

use super::options::EvolutionOptions;
use crate::{
    error::{GeneticError, OptionExt, Result},
    evaluator::FitnessEvaluator,
    individual::Individual,
    io::SnapshotSink,
    pixel_grid::PixelGrid,
    population::Population,
    rng::RandomNumberGenerator,
};

/// Summary of one generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: i32,
    pub average_fitness: f64,
    /// Whether `best_fitness` beat every earlier generation.
    pub new_best: bool,
}

/// Represents the result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// The highest-scoring individual seen in any generation.
    pub best: Individual,
    /// The fitness of `best`.
    pub best_fitness: i32,
    /// One entry per generation, in order.
    pub history: Vec<GenerationStats>,
    /// How many snapshots could not be written.
    pub snapshot_failures: usize,
}

/// Runs the generational loop against a fixed reference image.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher {
    reference: Arc<PixelGrid>,
}

impl EvolutionLauncher {
    /// Creates a new `EvolutionLauncher` evolving paintings toward `reference`.
    pub fn new(reference: Arc<PixelGrid>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &PixelGrid {
        &self.reference
    }

    /// Evolves a random population for `options.get_num_generations()` generations.
    ///
    /// Every generation runs, in order: breeding (skipped for generation 0), mass
    /// mutation when enabled, fitness evaluation on the worker pool, sorting and
    /// reporting. Whenever the best fitness strictly exceeds that of all earlier
    /// generations, the best individual is rendered and passed to `sink`.
    ///
    /// # Arguments
    ///
    /// * `options` - Evolution options controlling the run.
    /// * `rng` - The only source of randomness; a seeded generator makes the run
    ///   reproducible.
    /// * `sink` - Receives the rendering of each new best individual.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options are invalid (see `EvolutionOptions::validate`)
    /// - The reference image has zero area
    /// - The worker pool cannot be started
    ///
    /// Failing to write a snapshot is not an error: it is logged and counted in
    /// `EvolutionResult::snapshot_failures`.
    pub fn evolve<S>(
        &self,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
        sink: &mut S,
    ) -> Result<EvolutionResult>
    where
        S: SnapshotSink + ?Sized,
    {
        options.validate()?;

        let blend = options.get_blend_rule();
        let evaluator =
            FitnessEvaluator::new(self.reference.clone(), blend, options.get_worker_threads())?;
        let (width, height) = self.reference.dimensions();

        info!(
            width,
            height,
            population = options.get_population_size(),
            genes = options.get_gene_count(),
            generations = options.get_num_generations(),
            workers = evaluator.num_workers(),
            mass_mutation = options.is_mass_mutation(),
            blend = %blend,
            "starting evolution"
        );

        let mut population = Population::random(
            options.get_population_size(),
            options.get_gene_count(),
            width,
            height,
            rng,
        );

        let mut history = Vec::with_capacity(options.get_num_generations());
        let mut record: Option<(i32, Individual)> = None;
        let mut snapshot_failures = 0;

        for generation in 0..options.get_num_generations() {
            if generation > 0 {
                population.breed(rng)?;
                if options.is_mass_mutation() {
                    population.mass_mutate(rng);
                }
            }

            evaluator.evaluate(population.individuals_mut())?;
            population.sort_by_fitness();

            let best = population.best()?;
            let best_fitness = best.fitness().ok_or_else_genetic(|| {
                GeneticError::Other(format!(
                    "Best individual of generation {} was not evaluated",
                    generation
                ))
            })?;
            let average_fitness = population.average_fitness().unwrap_or_default();

            let new_best = record
                .as_ref()
                .map_or(true, |(previous, _)| best_fitness > *previous);

            if new_best {
                let snapshot = best.render(width, height, blend);
                if let Err(e) = sink.write(&snapshot) {
                    snapshot_failures += 1;
                    warn!(generation, error = %e, "failed to write snapshot");
                }
                record = Some((best_fitness, best.clone()));
            }

            info!(
                generation,
                best = best_fitness,
                average = average_fitness,
                new_best,
                "generation complete"
            );

            history.push(GenerationStats {
                generation,
                best_fitness,
                average_fitness,
                new_best,
            });
        }

        let (best_fitness, best) = record.ok_or_else_genetic(|| {
            GeneticError::Other("Evolution completed without evaluating a generation".to_string())
        })?;

        Ok(EvolutionResult {
            best,
            best_fitness,
            history,
            snapshot_failures,
        })
    }
}
