//! # FitnessEvaluator
//!
//! Rasterizing and scoring an individual is the expensive step of every generation,
//! so it runs on a dedicated, fixed-size pool of worker threads. The pool size is
//! independent of the population size.
//!
//! `evaluate` hands every slot of the population to the pool. Each job receives a
//! `&mut Individual` for exactly one slot, so no two workers ever touch the same
//! individual and no locking is needed; the borrow checker enforces the partitioning.
//! The call blocks until every job has finished, which makes it a full barrier
//! between evaluation and the sort/breed steps that follow.
//!
//! A panic inside a worker is re-raised on the calling thread and ends the run.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::pixel_grid::PixelGrid;
use crate::render::BlendRule;

pub struct FitnessEvaluator {
    pool: ThreadPool,
    reference: Arc<PixelGrid>,
    blend: BlendRule,
}

impl FitnessEvaluator {
    /// Creates an evaluator scoring against `reference`.
    ///
    /// # Arguments
    ///
    /// * `reference` - The target image, shared read-only with every worker.
    /// * `blend` - The compositing rule used when rendering individuals.
    /// * `worker_threads` - Pool size; `None` uses one worker per available core.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the reference has zero area, if
    /// `worker_threads` is `Some(0)`, or if the pool cannot be started.
    pub fn new(
        reference: Arc<PixelGrid>,
        blend: BlendRule,
        worker_threads: Option<usize>,
    ) -> Result<Self> {
        if reference.area() == 0 {
            return Err(GeneticError::Configuration(format!(
                "Reference image must not be empty, got {}x{}",
                reference.width(),
                reference.height()
            )));
        }

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("fitness-{}", i));
        if let Some(threads) = worker_threads {
            if threads == 0 {
                return Err(GeneticError::Configuration(
                    "Number of worker threads cannot be zero".to_string(),
                ));
            }
            builder = builder.num_threads(threads);
        }

        let pool = builder.build().map_err(|e| {
            GeneticError::Configuration(format!("Failed to start worker pool: {}", e))
        })?;

        Ok(Self {
            pool,
            reference,
            blend,
        })
    }

    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn reference(&self) -> &PixelGrid {
        &self.reference
    }

    pub fn blend(&self) -> BlendRule {
        self.blend
    }

    /// Evaluates every individual in place and returns how many were evaluated.
    ///
    /// Returns only after all jobs are done. The returned count always equals
    /// `individuals.len()` on success.
    pub fn evaluate(&self, individuals: &mut [Individual]) -> Result<usize> {
        let started = Instant::now();
        let reference: &PixelGrid = &self.reference;
        let blend = self.blend;

        let completed = self.pool.install(|| {
            individuals
                .par_iter_mut()
                .map(|individual| individual.evaluate(reference, blend).map(|_| 1usize))
                .try_reduce(|| 0, |a, b| Ok(a + b))
        })?;

        debug_assert_eq!(completed, individuals.len());
        debug!(
            completed,
            workers = self.num_workers(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fitness barrier reached"
        );

        Ok(completed)
    }
}
