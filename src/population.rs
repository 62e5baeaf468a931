//! # Population
//!
//! The `Population` owns every individual of the current generation together with the
//! canvas size used to generate new genes. It provides the three population-level
//! operators of the algorithm:
//!
//! - `sort_by_fitness`: orders individuals best first.
//! - `breed`: replaces the whole population with children of the fit half.
//! - `mass_mutate`: regenerates the full genome of the weakest three quarters.
//!
//! Breeding does not carry the best individual over unchanged. A champion survives
//! only if crossover happens to reproduce it.

use std::cmp::Reverse;

use crate::error::{GeneticError, OptionExt, Result};
use crate::gene::Gene;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Upper bound (exclusive) of the per-gene crossover roll.
const CROSSOVER_ROLL: u32 = 99;
/// Roll value producing a brand-new gene.
const FRESH_GENE_ROLL: u32 = 50;

#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    canvas_width: u32,
    canvas_height: u32,
}

impl Population {
    /// Wraps existing individuals.
    pub fn new(individuals: Vec<Individual>, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            individuals,
            canvas_width,
            canvas_height,
        }
    }

    /// Creates `size` individuals with `gene_count` random genes each.
    pub fn random(
        size: usize,
        gene_count: usize,
        canvas_width: u32,
        canvas_height: u32,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(gene_count, canvas_width, canvas_height, rng))
            .collect();
        Self::new(individuals, canvas_width, canvas_height)
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable access to the slots, used by the fitness evaluator.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn canvas_dimensions(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Sorts individuals by descending fitness. Unevaluated individuals go last.
    pub fn sort_by_fitness(&mut self) {
        self.individuals.sort_by_key(|individual| Reverse(individual.fitness()));
    }

    /// The first individual. After `sort_by_fitness` this is the fittest one.
    pub fn best(&self) -> Result<&Individual> {
        self.individuals
            .first()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// Mean fitness over evaluated individuals, or `None` if nobody has been evaluated.
    pub fn average_fitness(&self) -> Option<f64> {
        let scores: Vec<i64> = self
            .individuals
            .iter()
            .filter_map(|individual| individual.fitness().map(i64::from))
            .collect();

        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<i64>() as f64 / scores.len() as f64)
    }

    /// Replaces the population with children of its fit half.
    ///
    /// Expects the population to be sorted. Parent `i` of the fit half
    /// `[0, len / 2)` is paired twice, in order, each time with a partner drawn
    /// uniformly from the fit half. Pairing wraps around to the start of the fit half
    /// until exactly `len` children exist.
    ///
    /// # Errors
    ///
    /// - `GeneticError::EmptyPopulation` for an empty population.
    /// - `GeneticError::Configuration` for a single individual, which has no fit half.
    pub fn breed(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let size = self.individuals.len();
        if size == 0 {
            return Err(GeneticError::EmptyPopulation);
        }
        let half = size / 2;
        if half == 0 {
            return Err(GeneticError::Configuration(
                "Breeding needs at least two individuals".to_string(),
            ));
        }

        let mut children = Vec::with_capacity(size);
        for k in 0..size {
            let mum = &self.individuals[(k / 2) % half];
            let dad = &self.individuals[rng.gen_range(0..half)];
            children.push(make_child(
                mum,
                dad,
                self.canvas_width,
                self.canvas_height,
                rng,
            ));
        }

        self.individuals = children;
        Ok(())
    }

    /// Regenerates every gene of the individuals in `[len / 4, len)`.
    ///
    /// Expects the population to be sorted so that only the weakest three quarters
    /// are affected.
    pub fn mass_mutate(&mut self, rng: &mut RandomNumberGenerator) {
        let start = self.individuals.len() / 4;
        let (width, height) = (self.canvas_width, self.canvas_height);
        for individual in &mut self.individuals[start..] {
            individual.randomize_genes(width, height, rng);
        }
    }
}

/// Where a child's gene came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inheritance {
    Mum,
    Dad,
    Fresh,
}

impl Inheritance {
    /// Draws the source of one gene.
    ///
    /// A roll over `0..99` decides: `50` yields a fresh gene, `51..=98` mum's gene
    /// and `0..=49` dad's gene. That is roughly 1% fresh, 48.5% mum and 50.5% dad.
    pub fn roll(rng: &mut RandomNumberGenerator) -> Self {
        match rng.gen_range(0..CROSSOVER_ROLL) {
            FRESH_GENE_ROLL => Inheritance::Fresh,
            c if c > FRESH_GENE_ROLL => Inheritance::Mum,
            _ => Inheritance::Dad,
        }
    }
}

/// Builds a child gene by gene from two parents of equal gene count.
pub fn make_child(
    mum: &Individual,
    dad: &Individual,
    canvas_width: u32,
    canvas_height: u32,
    rng: &mut RandomNumberGenerator,
) -> Individual {
    let genes: Vec<Gene> = mum
        .genes()
        .iter()
        .zip(dad.genes())
        .map(|(mum_gene, dad_gene)| match Inheritance::roll(rng) {
            Inheritance::Mum => *mum_gene,
            Inheritance::Dad => *dad_gene,
            Inheritance::Fresh => Gene::random(canvas_width, canvas_height, rng),
        })
        .collect();

    Individual::new(genes)
}
