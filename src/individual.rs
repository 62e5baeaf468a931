//! # Individual
//!
//! An `Individual` is one candidate painting: an ordered list of genes and the fitness
//! of its last evaluation. A rendering kept by `render_transient` lives only until
//! `discard_render`; `evaluate` runs render, score and discard as one step, so no
//! individual holds a canvas across generations.

use crate::error::{GeneticError, OptionExt, Result};
use crate::fitness::score_fitness;
use crate::gene::Gene;
use crate::pixel_grid::PixelGrid;
use crate::render::{render, BlendRule};
use crate::rng::RandomNumberGenerator;

#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<Gene>,
    /// `None` until the individual has been evaluated.
    fitness: Option<i32>,
    rendered: Option<PixelGrid>,
}

impl Individual {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: None,
            rendered: None,
        }
    }

    /// Creates an individual with `gene_count` random genes.
    pub fn random(
        gene_count: usize,
        canvas_width: u32,
        canvas_height: u32,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let genes = (0..gene_count)
            .map(|_| Gene::random(canvas_width, canvas_height, rng))
            .collect();
        Self::new(genes)
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn fitness(&self) -> Option<i32> {
        self.fitness
    }

    /// Replaces every gene with a fresh random one and clears the fitness.
    pub fn randomize_genes(
        &mut self,
        canvas_width: u32,
        canvas_height: u32,
        rng: &mut RandomNumberGenerator,
    ) {
        for gene in &mut self.genes {
            *gene = Gene::random(canvas_width, canvas_height, rng);
        }
        self.fitness = None;
    }

    /// Rasterizes the genes onto a black canvas. Deterministic for a given gene list.
    pub fn render(&self, width: u32, height: u32, blend: BlendRule) -> PixelGrid {
        render(&self.genes, width, height, blend)
    }

    /// Rasterizes the genes and keeps the result until `discard_render` is called.
    pub fn render_transient(&mut self, width: u32, height: u32, blend: BlendRule) -> &PixelGrid {
        self.rendered.insert(render(&self.genes, width, height, blend))
    }

    /// Scores the kept rendering against `reference` and records the fitness.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no kept rendering or its dimensions differ from
    /// the reference.
    pub fn score(&mut self, reference: &PixelGrid) -> Result<i32> {
        let rendered = self.rendered.as_ref().ok_or_else_genetic(|| {
            GeneticError::Other("Individual must be rendered before scoring".to_string())
        })?;
        let score = score_fitness(rendered, reference)?;
        self.fitness = Some(score);
        Ok(score)
    }

    /// Renders against `reference`, records the score and drops the rendering.
    ///
    /// The rendering is dropped even when scoring fails.
    pub fn evaluate(&mut self, reference: &PixelGrid, blend: BlendRule) -> Result<i32> {
        let (width, height) = reference.dimensions();
        self.render_transient(width, height, blend);
        let score = self.score(reference);
        self.discard_render();
        score
    }

    /// Releases the transient rendering, if any.
    pub fn discard_render(&mut self) {
        self.rendered = None;
    }

    pub fn has_render(&self) -> bool {
        self.rendered.is_some()
    }
}
