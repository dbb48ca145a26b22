//! # GeneticAlgorithm
//!
//! The `GeneticAlgorithm` struct is the generic evolutionary driver. It owns
//! the population and offspring buffers and composes binary tournament
//! selection, single-point crossover, mutation, elitism and a multi-objective
//! survivor selection that balances raw fitness against population diversity
//! (the DCN metric) with a weight that decays over the run's time budget.
//!
//! The driver is generic over any [`Individual`] implementation and delegates
//! random initialization, variation and fitness to the concrete type.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, trace};

use super::options::GaOptions;
use crate::error::{EvoError, Result};
use crate::individual::{compare_fitness, Individual};
use crate::rng::RandomNumberGenerator;

/// The generic evolutionary driver.
///
/// Constructed from a prototype individual and validated [`GaOptions`]. The
/// prototype is never evolved itself; it is cloned to seed the population in
/// [`init_population`](GeneticAlgorithm::init_population).
///
/// ## Example
///
/// ```rust,no_run
/// use evoperm::evolution::{GaOptions, GeneticAlgorithm};
/// use evoperm::individual::Individual;
/// use evoperm::rng::RandomNumberGenerator;
/// use evoperm::sudoku::Sudoku;
///
/// let sudoku = Sudoku::from_file("boards/easy.txt").unwrap();
/// let options = GaOptions::new(50, 1.0, 80.0, 2).unwrap();
/// let mut ga = GeneticAlgorithm::new(sudoku, options).unwrap();
/// let mut rng = RandomNumberGenerator::new();
///
/// ga.init_population(&mut rng);
/// let generations = ga.run(60, &mut rng).unwrap();
/// println!(
///     "{} generations, best fitness {}",
///     generations,
///     ga.best().unwrap().fitness()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm<T: Individual> {
    options: GaOptions,
    prototype: T,
    genotype_length: usize,
    population: Vec<T>,
    offspring: Vec<T>,
}

impl<T: Individual> GeneticAlgorithm<T> {
    /// Creates a new driver from a prototype individual and options.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::Configuration`] if the prototype reports a
    /// genotype length of zero. Degenerate option combinations are already
    /// rejected by [`GaOptions`] construction.
    pub fn new(prototype: T, options: GaOptions) -> Result<Self> {
        let genotype_length = prototype.genotype_length();
        if genotype_length == 0 {
            return Err(EvoError::Configuration(
                "Prototype genotype length must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            options,
            prototype,
            genotype_length,
            population: Vec::new(),
            offspring: Vec::new(),
        })
    }

    /// Fills the population with independently random-initialized clones of
    /// the prototype. May be called repeatedly to restart a run.
    pub fn init_population(&mut self, rng: &mut RandomNumberGenerator) {
        self.population.clear();
        self.offspring.clear();
        for _ in 0..self.options.population_size() {
            let mut individual = self.prototype.clone();
            individual.init_random(rng);
            self.population.push(individual);
        }
    }

    /// Returns the individual with minimal fitness in the current population,
    /// or `None` if the population was never initialized.
    pub fn best(&self) -> Option<&T> {
        self.population.iter().min_by(|a, b| compare_fitness(*a, *b))
    }

    /// Returns the current population.
    pub fn population(&self) -> &[T] {
        &self.population
    }

    /// Executes generation steps until the best fitness reaches the
    /// representation's known optimum or the wall-clock budget is exhausted.
    /// The deadline is checked once per generation; a generation in progress
    /// is never cancelled mid-step.
    ///
    /// Returns the number of generations executed.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::EmptyPopulation`] if
    /// [`init_population`](GeneticAlgorithm::init_population) was never
    /// called, and [`EvoError::FitnessCalculation`] if an evaluation produces
    /// a non-finite fitness.
    pub fn run(&mut self, max_seconds: u64, rng: &mut RandomNumberGenerator) -> Result<usize> {
        if self.population.is_empty() {
            return Err(EvoError::EmptyPopulation);
        }

        let budget = Duration::from_secs(max_seconds);
        let start = Instant::now();
        let mut generations = 0;

        loop {
            let best = self
                .best()
                .ok_or(EvoError::EmptyPopulation)?;
            if let Some(optimum) = best.known_optimum() {
                if best.fitness() <= optimum {
                    break;
                }
            }
            let elapsed = start.elapsed();
            if elapsed >= budget {
                break;
            }

            // Diversity emphasis decays linearly over the time budget so the
            // search explores early and exploits late.
            let progress = if max_seconds == 0 {
                1.0
            } else {
                (elapsed.as_secs_f64() / max_seconds as f64).min(1.0)
            };
            let diversity_weight = self.options.initial_diversity_weight() * (1.0 - progress);

            self.step(diversity_weight, rng)?;
            generations += 1;

            if let Some(best) = self.best() {
                debug!(
                    generation = generations,
                    best_fitness = best.fitness(),
                    diversity_weight,
                    "generation complete"
                );
            }
        }

        Ok(generations)
    }

    /// Executes a single generation: selection, crossover, mutation,
    /// evaluation and survivor selection.
    fn step(&mut self, diversity_weight: f64, rng: &mut RandomNumberGenerator) -> Result<()> {
        self.tournament(rng);
        self.crossover(rng);
        self.mutation(rng);
        self.evaluate()?;
        self.select_survivors(diversity_weight);
        Ok(())
    }

    /// Binary tournament selection: repeatedly picks two individuals
    /// uniformly at random and copies the fitter one into the offspring
    /// buffer until it is full.
    fn tournament(&mut self, rng: &mut RandomNumberGenerator) {
        self.offspring.clear();
        let size = self.population.len();
        while self.offspring.len() < self.options.population_size() {
            let first = &self.population[rng.gen_index(size)];
            let second = &self.population[rng.gen_index(size)];
            let winner = if compare_fitness(first, second).is_le() {
                first
            } else {
                second
            };
            self.offspring.push(winner.clone());
        }
    }

    /// Applies single-point crossover to adjacent offspring pairs with the
    /// configured probability, at a uniformly random locus.
    fn crossover(&mut self, rng: &mut RandomNumberGenerator) {
        let mut i = 0;
        while i + 1 < self.offspring.len() {
            if rng.gen_percent() < self.options.crossover_probability() {
                let pos = rng.gen_index(self.genotype_length);
                let (left, right) = self.offspring.split_at_mut(i + 1);
                left[i].cross(&right[0], pos);
            }
            i += 2;
        }
    }

    /// Mutates every offspring with the configured probability.
    fn mutation(&mut self, rng: &mut RandomNumberGenerator) {
        for individual in self.offspring.iter_mut() {
            individual.mutate(self.options.mutation_probability(), rng);
        }
    }

    /// Recomputes fitness for every offspring and sets its diversity (DCN)
    /// relative to the current elite set. Evaluation switches to rayon when
    /// the offspring buffer is large enough to benefit from parallelism;
    /// each worker holds exclusive access to the individual it scores.
    fn evaluate(&mut self) -> Result<()> {
        let mut elites: Vec<T> = self.population.clone();
        elites.sort_by(compare_fitness);
        elites.truncate(self.options.elite_count().max(1));

        if self.offspring.len() >= self.options.parallel_threshold() {
            self.offspring.par_iter_mut().for_each(|individual| {
                individual.evaluate();
                individual.update_diversity(&elites);
            });
        } else {
            for individual in self.offspring.iter_mut() {
                individual.evaluate();
                individual.update_diversity(&elites);
            }
        }

        for individual in &self.offspring {
            if !individual.fitness().is_finite() {
                return Err(EvoError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    individual.fitness()
                )));
            }
        }
        Ok(())
    }

    /// Elitism plus multi-objective survivor selection.
    ///
    /// The best `elite_count` individuals of the previous population carry
    /// over verbatim. The remaining slots are filled from the merged pool of
    /// previous population and offspring: candidates keep their DCN relative
    /// to the growing survivor set, and each slot takes the member of the
    /// non-dominated front over {fitness, diversity} that minimizes
    /// `fitness - diversity_weight * dcn`.
    fn select_survivors(&mut self, diversity_weight: f64) {
        self.population.sort_by(compare_fitness);
        let mut pool = self.population.split_off(self.options.elite_count());
        pool.append(&mut self.offspring);
        let mut survivors = std::mem::take(&mut self.population);

        if survivors.is_empty() {
            // With no elites configured, seed the survivor set with the pool
            // best so the diversity metric has a reference point.
            if let Some(best_idx) = min_fitness_index(&pool) {
                survivors.push(pool.swap_remove(best_idx));
            }
        }

        for candidate in pool.iter_mut() {
            candidate.update_diversity(&survivors);
        }

        while survivors.len() < self.options.population_size() && !pool.is_empty() {
            let front = non_dominated(&pool);
            let chosen_idx = front
                .iter()
                .copied()
                .min_by(|&a, &b| {
                    let score_a = weighted_score(&pool[a], diversity_weight);
                    let score_b = weighted_score(&pool[b], diversity_weight);
                    score_a
                        .partial_cmp(&score_b)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(0);
            let chosen = pool.swap_remove(chosen_idx);

            trace!(
                fitness = chosen.fitness(),
                dcn = chosen.diversity(),
                "survivor selected"
            );

            // The DCN of the remaining candidates can only shrink when a new
            // survivor joins the set.
            for candidate in pool.iter_mut() {
                let distance = candidate.distance(&chosen);
                if distance < candidate.diversity() {
                    candidate.set_diversity(distance);
                }
            }
            survivors.push(chosen);
        }

        self.population = survivors;
    }
}

/// Index of the minimum-fitness individual, or `None` on an empty slice.
fn min_fitness_index<T: Individual>(individuals: &[T]) -> Option<usize> {
    individuals
        .iter()
        .enumerate()
        .min_by(|&(_, a), &(_, b)| compare_fitness(a, b))
        .map(|(idx, _)| idx)
}

/// Combined objective used to break ties within the non-dominated front.
/// Fitness is minimized; diversity is rewarded. An infinite DCN (no survivor
/// reference yet) collapses to the raw fitness term.
fn weighted_score<T: Individual>(individual: &T, diversity_weight: f64) -> f64 {
    let dcn = individual.diversity();
    if dcn.is_finite() {
        individual.fitness() - diversity_weight * dcn
    } else {
        individual.fitness()
    }
}

/// Extracts the indices of the non-dominated front over the two objectives
/// {fitness (minimize), diversity (maximize)}.
///
/// An individual is dominated when another is at least as good on both
/// objectives and strictly better on one.
fn non_dominated<T: Individual>(individuals: &[T]) -> Vec<usize> {
    let mut front = Vec::new();
    for (i, candidate) in individuals.iter().enumerate() {
        let dominated = individuals.iter().enumerate().any(|(j, other)| {
            j != i
                && other.fitness() <= candidate.fitness()
                && other.diversity() >= candidate.diversity()
                && (other.fitness() < candidate.fitness()
                    || other.diversity() > candidate.diversity())
        });
        if !dominated {
            front.push(i);
        }
    }
    front
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Counter {
        value: f64,
        diversity: f64,
    }

    impl Counter {
        fn new(value: f64, diversity: f64) -> Self {
            Self { value, diversity }
        }
    }

    impl Individual for Counter {
        fn init_random(&mut self, _rng: &mut RandomNumberGenerator) {}
        fn evaluate(&mut self) {}
        fn fitness(&self) -> f64 {
            self.value
        }
        fn mutate(&mut self, _probability: f64, _rng: &mut RandomNumberGenerator) {}
        fn cross(&mut self, _partner: &Self, _pos: usize) {}
        fn genotype_length(&self) -> usize {
            1
        }
        fn distance(&self, other: &Self) -> f64 {
            (self.value - other.value).abs()
        }
        fn diversity(&self) -> f64 {
            self.diversity
        }
        fn set_diversity(&mut self, diversity: f64) {
            self.diversity = diversity;
        }
    }

    #[test]
    fn test_non_dominated_front() {
        let pool = vec![
            Counter::new(1.0, 1.0), // non-dominated: best fitness
            Counter::new(2.0, 5.0), // non-dominated: best diversity
            Counter::new(3.0, 4.0), // dominated by (2.0, 5.0)
            Counter::new(2.0, 1.0), // dominated by (1.0, 1.0) and (2.0, 5.0)
        ];
        let front = non_dominated(&pool);
        assert_eq!(front, vec![0, 1]);
    }

    #[test]
    fn test_non_dominated_keeps_duplicates() {
        let pool = vec![Counter::new(1.0, 1.0), Counter::new(1.0, 1.0)];
        let front = non_dominated(&pool);
        assert_eq!(front.len(), 2);
    }

    #[test]
    fn test_min_fitness_index() {
        let pool = vec![
            Counter::new(3.0, 0.0),
            Counter::new(1.0, 0.0),
            Counter::new(2.0, 0.0),
        ];
        assert_eq!(min_fitness_index(&pool), Some(1));
        assert_eq!(min_fitness_index::<Counter>(&[]), None);
    }
}
