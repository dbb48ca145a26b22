//! # Sudoku Subsystem
//!
//! The Sudoku representation of the [`Individual`] contract together with its
//! board model, conflict evaluator, block permutation catalog and local
//! search strategies:
//!
//! - [`Board`]: fixed clues + mutable working grid + conflict counting.
//! - [`BlockTable`]: per-block missing digits, free cells and the
//!   permutation catalog, computed once and shared read-only.
//! - [`Sudoku`]: the evolvable individual whose genotype loci are blocks.
//!   Local search and simulated annealing live in [`search`] as
//!   board-specific utilities; they are deliberately not part of the shared
//!   `Individual` contract.

pub mod blocks;
pub mod board;
pub mod search;

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

pub use blocks::{BlockInfo, BlockTable};
pub use board::{Board, CLUE_CONFLICT_WEIGHT};

/// A Sudoku candidate solution.
///
/// The genotype is the working grid, organized as N blocks; crossover and
/// mutation address blocks, never individual cells, so every variation keeps
/// each block a permutation of its missing digits. Fitness is the total
/// weighted conflict count over rows and columns (0 = solved).
///
/// Cloning shares the immutable [`BlockTable`] between individuals of the
/// same board.
#[derive(Debug, Clone)]
pub struct Sudoku {
    board: Board,
    blocks: Arc<BlockTable>,
    fitness: f64,
    diversity: f64,
}

impl Sudoku {
    /// Builds a Sudoku individual from board text (see [`Board::parse`]).
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self::from_board(Board::parse(input)?))
    }

    /// Builds a Sudoku individual from a board file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_board(Board::from_file(path)?))
    }

    fn from_board(board: Board) -> Self {
        let blocks = Arc::new(BlockTable::new(&board));
        let mut sudoku = Self {
            board,
            blocks,
            fitness: 0.0,
            diversity: 0.0,
        };
        sudoku.evaluate();
        sudoku
    }

    /// The underlying board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The shared block metadata.
    pub fn block_table(&self) -> &BlockTable {
        &self.blocks
    }

    /// Current total weighted conflict count.
    pub fn conflicts(&self) -> i32 {
        self.board.conflicts()
    }

    /// Fills each block with a uniformly random permutation of its missing
    /// digits and re-evaluates the fitness.
    pub fn init_random_solution(&mut self, rng: &mut RandomNumberGenerator) {
        let blocks = Arc::clone(&self.blocks);
        for b in 0..blocks.len() {
            let mut digits = blocks.block(b).missing.clone();
            rng.shuffle(&mut digits);
            self.board.set_block(b, &digits);
        }
        self.evaluate();
    }

    /// Greedy constructive initialization: fills each block with its missing
    /// digits, preferring for every free cell a digit not yet present in the
    /// cell's row, and falling back to an arbitrary leftover digit.
    pub fn init_constructive_solution(&mut self, rng: &mut RandomNumberGenerator) {
        let blocks = Arc::clone(&self.blocks);
        let size = self.board.size();
        for b in 0..blocks.len() {
            let mut digits = blocks.block(b).missing.clone();
            rng.shuffle(&mut digits);
            self.board.clear_block(b);
            for &c in &blocks.block(b).free_cells {
                if digits.is_empty() {
                    break;
                }
                let (row, col) = self.board.block_cell(b, c);
                let idx = digits
                    .iter()
                    .position(|&d| (0..size).all(|j| self.board.value(row, j) != d))
                    .unwrap_or(digits.len() - 1);
                self.board.set_value(row, col, digits.remove(idx));
            }
        }
        self.evaluate();
    }
}

impl Individual for Sudoku {
    fn init_random(&mut self, rng: &mut RandomNumberGenerator) {
        self.init_random_solution(rng);
    }

    fn evaluate(&mut self) {
        self.fitness = self.board.conflicts() as f64;
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    /// For each block with at least two free cells, with probability
    /// `probability / 100`, swaps the digits of two of its free cells.
    fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator) {
        let blocks = Arc::clone(&self.blocks);
        for b in 0..blocks.len() {
            let free_cells = &blocks.block(b).free_cells;
            if free_cells.len() < 2 {
                continue;
            }
            if rng.gen_percent() < probability {
                let first = rng.gen_index(free_cells.len());
                let mut second = rng.gen_index(free_cells.len() - 1);
                if second >= first {
                    second += 1;
                }
                let a = self.board.block_cell(b, free_cells[first]);
                let b_cell = self.board.block_cell(b, free_cells[second]);
                self.board.swap_cells(a, b_cell);
            }
        }
    }

    /// Copies every block at and after block index `pos` from the partner.
    /// Both individuals stem from the same clues, so whole-block copies keep
    /// the clue invariant.
    fn cross(&mut self, partner: &Self, pos: usize) {
        for b in pos..self.board.block_count() {
            for c in 0..self.board.size() {
                let (row, col) = self.board.block_cell(b, c);
                if !self.board.is_clue(row, col) {
                    self.board.set_value(row, col, partner.board.value(row, col));
                }
            }
        }
    }

    /// Loci are blocks, so the genotype length is the block count N.
    fn genotype_length(&self) -> usize {
        self.board.block_count()
    }

    /// Number of cells where the two working grids differ.
    fn distance(&self, other: &Self) -> f64 {
        self.board
            .cells()
            .iter()
            .zip(other.board.cells().iter())
            .filter(|(a, b)| a != b)
            .count() as f64
    }

    fn diversity(&self) -> f64 {
        self.diversity
    }

    fn set_diversity(&mut self, diversity: f64) {
        self.diversity = diversity;
    }

    fn known_optimum(&self) -> Option<f64> {
        Some(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTIAL_4X4: &str = "1 0 0 0\n0 4 0 0\n0 0 2 0\n0 0 0 3\n";

    fn clue_invariant_holds(sudoku: &Sudoku) -> bool {
        let board = sudoku.board();
        (0..board.size()).all(|i| {
            (0..board.size())
                .all(|j| board.clue(i, j) == 0 || board.value(i, j) == board.clue(i, j))
        })
    }

    #[test]
    fn test_init_random_fills_blocks_with_missing_digits() {
        let mut sudoku = Sudoku::parse(PARTIAL_4X4).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);
        sudoku.init_random(&mut rng);

        assert!(clue_invariant_holds(&sudoku));
        // After initialization every block is a permutation of 1..=4.
        assert_eq!(sudoku.board().block_conflicts(), 0);
        assert_eq!(sudoku.fitness(), sudoku.conflicts() as f64);
    }

    #[test]
    fn test_constructive_init_respects_clues() {
        let mut sudoku = Sudoku::parse(PARTIAL_4X4).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(2);
        sudoku.init_constructive_solution(&mut rng);
        assert!(clue_invariant_holds(&sudoku));
        assert_eq!(sudoku.board().block_conflicts(), 0);
    }

    #[test]
    fn test_mutation_preserves_clues_and_block_contents() {
        let mut sudoku = Sudoku::parse(PARTIAL_4X4).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(3);
        sudoku.init_random(&mut rng);
        for _ in 0..50 {
            sudoku.mutate(100.0, &mut rng);
        }
        assert!(clue_invariant_holds(&sudoku));
        assert_eq!(sudoku.board().block_conflicts(), 0);
    }

    #[test]
    fn test_cross_copies_tail_blocks() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let mut receiver = Sudoku::parse(PARTIAL_4X4).unwrap();
        let mut partner = Sudoku::parse(PARTIAL_4X4).unwrap();
        receiver.init_random(&mut rng);
        partner.init_random(&mut rng);

        let length_before = receiver.genotype_length();
        receiver.cross(&partner, 2);
        assert_eq!(receiver.genotype_length(), length_before);
        assert!(clue_invariant_holds(&receiver));

        // Blocks 2 and 3 now match the partner cell for cell.
        for b in 2..4 {
            for c in 0..4 {
                let (row, col) = receiver.board().block_cell(b, c);
                assert_eq!(receiver.board().value(row, col), partner.board().value(row, col));
            }
        }
    }

    #[test]
    fn test_distance_counts_differing_cells() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut a = Sudoku::parse(PARTIAL_4X4).unwrap();
        let b = {
            let mut b = Sudoku::parse(PARTIAL_4X4).unwrap();
            b.init_random(&mut rng);
            b
        };
        a.init_random(&mut rng);
        assert_eq!(a.distance(&a), 0.0);
        assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn test_solved_board_has_zero_fitness() {
        let mut sudoku = Sudoku::parse("1 2 3 4\n3 4 1 2\n2 1 4 3\n4 3 2 1\n").unwrap();
        let mut rng = RandomNumberGenerator::from_seed(6);
        sudoku.init_random(&mut rng);
        assert_eq!(sudoku.conflicts(), 0);
        assert_eq!(sudoku.fitness(), 0.0);
    }
}
