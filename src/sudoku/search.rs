//! # Local Search Engine
//!
//! Board-specific refinement strategies for [`Sudoku`] individuals:
//!
//! - [`stochastic_local_search`](Sudoku::stochastic_local_search): pairwise
//!   free-cell swaps inside each block, accepted when the global conflict
//!   count does not increase.
//! - [`stochastic_local_search_all`](Sudoku::stochastic_local_search_all):
//!   exhaustive per-block search that scores every cataloged permutation of a
//!   block against the current rest-of-board conflict table and commits the
//!   best one.
//! - [`simulated_annealing`](Sudoku::simulated_annealing): Metropolis
//!   acceptance over random in-block swaps with a geometrically cooling
//!   temperature.
//!
//! All three share the same shape: evaluate, propose, accept or revert, and
//! stop on success, an exhausted budget, or stagnation.

use std::sync::Arc;

use tracing::trace;

use super::Sudoku;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Geometric cooling factor applied after every batch of proposals.
const COOLING_RATE: f64 = 0.999;

/// Number of proposals evaluated per temperature step.
const PROPOSALS_PER_BATCH: usize = 100;

impl Sudoku {
    /// Stochastic pairwise-swap local search over all blocks.
    ///
    /// Runs up to `repetitions` full board passes. Each pass visits every
    /// block and, for each free cell, tries swaps with the block's later free
    /// cells in random order, keeping the first swap that does not increase
    /// the global conflict count. Terminates early when no block improved in
    /// a pass or when the conflict count stagnated for more than 20% of
    /// `repetitions` passes.
    ///
    /// Updates the stored fitness and returns the number of passes executed.
    pub fn stochastic_local_search(
        &mut self,
        repetitions: usize,
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let tolerance = (repetitions as f64 * 0.20) as usize;
        let mut stagnant_passes = 0;
        let mut conflicts = self.board().conflicts();

        for pass in 0..repetitions {
            let mut any_improved = false;
            for b in 0..self.board().block_count() {
                any_improved |= self.pairwise_search_block(b, rng);
            }
            if !any_improved {
                self.evaluate();
                return pass;
            }

            let last_conflicts = conflicts;
            conflicts = self.board().conflicts();
            trace!(pass, conflicts, "local search pass");
            stagnant_passes = if conflicts == last_conflicts {
                stagnant_passes + 1
            } else {
                0
            };
            if stagnant_passes > tolerance {
                self.evaluate();
                return pass;
            }
        }
        self.evaluate();
        repetitions
    }

    /// Tries pairwise swaps between the free cells of block `b`, accepting
    /// any swap that does not increase the global conflict count. Returns
    /// whether any swap was accepted.
    fn pairwise_search_block(&mut self, b: usize, rng: &mut RandomNumberGenerator) -> bool {
        let blocks = Arc::clone(&self.blocks);
        let free_cells = &blocks.block(b).free_cells;
        let mut conflicts = self.board().conflicts();
        let mut block_improved = false;

        for (idx, &c) in free_cells.iter().enumerate() {
            let mut partners: Vec<usize> = free_cells[idx + 1..].to_vec();
            rng.shuffle(&mut partners);

            let cell = self.board().block_cell(b, c);
            for partner_offset in partners {
                let partner = self.board().block_cell(b, partner_offset);
                self.board.swap_cells(cell, partner);
                let attempt = self.board().conflicts();
                if attempt > conflicts {
                    self.board.swap_cells(cell, partner);
                } else {
                    conflicts = attempt;
                    block_improved = true;
                    break;
                }
            }
        }
        block_improved
    }

    /// Exhaustive-block local search.
    ///
    /// Each pass visits the blocks in random order. For every block the free
    /// cells are cleared, the marginal conflict of each candidate digit in
    /// each free cell is tabulated once via
    /// [`cell_conflicts`](super::Board::cell_conflicts), every cataloged
    /// permutation of the block is scored against the table, and the
    /// lowest-conflict permutation is committed. Terminates when the board
    /// reaches zero conflicts or the count stagnated for more than 25% of
    /// `repetitions` passes.
    ///
    /// Updates the stored fitness and returns the number of passes executed.
    pub fn stochastic_local_search_all(
        &mut self,
        repetitions: usize,
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let size = self.board().size();
        // Reusable conflict table: free-cell offset x candidate digit.
        let mut conflict_table = vec![vec![0i32; size]; size];
        let tolerance = (repetitions as f64 * 0.25) as usize;
        let mut stagnant_passes = 0;
        let mut last_conflicts = self.board().conflicts();
        let mut block_order: Vec<usize> = (0..self.board().block_count()).collect();

        for pass in 0..repetitions {
            rng.shuffle(&mut block_order);
            for &b in &block_order {
                self.exhaustive_search_block(b, &mut conflict_table, rng);
            }

            let conflicts = self.board().conflicts();
            trace!(pass, conflicts, "exhaustive block search pass");
            if conflicts == 0 {
                self.evaluate();
                return pass;
            }
            stagnant_passes = if conflicts == last_conflicts {
                stagnant_passes + 1
            } else {
                0
            };
            if stagnant_passes > tolerance {
                self.evaluate();
                return pass;
            }
            last_conflicts = conflicts;
        }
        self.evaluate();
        repetitions
    }

    /// Scores every cataloged permutation of block `b` against the current
    /// rest-of-board conflict table and commits the best one. Permutations
    /// are visited in random order so ties break arbitrarily.
    fn exhaustive_search_block(
        &mut self,
        b: usize,
        conflict_table: &mut [Vec<i32>],
        rng: &mut RandomNumberGenerator,
    ) {
        let blocks = Arc::clone(&self.blocks);
        let info = blocks.block(b);
        if info.free_cells.is_empty() {
            return;
        }

        self.board.clear_block(b);
        for &c in &info.free_cells {
            let (row, col) = self.board().block_cell(b, c);
            for &digit in &info.missing {
                conflict_table[c][digit as usize - 1] =
                    self.board().cell_conflicts(digit, row, col);
            }
        }

        let mut order: Vec<usize> = (0..info.permutations.len()).collect();
        rng.shuffle(&mut order);
        let mut best_conflicts = i32::MAX;
        let mut best_index = order[0];
        for idx in order {
            let permutation = &info.permutations[idx];
            let conflicts: i32 = permutation
                .iter()
                .enumerate()
                .map(|(i, &digit)| conflict_table[info.free_cells[i]][digit as usize - 1])
                .sum();
            if conflicts < best_conflicts {
                best_conflicts = conflicts;
                best_index = idx;
            }
        }
        self.board.set_block(b, &info.permutations[best_index]);
    }

    /// Simulated annealing refinement with classic Metropolis acceptance.
    ///
    /// Repeatedly picks a random block with at least two free cells and swaps
    /// two of its digits; the move is kept when the conflict delta is ≤ 0,
    /// and otherwise with probability `exp(-delta / t)`. The temperature
    /// cools geometrically after batches of 100 proposals. Stops when `t`
    /// falls below `t_min` or the board reaches zero conflicts; a board with
    /// no eligible block returns immediately.
    ///
    /// Updates the stored fitness and returns the conflict count reached,
    /// which is the best the schedule found on unsolvable boards.
    pub fn simulated_annealing(
        &mut self,
        mut t: f64,
        t_min: f64,
        rng: &mut RandomNumberGenerator,
    ) -> i32 {
        let blocks = Arc::clone(&self.blocks);
        let eligible: Vec<usize> = (0..blocks.len())
            .filter(|&b| blocks.block(b).free_cells.len() >= 2)
            .collect();
        let mut current = self.board().conflicts();
        if eligible.is_empty() {
            self.evaluate();
            return current;
        }

        while t_min < t && current > 0 {
            for _ in 0..PROPOSALS_PER_BATCH {
                let b = eligible[rng.gen_index(eligible.len())];
                let free_cells = &blocks.block(b).free_cells;
                let first = rng.gen_index(free_cells.len());
                let mut second = rng.gen_index(free_cells.len() - 1);
                if second >= first {
                    second += 1;
                }
                let cell_a = self.board().block_cell(b, free_cells[first]);
                let cell_b = self.board().block_cell(b, free_cells[second]);

                self.board.swap_cells(cell_a, cell_b);
                let neighbour = self.board().conflicts();
                let delta = neighbour - current;
                if delta <= 0 || rng.gen_probability() < (-(delta as f64) / t).exp() {
                    current = neighbour;
                } else {
                    self.board.swap_cells(cell_a, cell_b);
                }
                if current == 0 {
                    break;
                }
            }
            trace!(conflicts = current, temperature = t, "annealing batch");
            t *= COOLING_RATE;
        }

        self.evaluate();
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One block fully blank, every other block clue-complete.
    const ONE_OPEN_BLOCK: &str = "0 0 3 4\n0 0 1 2\n2 1 4 3\n4 3 2 1\n";

    #[test]
    fn test_exhaustive_search_solves_single_open_block() {
        let mut sudoku = Sudoku::parse(ONE_OPEN_BLOCK).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(11);
        sudoku.init_random(&mut rng);

        // The open block has 4 missing digits, so the catalog holds 4! = 24
        // permutations; one pass over them must find the unique solution.
        assert_eq!(sudoku.block_table().block(0).permutations.len(), 24);
        sudoku.stochastic_local_search_all(4, &mut rng);
        assert_eq!(sudoku.conflicts(), 0);
        assert_eq!(sudoku.fitness(), 0.0);
    }

    #[test]
    fn test_pairwise_search_never_worsens_conflicts() {
        let mut sudoku =
            Sudoku::parse("1 0 0 0\n0 4 0 0\n0 0 2 0\n0 0 0 3\n").unwrap();
        let mut rng = RandomNumberGenerator::from_seed(12);
        sudoku.init_random(&mut rng);
        let before = sudoku.conflicts();
        let passes = sudoku.stochastic_local_search(20, &mut rng);
        assert!(passes <= 20);
        assert!(sudoku.conflicts() <= before);
        assert_eq!(sudoku.fitness(), sudoku.conflicts() as f64);
    }

    #[test]
    fn test_local_search_preserves_clues() {
        let mut sudoku =
            Sudoku::parse("1 0 0 0\n0 4 0 0\n0 0 2 0\n0 0 0 3\n").unwrap();
        let mut rng = RandomNumberGenerator::from_seed(13);
        sudoku.init_random(&mut rng);
        sudoku.stochastic_local_search(10, &mut rng);
        sudoku.stochastic_local_search_all(10, &mut rng);
        sudoku.simulated_annealing(1.0, 0.5, &mut rng);

        let board = sudoku.board();
        for i in 0..board.size() {
            for j in 0..board.size() {
                if board.clue(i, j) != 0 {
                    assert_eq!(board.value(i, j), board.clue(i, j));
                }
            }
        }
    }

    #[test]
    fn test_annealing_terminates_on_unsolvable_board() {
        // Duplicate clues in row 0 make the board unsolvable: the conflict
        // count can never reach 0, so only the cooling schedule stops the
        // loop.
        let mut sudoku =
            Sudoku::parse("1 0 1 0\n0 0 0 0\n0 0 0 0\n0 0 0 0\n").unwrap();
        let mut rng = RandomNumberGenerator::from_seed(14);
        sudoku.init_random(&mut rng);
        let reached = sudoku.simulated_annealing(1.0, 0.001, &mut rng);
        assert!(reached > 0);
        assert_eq!(sudoku.fitness(), reached as f64);
    }

    #[test]
    fn test_annealing_returns_immediately_without_free_pairs() {
        let mut sudoku = Sudoku::parse("1 2 3 4\n3 4 1 2\n2 1 4 3\n4 3 2 1\n").unwrap();
        let mut rng = RandomNumberGenerator::from_seed(15);
        sudoku.init_random(&mut rng);
        let reached = sudoku.simulated_annealing(1.0, 0.001, &mut rng);
        assert_eq!(reached, 0);
    }

    #[test]
    fn test_annealing_solves_easy_board() {
        let mut sudoku = Sudoku::parse(ONE_OPEN_BLOCK).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(16);
        sudoku.init_random(&mut rng);
        let reached = sudoku.simulated_annealing(1.0, 0.0001, &mut rng);
        assert_eq!(reached, 0);
        assert_eq!(sudoku.conflicts(), 0);
    }
}
