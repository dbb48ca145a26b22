//! # Block Permutation Catalog
//!
//! Per-block metadata computed once from the clues and immutable thereafter:
//! the missing-digit set of each block, the offsets of its free cells, and
//! the catalog of all permutations of the missing digits. The catalog is
//! factorial in the number of missing digits, which stays viable because most
//! blocks carry clues; a fully blank block of a 9×9 board tops out at
//! 9! = 362,880 entries.
//!
//! The catalog is shared read-only (behind an `Arc`) by every individual
//! cloned from the same board.

use super::board::Board;

/// Metadata for a single block.
#[derive(Debug, Clone)]
pub struct BlockInfo {
    /// Digits 1..=N absent among the block's clues, ascending.
    pub missing: Vec<u16>,
    /// Offsets (0..N, left-to-right, top-to-bottom) of the block's non-clue
    /// cells. Same length as `missing`.
    pub free_cells: Vec<usize>,
    /// All `missing.len()!` orderings of the missing digits, in lexicographic
    /// order. Each permutation assigns `permutation[i]` to
    /// `free_cells[i]`. A clue-complete block holds a single empty
    /// permutation.
    pub permutations: Vec<Vec<u16>>,
}

/// Per-block metadata for a whole board.
#[derive(Debug, Clone)]
pub struct BlockTable {
    blocks: Vec<BlockInfo>,
}

impl BlockTable {
    /// Computes the metadata for every block of `board` from its clues.
    pub fn new(board: &Board) -> Self {
        let size = board.size();
        let mut blocks = Vec::with_capacity(board.block_count());
        for b in 0..board.block_count() {
            let mut present = vec![false; size + 1];
            let mut free_cells = Vec::new();
            for c in 0..size {
                let (row, col) = board.block_cell(b, c);
                let clue = board.clue(row, col);
                if clue == 0 {
                    free_cells.push(c);
                } else {
                    present[clue as usize] = true;
                }
            }
            let missing: Vec<u16> = (1..=size as u16)
                .filter(|&d| !present[d as usize])
                .collect();
            let permutations = enumerate_permutations(&missing);
            blocks.push(BlockInfo {
                missing,
                free_cells,
                permutations,
            });
        }
        Self { blocks }
    }

    /// Metadata for block `b`.
    pub fn block(&self, b: usize) -> &BlockInfo {
        &self.blocks[b]
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over all block metadata in block order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockInfo> {
        self.blocks.iter()
    }
}

/// Enumerates all permutations of `values` in lexicographic order, starting
/// from the given (ascending) ordering. An empty input yields one empty
/// permutation.
fn enumerate_permutations(values: &[u16]) -> Vec<Vec<u16>> {
    let mut current = values.to_vec();
    let mut permutations = Vec::new();
    loop {
        permutations.push(current.clone());
        if !next_permutation(&mut current) {
            break;
        }
    }
    permutations
}

/// Rearranges `values` into the lexicographically next permutation. Returns
/// `false` once the ordering wrapped around to the first permutation.
fn next_permutation(values: &mut [u16]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let mut i = values.len() - 1;
    while i > 0 && values[i - 1] >= values[i] {
        i -= 1;
    }
    if i == 0 {
        values.reverse();
        return false;
    }
    let mut j = values.len() - 1;
    while values[j] <= values[i - 1] {
        j -= 1;
    }
    values.swap(i - 1, j);
    values[i..].reverse();
    true
}
