use bitvec::prelude::*;
use itertools::iproduct;

/// A dense, square boolean matrix used for both the adjacency and the
/// reachability relation of a topology.
///
/// Entry `(i, j)` is stored at bit `i * n + j`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
    n: usize,
    bits: BitVec,
}

impl BitMatrix {
    /// An `n`-by-`n` matrix with all entries cleared.
    pub fn new(n: usize) -> BitMatrix {
        BitMatrix {
            n,
            bits: BitVec::repeat(false, n * n),
        }
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        self.bits[i * self.n + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        self.bits.set(i * self.n + j, value)
    }

    /// The column indices of all set entries in row `i`, ascending.
    pub fn row_ones(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.bits[i * self.n..(i + 1) * self.n].iter_ones()
    }

    /// The row indices of all set entries in column `j`, ascending.
    pub fn column_ones(&self, j: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(move |&i| self.get(i, j))
    }

    pub fn count_row(&self, i: usize) -> usize {
        self.bits[i * self.n..(i + 1) * self.n].count_ones()
    }

    pub fn transposed(&self) -> BitMatrix {
        let mut t = BitMatrix::new(self.n);
        for (i, j) in iproduct!(0..self.n, 0..self.n) {
            t.set(j, i, self.get(i, j));
        }
        t
    }

    /// The first set entry `(i, j)` on or above the diagonal, if any.
    pub fn first_non_lower_entry(&self) -> Option<(usize, usize)> {
        (0..self.n).find_map(|i| self.row_ones(i).find(|&j| j >= i).map(|j| (i, j)))
    }

    /// The reflexive-free transitive closure (Warshall's algorithm).
    pub fn transitive_closure(&self) -> BitMatrix {
        let mut reach = self.clone();
        // k must be the outermost loop
        for (k, i, j) in iproduct!(0..self.n, 0..self.n, 0..self.n) {
            if !reach.get(i, j) && reach.get(i, k) && reach.get(k, j) {
                reach.set(i, j, true);
            }
        }
        reach
    }
}
