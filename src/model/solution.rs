//! Facility opening patterns and their optimized cost.

/// Hashable key identifying an open/close pattern.
///
/// Two solutions share a pattern iff their `open_i` and `open_j` vectors
/// are element-wise identical. Flow details are not part of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub open_i: Vec<u8>,
    pub open_j: Vec<u8>,
}

/// A facility opening pattern with its optimized total cost.
///
/// `open_i[i]` is `1` when primary `i` is open and `0` otherwise, and
/// likewise `open_j` for secondaries. Both vectors always have the
/// length of the corresponding index set of the instance they were
/// solved for. Solutions are produced by an
/// [`Optimizer`](crate::optimizer::Optimizer) and treated as values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Fixed opening plus transport cost.
    pub cost: f64,
    pub open_i: Vec<u8>,
    pub open_j: Vec<u8>,
}

impl Solution {
    pub fn new(cost: f64, open_i: Vec<u8>, open_j: Vec<u8>) -> Self {
        Self {
            cost,
            open_i,
            open_j,
        }
    }

    /// Returns `true` if both solutions open exactly the same facilities.
    pub fn same_pattern(&self, other: &Solution) -> bool {
        self.open_i == other.open_i && self.open_j == other.open_j
    }

    pub fn pattern(&self) -> Pattern {
        Pattern {
            open_i: self.open_i.clone(),
            open_j: self.open_j.clone(),
        }
    }

    /// Indices of open primary facilities.
    pub fn open_primaries(&self) -> Vec<usize> {
        ones(&self.open_i)
    }

    /// Indices of open secondary facilities.
    pub fn open_secondaries(&self) -> Vec<usize> {
        ones(&self.open_j)
    }
}

fn ones(bits: &[u8]) -> Vec<usize> {
    bits.iter()
        .enumerate()
        .filter(|(_, &b)| b != 0)
        .map(|(idx, _)| idx)
        .collect()
}
