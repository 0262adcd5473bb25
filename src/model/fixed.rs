//! Partial assignments of facility decisions.

use std::collections::BTreeMap;

use super::solution::Solution;

/// A partial assignment forcing some facilities open (`true`) or
/// closed (`false`) for a single optimizer call.
///
/// Facilities that do not appear in the set are free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedSet {
    primaries: BTreeMap<usize, bool>,
    secondaries: BTreeMap<usize, bool>,
}

impl FixedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes every facility to the value it has in `solution`.
    pub fn from_solution(solution: &Solution) -> Self {
        Self::from_pattern(&solution.open_i, &solution.open_j)
    }

    /// Fixes every facility to the given 0/1 pattern.
    pub fn from_pattern(open_i: &[u8], open_j: &[u8]) -> Self {
        Self {
            primaries: open_i.iter().map(|&b| b != 0).enumerate().collect(),
            secondaries: open_j.iter().map(|&b| b != 0).enumerate().collect(),
        }
    }

    pub fn fix_primary(&mut self, i: usize, open: bool) {
        self.primaries.insert(i, open);
    }

    pub fn fix_secondary(&mut self, j: usize, open: bool) {
        self.secondaries.insert(j, open);
    }

    pub fn primary(&self, i: usize) -> Option<bool> {
        self.primaries.get(&i).copied()
    }

    pub fn secondary(&self, j: usize) -> Option<bool> {
        self.secondaries.get(&j).copied()
    }

    /// Fixed primaries in index order.
    pub fn primaries(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.primaries.iter().map(|(&i, &v)| (i, v))
    }

    /// Fixed secondaries in index order.
    pub fn secondaries(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.secondaries.iter().map(|(&j, &v)| (j, v))
    }

    /// Number of fixed facilities.
    pub fn len(&self) -> usize {
        self.primaries.len() + self.secondaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pattern() {
        let fixed = FixedSet::from_pattern(&[1, 0], &[0, 0, 1]);
        assert_eq!(fixed.len(), 5);
        assert_eq!(fixed.primary(0), Some(true));
        assert_eq!(fixed.primary(1), Some(false));
        assert_eq!(fixed.secondary(2), Some(true));
        assert_eq!(fixed.secondary(3), None);
    }

    #[test]
    fn test_partial() {
        let mut fixed = FixedSet::new();
        assert!(fixed.is_empty());
        fixed.fix_secondary(4, false);
        fixed.fix_primary(1, true);
        fixed.fix_primary(1, false);
        assert_eq!(fixed.len(), 2);
        assert_eq!(fixed.primaries().collect::<Vec<_>>(), vec![(1, false)]);
        assert_eq!(fixed.secondaries().collect::<Vec<_>>(), vec![(4, false)]);
    }
}
