//! Append-only solution pool with pattern deduplication.

use std::collections::HashSet;

use crate::model::{Pattern, Solution};

/// Population of solutions maintained by the fixed set search.
///
/// Solutions are only ever appended, and a solution whose open/close
/// pattern is already present is rejected.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Solution>,
    patterns: HashSet<Pattern>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains_pattern(&self, solution: &Solution) -> bool {
        self.patterns.contains(&solution.pattern())
    }

    /// Appends `solution` unless its pattern is already present.
    ///
    /// Returns `true` if the solution was added.
    pub fn try_insert(&mut self, solution: Solution) -> bool {
        if !self.patterns.insert(solution.pattern()) {
            return false;
        }
        self.members.push(solution);
        true
    }

    /// Lowest-cost member (first one on ties).
    pub fn best(&self) -> Option<&Solution> {
        self.members
            .iter()
            .reduce(|best, s| if s.cost < best.cost { s } else { best })
    }

    /// The `n` lowest-cost members, ascending by cost.
    pub fn elite(&self, n: usize) -> Vec<&Solution> {
        let mut ranked: Vec<&Solution> = self.members.iter().collect();
        ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        ranked.truncate(n);
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.members.iter()
    }

    pub fn into_vec(self) -> Vec<Solution> {
        self.members
    }
}
