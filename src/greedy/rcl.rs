//! Restricted Candidate List selection.

use rand::Rng;

/// Picks one candidate among the `size` best-scored ones.
///
/// All three construction steps of the greedy (primary, secondary,
/// customer) are the same "score, rank, pick from the top `size`"
/// step; they differ only in the score and in how the pick consumes
/// residual capacity. [`select`](Self::select) takes both as closures
/// over an explicit state.
///
/// Lower scores are better. With `size == 1` the minimum-score
/// candidate is taken (first in candidate order on ties) and no
/// randomness is consumed.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_facility::greedy::RestrictedCandidateList;
///
/// let scores = [4.0, 1.0, 3.0, 2.0];
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let greedy = RestrictedCandidateList::new(1);
/// assert_eq!(greedy.pick(&[0, 1, 2, 3], |c| scores[c], &mut rng), Some(1));
///
/// let rcl = RestrictedCandidateList::new(2);
/// let picked = rcl.pick(&[0, 1, 2, 3], |c| scores[c], &mut rng).unwrap();
/// assert!(picked == 1 || picked == 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestrictedCandidateList {
    size: usize,
}

impl RestrictedCandidateList {
    /// Creates a list of the given width (clamped to at least 1).
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Ranks candidates ascending by score and returns the list the
    /// pick is drawn from: the first `min(size, candidates.len())`
    /// entries.
    pub fn restricted<F>(&self, candidates: &[usize], score: F) -> Vec<(usize, f64)>
    where
        F: Fn(usize) -> f64,
    {
        let mut ranked: Vec<(usize, f64)> = candidates.iter().map(|&c| (c, score(c))).collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(self.size);
        ranked
    }

    /// Picks a candidate index. Returns `None` if `candidates` is empty.
    pub fn pick<F, R>(&self, candidates: &[usize], score: F, rng: &mut R) -> Option<usize>
    where
        F: Fn(usize) -> f64,
        R: Rng,
    {
        if candidates.is_empty() {
            return None;
        }

        if self.size == 1 {
            return candidates
                .iter()
                .map(|&c| (c, score(c)))
                .reduce(|best, next| if next.1 < best.1 { next } else { best })
                .map(|(c, _)| c);
        }

        let rcl = self.restricted(candidates, score);
        Some(rcl[rng.random_range(0..rcl.len())].0)
    }

    /// Scores candidates against `state`, picks one, then lets `consume`
    /// update `state` for the pick.
    ///
    /// Returns the picked candidate together with the value `consume`
    /// produced, or `None` if there were no candidates.
    pub fn select<S, T, F, C, R>(
        &self,
        state: &mut S,
        candidates: &[usize],
        score: F,
        consume: C,
        rng: &mut R,
    ) -> Option<(usize, T)>
    where
        F: Fn(&S, usize) -> f64,
        C: FnOnce(&mut S, usize) -> T,
        R: Rng,
    {
        let picked = {
            let view: &S = &*state;
            self.pick(candidates, |c| score(view, c), rng)?
        };
        let consumed = consume(state, picked);
        Some((picked, consumed))
    }
}
