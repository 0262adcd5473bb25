//! Fixed set construction from elite consensus.

use rand::seq::index;
use rand::Rng;

use crate::model::{FixedSet, Instance, Solution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facility {
    Primary(usize),
    Secondary(usize),
}

/// Derives a partial assignment that freezes the facility decisions the
/// reference group agrees on most with `base`.
///
/// For every facility, its agreement is the number of reference
/// solutions whose open/closed value equals `base`'s. Facilities are
/// ranked by descending agreement; the top `size` are fixed to `base`'s
/// values. Facilities strictly above the agreement at rank `size` are
/// always taken; the remaining slots are filled by sampling uniformly
/// without replacement among the facilities tied at that rank.
///
/// Returns exactly `min(size, |I| + |J|)` entries.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_facility::mfss::build_fixed_set;
/// use u_facility::model::{Instance, Solution};
///
/// let inst = Instance::new(
///     vec![1.0, 1.0],
///     vec![1.0, 1.0],
///     vec![1.0],
///     vec![1.0],
///     vec![1.0],
///     vec![vec![1.0], vec![1.0]],
///     vec![vec![1.0]],
/// )
/// .unwrap();
///
/// let base = Solution::new(10.0, vec![1, 0], vec![1]);
/// let other = Solution::new(12.0, vec![1, 1], vec![1]);
/// let mut rng = StdRng::seed_from_u64(0);
///
/// // Primary 1 is the only decision the group disagrees on.
/// let fixed = build_fixed_set(&base, &[&base, &other], 2, &inst, &mut rng);
/// assert_eq!(fixed.len(), 2);
/// assert_eq!(fixed.primary(0), Some(true));
/// assert_eq!(fixed.secondary(0), Some(true));
/// assert_eq!(fixed.primary(1), None);
/// ```
pub fn build_fixed_set<R: Rng>(
    base: &Solution,
    reference: &[&Solution],
    size: usize,
    instance: &Instance,
    rng: &mut R,
) -> FixedSet {
    let mut scores: Vec<(usize, Facility)> =
        Vec::with_capacity(instance.facility_count());
    for i in 0..instance.primary_count() {
        let agreement = reference
            .iter()
            .filter(|s| s.open_i[i] == base.open_i[i])
            .count();
        scores.push((agreement, Facility::Primary(i)));
    }
    for j in 0..instance.secondary_count() {
        let agreement = reference
            .iter()
            .filter(|s| s.open_j[j] == base.open_j[j])
            .count();
        scores.push((agreement, Facility::Secondary(j)));
    }

    // Stable: ties keep primaries before secondaries, each in index order.
    scores.sort_by(|a, b| b.0.cmp(&a.0));

    let chosen: Vec<Facility> = if size >= scores.len() {
        scores.iter().map(|&(_, f)| f).collect()
    } else if size == 0 {
        Vec::new()
    } else {
        let cutoff = scores[size - 1].0;
        let mut chosen: Vec<Facility> = scores
            .iter()
            .filter(|&&(a, _)| a > cutoff)
            .map(|&(_, f)| f)
            .collect();
        let tied: Vec<Facility> = scores
            .iter()
            .filter(|&&(a, _)| a == cutoff)
            .map(|&(_, f)| f)
            .collect();
        let needed = size - chosen.len();
        chosen.extend(index::sample(rng, tied.len(), needed).into_iter().map(|k| tied[k]));
        chosen
    };

    let mut fixed = FixedSet::new();
    for facility in chosen {
        match facility {
            Facility::Primary(i) => fixed.fix_primary(i, base.open_i[i] != 0),
            Facility::Secondary(j) => fixed.fix_secondary(j, base.open_j[j] != 0),
        }
    }
    fixed
}
