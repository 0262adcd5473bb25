//! TSCFLP instance data.

use thiserror::Error;

/// Errors raised while building an [`Instance`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// Two vectors that describe the same index set differ in length.
    #[error("{field} has length {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A cost, capacity or demand is negative, NaN or infinite.
    #[error("{field}[{index}] must be finite and non-negative, got {value}")]
    InvalidValue {
        field: &'static str,
        index: usize,
        value: f64,
    },
}

/// A Two-Stage Capacitated Facility Location instance.
///
/// Flow leaves primary facilities `i ∈ I`, passes through secondary
/// facilities `j ∈ J` and reaches customers `k ∈ K`.
///
/// - `f[i]`, `U[i]`: fixed opening cost and capacity of primary `i`
/// - `g[j]`, `V[j]`: fixed opening cost and capacity of secondary `j`
/// - `D[k]`: demand of customer `k`
/// - `c[i][j]`: unit transport cost primary → secondary
/// - `d[j][k]`: unit transport cost secondary → customer
///
/// The instance is immutable once built. Capacity sufficiency
/// (`ΣU ≥ ΣD`, `ΣV ≥ ΣD`) is not checked here; an instance that cannot
/// cover its demand is reported by the constructor or the optimizer.
///
/// # Examples
///
/// ```
/// use u_facility::model::Instance;
///
/// let inst = Instance::new(
///     vec![100.0],            // f
///     vec![50.0],             // U
///     vec![40.0, 60.0],       // g
///     vec![30.0, 30.0],       // V
///     vec![20.0, 25.0],       // D
///     vec![vec![1.0, 2.0]],   // c
///     vec![vec![3.0, 4.0], vec![2.0, 1.0]], // d
/// )
/// .unwrap();
///
/// assert_eq!(inst.facility_count(), 3);
/// assert!((inst.total_demand() - 45.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    f: Vec<f64>,
    u: Vec<f64>,
    g: Vec<f64>,
    v: Vec<f64>,
    demand: Vec<f64>,
    c: Vec<Vec<f64>>,
    d: Vec<Vec<f64>>,
}

impl Instance {
    /// Builds an instance after checking shapes and value ranges.
    pub fn new(
        f: Vec<f64>,
        u: Vec<f64>,
        g: Vec<f64>,
        v: Vec<f64>,
        demand: Vec<f64>,
        c: Vec<Vec<f64>>,
        d: Vec<Vec<f64>>,
    ) -> Result<Self, InstanceError> {
        let n_i = f.len();
        let n_j = g.len();
        let n_k = demand.len();

        expect_len("U", n_i, u.len())?;
        expect_len("V", n_j, v.len())?;
        expect_len("c", n_i, c.len())?;
        for row in &c {
            expect_len("c row", n_j, row.len())?;
        }
        expect_len("d", n_j, d.len())?;
        for row in &d {
            expect_len("d row", n_k, row.len())?;
        }

        check_values("f", &f)?;
        check_values("U", &u)?;
        check_values("g", &g)?;
        check_values("V", &v)?;
        check_values("D", &demand)?;
        for row in &c {
            check_values("c", row)?;
        }
        for row in &d {
            check_values("d", row)?;
        }

        Ok(Self {
            f,
            u,
            g,
            v,
            demand,
            c,
            d,
        })
    }

    /// Number of primary facilities `|I|`.
    pub fn primary_count(&self) -> usize {
        self.f.len()
    }

    /// Number of secondary facilities `|J|`.
    pub fn secondary_count(&self) -> usize {
        self.g.len()
    }

    /// Number of customers `|K|`.
    pub fn customer_count(&self) -> usize {
        self.demand.len()
    }

    /// Total number of facility decisions `|I| + |J|`.
    pub fn facility_count(&self) -> usize {
        self.primary_count() + self.secondary_count()
    }

    pub fn primary_cost(&self, i: usize) -> f64 {
        self.f[i]
    }

    pub fn primary_capacity(&self, i: usize) -> f64 {
        self.u[i]
    }

    pub fn secondary_cost(&self, j: usize) -> f64 {
        self.g[j]
    }

    pub fn secondary_capacity(&self, j: usize) -> f64 {
        self.v[j]
    }

    pub fn demand(&self, k: usize) -> f64 {
        self.demand[k]
    }

    /// Unit cost of moving flow from primary `i` to secondary `j`.
    pub fn upstream_cost(&self, i: usize, j: usize) -> f64 {
        self.c[i][j]
    }

    /// Unit cost of moving flow from secondary `j` to customer `k`.
    pub fn downstream_cost(&self, j: usize, k: usize) -> f64 {
        self.d[j][k]
    }

    pub fn primary_capacities(&self) -> &[f64] {
        &self.u
    }

    pub fn secondary_capacities(&self) -> &[f64] {
        &self.v
    }

    pub fn demands(&self) -> &[f64] {
        &self.demand
    }

    /// Sum of all customer demand.
    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }
}

fn expect_len(field: &'static str, expected: usize, actual: usize) -> Result<(), InstanceError> {
    if expected != actual {
        return Err(InstanceError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_values(field: &'static str, values: &[f64]) -> Result<(), InstanceError> {
    match values
        .iter()
        .enumerate()
        .find(|(_, &x)| !x.is_finite() || x < 0.0)
    {
        Some((index, &value)) => Err(InstanceError::InvalidValue {
            field,
            index,
            value,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Result<Instance, InstanceError> {
        Instance::new(
            vec![10.0, 20.0],
            vec![5.0, 5.0],
            vec![1.0],
            vec![10.0],
            vec![3.0, 4.0],
            vec![vec![1.0], vec![2.0]],
            vec![vec![1.0, 1.0]],
        )
    }

    #[test]
    fn test_counts() {
        let inst = tiny().unwrap();
        assert_eq!(inst.primary_count(), 2);
        assert_eq!(inst.secondary_count(), 1);
        assert_eq!(inst.customer_count(), 2);
        assert_eq!(inst.facility_count(), 3);
        assert!((inst.total_demand() - 7.0).abs() < 1e-12);
        assert!((inst.upstream_cost(1, 0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        let err = Instance::new(
            vec![10.0, 20.0],
            vec![5.0],
            vec![1.0],
            vec![10.0],
            vec![3.0],
            vec![vec![1.0], vec![2.0]],
            vec![vec![1.0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            InstanceError::LengthMismatch {
                field: "U",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_ragged_matrix() {
        let err = Instance::new(
            vec![1.0],
            vec![5.0],
            vec![1.0, 1.0],
            vec![10.0, 10.0],
            vec![3.0],
            vec![vec![1.0]],
            vec![vec![1.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            InstanceError::LengthMismatch {
                field: "c row",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_value() {
        let err = Instance::new(
            vec![1.0],
            vec![5.0],
            vec![1.0],
            vec![10.0],
            vec![3.0, -1.0],
            vec![vec![1.0]],
            vec![vec![1.0, 1.0]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            InstanceError::InvalidValue {
                field: "D",
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let err = Instance::new(
            vec![f64::NAN],
            vec![5.0],
            vec![1.0],
            vec![10.0],
            vec![3.0],
            vec![vec![1.0]],
            vec![vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, InstanceError::InvalidValue { field: "f", .. }));
    }
}
