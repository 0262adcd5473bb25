//! Min-cost flow routing for a fixed facility pattern.
//!
//! Once the open facilities are known, the TSCFLP reduces to a
//! transshipment problem. It is solved on the network
//!
//! ```text
//! source ─U[i]→ primary i ─c[i][j]→ in(j) ─V[j]→ out(j) ─d[j][k]→ customer k ─D[k]→ sink
//! ```
//!
//! with successive shortest augmenting paths (Bellman–Ford on the
//! residual graph, which carries negative reverse arcs).
//!
//! # References
//!
//! Ahuja, Magnanti & Orlin (1993), *Network Flows*, Chapter 9

use crate::model::Instance;

/// Residual capacities below this are treated as saturated.
const FLOW_EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Edge {
    to: usize,
    cap: f64,
    cost: f64,
}

/// Residual network stored as paired forward/backward arcs.
struct Network {
    arcs: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl Network {
    fn new(nodes: usize) -> Self {
        Self {
            arcs: Vec::new(),
            adjacency: vec![Vec::new(); nodes],
        }
    }

    fn add_arc(&mut self, from: usize, to: usize, cap: f64, cost: f64) {
        self.adjacency[from].push(self.arcs.len());
        self.arcs.push(Edge { to, cap, cost });
        self.adjacency[to].push(self.arcs.len());
        self.arcs.push(Edge {
            to: from,
            cap: 0.0,
            cost: -cost,
        });
    }

    /// Bellman–Ford from `source`. Returns the predecessor arc of every
    /// node reachable through arcs with positive residual capacity.
    fn shortest_paths(&self, source: usize) -> Vec<Option<usize>> {
        let n = self.adjacency.len();
        let mut dist = vec![f64::INFINITY; n];
        let mut pred = vec![None; n];
        dist[source] = 0.0;

        for _ in 0..n {
            let mut changed = false;
            for u in 0..n {
                if dist[u].is_infinite() {
                    continue;
                }
                for &a in &self.adjacency[u] {
                    let arc = &self.arcs[a];
                    if arc.cap <= FLOW_EPS {
                        continue;
                    }
                    let candidate = dist[u] + arc.cost;
                    if candidate < dist[arc.to] - 1e-12 {
                        dist[arc.to] = candidate;
                        pred[arc.to] = Some(a);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        pred
    }

    /// Pushes up to `amount` units from `source` to `sink` along
    /// cheapest paths. Returns `(shipped, cost)`.
    fn push(&mut self, source: usize, sink: usize, amount: f64) -> (f64, f64) {
        let mut shipped = 0.0;
        let mut cost = 0.0;

        while amount - shipped > FLOW_EPS {
            let pred = self.shortest_paths(source);
            if pred[sink].is_none() {
                break;
            }

            // Bottleneck along the path
            let mut bottleneck = amount - shipped;
            let mut node = sink;
            while let Some(a) = pred[node] {
                bottleneck = bottleneck.min(self.arcs[a].cap);
                node = self.arcs[a ^ 1].to;
            }
            if bottleneck <= FLOW_EPS {
                break;
            }

            let mut node = sink;
            while let Some(a) = pred[node] {
                self.arcs[a].cap -= bottleneck;
                self.arcs[a ^ 1].cap += bottleneck;
                cost += bottleneck * self.arcs[a].cost;
                node = self.arcs[a ^ 1].to;
            }
            shipped += bottleneck;
        }
        (shipped, cost)
    }
}

/// Computes the optimal transport cost of routing all demand through
/// the open facilities.
///
/// `open_i` and `open_j` must have the lengths of the instance's index
/// sets. Returns `None` if the open facilities cannot carry the full
/// demand. Fixed opening costs are not included.
///
/// # Examples
///
/// ```
/// use u_facility::model::Instance;
/// use u_facility::optimizer::min_cost_flow;
///
/// let inst = Instance::new(
///     vec![0.0],
///     vec![10.0],
///     vec![0.0, 0.0],
///     vec![10.0, 10.0],
///     vec![4.0],
///     vec![vec![1.0, 5.0]],
///     vec![vec![1.0], vec![1.0]],
/// )
/// .unwrap();
///
/// // 4 units through secondary 0 at 1 + 1 per unit
/// let cost = min_cost_flow(&inst, &[true], &[true, true]).unwrap();
/// assert!((cost - 8.0).abs() < 1e-9);
///
/// assert!(min_cost_flow(&inst, &[false], &[true, true]).is_none());
/// ```
pub fn min_cost_flow(instance: &Instance, open_i: &[bool], open_j: &[bool]) -> Option<f64> {
    let n_i = instance.primary_count();
    let n_j = instance.secondary_count();
    let n_k = instance.customer_count();
    let total = instance.total_demand();
    if total <= FLOW_EPS {
        return Some(0.0);
    }

    // Node layout: source, primaries, secondary in/out, customers, sink
    let source = 0;
    let primary = |i: usize| 1 + i;
    let sec_in = |j: usize| 1 + n_i + j;
    let sec_out = |j: usize| 1 + n_i + n_j + j;
    let customer = |k: usize| 1 + n_i + 2 * n_j + k;
    let sink = 1 + n_i + 2 * n_j + n_k;

    let mut net = Network::new(sink + 1);

    for i in (0..n_i).filter(|&i| open_i[i]) {
        net.add_arc(source, primary(i), instance.primary_capacity(i), 0.0);
        for j in (0..n_j).filter(|&j| open_j[j]) {
            net.add_arc(primary(i), sec_in(j), total, instance.upstream_cost(i, j));
        }
    }
    for j in (0..n_j).filter(|&j| open_j[j]) {
        net.add_arc(sec_in(j), sec_out(j), instance.secondary_capacity(j), 0.0);
        for k in 0..n_k {
            net.add_arc(sec_out(j), customer(k), total, instance.downstream_cost(j, k));
        }
    }
    for k in 0..n_k {
        net.add_arc(customer(k), sink, instance.demand(k), 0.0);
    }

    let (shipped, cost) = net.push(source, sink, total);
    if total - shipped > 1e-6 * total.max(1.0) {
        return None;
    }
    Some(cost)
}
