//! Vertical ordering by spring relaxation.
//!
//! Every reachable node gets a real-valued rank. Ranks start at the node's
//! position among its discoverer's children and are then pulled toward the
//! ranks of edge neighbors (weight `edge_stiffness`) and of other nodes in
//! the same flow (weight `flow_stiffness`). Updates are applied in place, in
//! traversal order, so later nodes of an iteration already see the moves of
//! earlier ones. Ranks are only ever used as sort keys.

use log::{debug, trace};

use dialograph_core::graph::Graph;

use super::adjacency::Adjacency;

/// Tuning of the relaxation pass.
#[derive(Debug, Clone, Copy)]
pub(super) struct RelaxParams {
    pub edge_stiffness: f32,
    pub flow_stiffness: f32,
    pub iterations: usize,
    pub convergence_threshold: Option<f32>,
}

/// Computes the rank of every node reachable from `roots`.
///
/// Unreachable nodes get `None`, and are skipped as neighbors.
pub(super) fn relax(
    graph: &Graph,
    adjacency: &Adjacency<'_>,
    roots: &[usize],
    params: RelaxParams,
) -> Vec<Option<f32>> {
    let order = adjacency.preorder(roots);
    let mut ranks: Vec<Option<f32>> = vec![None; adjacency.len()];
    for &(idx, position) in &order {
        ranks[idx] = Some(position as f32);
    }

    let flows: Vec<&str> = graph.nodes().iter().map(|node| node.flow()).collect();

    for iteration in 0..params.iterations {
        let mut max_delta = 0.0f32;
        for &(idx, _) in &order {
            let Some(own) = ranks[idx] else {
                continue;
            };

            let edge_pull: f32 = adjacency
                .children(idx)
                .iter()
                .chain(adjacency.parents(idx))
                .filter_map(|&other| ranks[other])
                .map(|other| other - own)
                .sum();

            let flow_pull: f32 = flows
                .iter()
                .enumerate()
                .filter(|&(other, flow)| other != idx && *flow == flows[idx])
                .filter_map(|(other, _)| ranks[other])
                .map(|other| other - own)
                .sum();

            let delta = params.edge_stiffness * edge_pull + params.flow_stiffness * flow_pull;
            ranks[idx] = Some(own + delta);
            max_delta = max_delta.max(delta.abs());
        }

        trace!(iteration, max_delta; "Relaxation step");
        if params
            .convergence_threshold
            .is_some_and(|threshold| max_delta <= threshold)
        {
            debug!(iterations = iteration + 1; "Relaxation converged early");
            break;
        }
    }

    ranks
}
