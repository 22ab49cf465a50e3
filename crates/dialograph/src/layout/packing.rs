//! Subtree packing.
//!
//! Nodes are placed in columns by placement depth. Each node's children are
//! stacked top to bottom with `row_gap` after every child but the last, and
//! the node itself is centered against the stack. The first placement of a
//! node wins; revisiting an already placed (or in-progress) node reserves
//! zero height but still takes its gap in the stack, which is what keeps
//! shared descendants and cycles finite.
//!
//! The walk keeps its own frame stack, so graph depth is bounded by memory
//! rather than by the thread's call stack.

use dialograph_core::geometry::{Point, Size};

use super::adjacency::Adjacency;

/// Placement state of a single node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Slot {
    Empty,
    /// On the current placement path.
    Pending,
    Placed(Point),
}

/// Spacing used while packing.
#[derive(Debug, Clone, Copy)]
pub(super) struct Spacing {
    pub node_size: Size,
    pub column_gap: f32,
    pub row_gap: f32,
}

/// Places every node reachable from `roots`.
///
/// With `ranks`, siblings are ordered by ascending rank (ties keep edge
/// order); without, edge order is used as is. Returns one slot per node.
pub(super) fn pack(
    adjacency: &Adjacency<'_>,
    roots: &[usize],
    ranks: Option<&[Option<f32>]>,
    spacing: Spacing,
) -> Vec<Slot> {
    let packer = Packer {
        adjacency,
        ranks,
        spacing,
    };
    let mut slots = vec![Slot::Empty; adjacency.len()];
    packer.run(roots, &mut slots);
    slots
}

/// One sibling stack being filled, owned by the node whose children it holds.
struct Frame {
    /// Node to place once the stack is complete; `None` for the root stack.
    owner: Option<usize>,
    siblings: Vec<usize>,
    next: usize,
    y_above: f32,
    /// Column of the siblings.
    depth: usize,
    /// Sum of `subtree height + row_gap` over visited siblings.
    height: f32,
}

struct Packer<'a, 'g> {
    adjacency: &'a Adjacency<'g>,
    ranks: Option<&'a [Option<f32>]>,
    spacing: Spacing,
}

impl Packer<'_, '_> {
    fn ordered(&self, siblings: &[usize]) -> Vec<usize> {
        let mut order = siblings.to_vec();
        if let Some(ranks) = self.ranks {
            let rank = |idx: usize| ranks[idx].unwrap_or(f32::INFINITY);
            order.sort_by(|&a, &b| rank(a).total_cmp(&rank(b)));
        }
        order
    }

    fn frame(&self, owner: Option<usize>, siblings: &[usize], y_above: f32, depth: usize) -> Frame {
        Frame {
            owner,
            siblings: self.ordered(siblings),
            next: 0,
            y_above,
            depth,
            height: 0.0,
        }
    }

    fn run(&self, roots: &[usize], slots: &mut [Slot]) {
        let row_gap = self.spacing.row_gap;
        let node_size = self.spacing.node_size;
        let mut frames = vec![self.frame(None, roots, 0.0, 0)];

        while let Some(frame) = frames.last_mut() {
            if let Some(&idx) = frame.siblings.get(frame.next) {
                frame.next += 1;
                if slots[idx] != Slot::Empty {
                    frame.height += row_gap;
                    continue;
                }
                slots[idx] = Slot::Pending;
                let y_above = frame.y_above + frame.height;
                let depth = frame.depth + 1;
                let child = self.frame(Some(idx), self.adjacency.children(idx), y_above, depth);
                frames.push(child);
                continue;
            }

            let Some(done) = frames.pop() else { break };
            let Some(idx) = done.owner else { break };

            let children_height = (done.height - row_gap).max(0.0);
            let x = (done.depth - 1) as f32 * (node_size.width() + self.spacing.column_gap);
            let y = done.y_above
                + row_gap
                + (children_height / 2.0 - node_size.height() / 2.0).max(0.0);
            slots[idx] = Slot::Placed(Point::new(x, y));

            if let Some(parent) = frames.last_mut() {
                parent.height += node_size.height().max(children_height) + row_gap;
            }
        }
    }
}
