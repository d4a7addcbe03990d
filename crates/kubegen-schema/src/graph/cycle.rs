use crate::{
    graph::{ResolvedItem, TypeNode},
    types::Cardinality,
};

/// Mark cyclic nodes and the fields that close cycles.
///
/// Strongly connected components are computed with an iterative Tarjan walk
/// so deeply nested schemas cannot overflow the stack. A node is cyclic when
/// its component has more than one member or it refers to itself. Singular
/// and optional message fields whose target shares the node's component are
/// flagged `boxed`: the emitter must introduce owned indirection there or
/// the generated struct would have infinite size.
pub(crate) fn mark(nodes: &mut [TypeNode]) {
    let n = nodes.len();

    let adjacency: Vec<Vec<usize>> = nodes
        .iter()
        .map(|node| {
            node.fields
                .iter()
                .filter_map(|field| match field.item {
                    ResolvedItem::Node(target) => Some(target.index()),
                    ResolvedItem::Primitive(_) => None,
                })
                .collect()
        })
        .collect();

    let components = strongly_connected(&adjacency);

    let mut member_count = vec![0usize; n];
    for &component in &components {
        member_count[component] += 1;
    }

    for (v, node) in nodes.iter_mut().enumerate() {
        let self_edge = adjacency[v].contains(&v);
        node.in_cycle = member_count[components[v]] > 1 || self_edge;

        for field in &mut node.fields {
            let ResolvedItem::Node(target) = field.item else {
                continue;
            };
            let closes_cycle = components[target.index()] == components[v]
                && (member_count[components[v]] > 1 || target.index() == v);

            if closes_cycle
                && matches!(field.cardinality, Cardinality::One | Cardinality::Opt)
            {
                field.boxed = true;
            }
        }
    }
}

/// Iterative Tarjan SCC; returns the component id per node.
fn strongly_connected(adjacency: &[Vec<usize>]) -> Vec<usize> {
    const UNVISITED: usize = usize::MAX;

    let n = adjacency.len();
    let mut order = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut components = vec![UNVISITED; n];
    let mut next_order = 0usize;
    let mut next_component = 0usize;

    for root in 0..n {
        if order[root] != UNVISITED {
            continue;
        }

        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        order[root] = next_order;
        low[root] = next_order;
        next_order += 1;
        stack.push(root);
        on_stack[root] = true;

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;

            if frame.1 < adjacency[v].len() {
                let w = adjacency[v][frame.1];
                frame.1 += 1;

                if order[w] == UNVISITED {
                    order[w] = next_order;
                    low[w] = next_order;
                    next_order += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    frames.push((w, 0));
                } else if on_stack[w] {
                    low[v] = low[v].min(order[w]);
                }
            } else {
                frames.pop();
                if let Some(parent) = frames.last() {
                    low[parent.0] = low[parent.0].min(low[v]);
                }
                if low[v] == order[v] {
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        components[w] = next_component;
                        if w == v {
                            break;
                        }
                    }
                    next_component += 1;
                }
            }
        }
    }

    components
}
