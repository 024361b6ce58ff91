//! Merge captured call stacks into a prefix-tree forest.
//!
//! Repeated identical call chains collapse into one counted node;
//! divergent chains branch at the point of divergence. This is a trie
//! over stacks, O(total stack length) in time and space.

use std::collections::BTreeMap;
use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::tracker::OperationStat;

/// One node of the merged call forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlameNode {
    /// Operation name at this position
    pub name: String,

    /// Occurrences of this exact path across all stacks
    pub value: u64,

    /// Global invocation count for `name`, identical on every node
    /// sharing that name
    pub total: u64,

    /// Child nodes, in order of first appearance
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<FlameNode>,
}

/// Node storage while the forest is under construction. Children are
/// arena indices so a path-to-node map can coexist with tree edges.
struct ArenaNode {
    name: String,
    value: u64,
    children: Vec<usize>,
}

/// Build the merged forest for `stacks`, annotating each node with the
/// global `total_count` of its operation from `stats`.
///
/// Returns a forest rather than a single tree: stacks with distinct root
/// names produce distinct roots.
pub fn build_forest(
    stacks: &[Vec<String>],
    stats: &BTreeMap<String, OperationStat>,
) -> Vec<FlameNode> {
    debug!("building call forest from {} stacks", stacks.len());

    let mut arena: Vec<ArenaNode> = Vec::new();
    let mut by_path: HashMap<String, usize> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();

    for stack in stacks {
        let mut path = String::new();
        let mut parent: Option<usize> = None;

        for name in stack {
            if !path.is_empty() {
                path.push(';');
            }
            path.push_str(name);

            let id = match by_path.get(&path) {
                Some(&id) => {
                    arena[id].value += 1;
                    id
                }
                None => {
                    let id = arena.len();
                    arena.push(ArenaNode {
                        name: name.clone(),
                        value: 1,
                        children: Vec::new(),
                    });
                    by_path.insert(path.clone(), id);
                    match parent {
                        Some(p) => arena[p].children.push(id),
                        None => roots.push(id),
                    }
                    id
                }
            };
            parent = Some(id);
        }
    }

    let forest = roots
        .iter()
        .map(|&id| materialize(&arena, stats, id))
        .collect::<Vec<_>>();

    debug!("call forest has {} roots, {} nodes", forest.len(), arena.len());
    forest
}

fn materialize(arena: &[ArenaNode], stats: &BTreeMap<String, OperationStat>, id: usize) -> FlameNode {
    let node = &arena[id];
    FlameNode {
        name: node.name.clone(),
        value: node.value,
        total: stats.get(&node.name).map(|s| s.total_count).unwrap_or(0),
        children: node
            .children
            .iter()
            .map(|&child| materialize(arena, stats, child))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input_empty_forest() {
        let forest = build_forest(&[], &BTreeMap::new());
        assert!(forest.is_empty());
    }

    #[test]
    fn test_single_stack_single_chain() {
        let forest = build_forest(&[stack(&["user", "account"])], &BTreeMap::new());
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "user");
        assert_eq!(forest[0].value, 1);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].name, "account");
    }

    #[test]
    fn test_total_defaults_to_zero_without_stat() {
        let forest = build_forest(&[stack(&["user"])], &BTreeMap::new());
        assert_eq!(forest[0].total, 0);
    }
}
