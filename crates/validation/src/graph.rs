use crate::context::Lookup;
use std::collections::{HashMap, HashSet, VecDeque};
use uuid::Uuid;

/// Directed "requires" graph over subject ids: an edge `a -> b` means `a` requires `b`
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteGraph {
    edges: HashMap<Uuid, Vec<Uuid>>,
}

impl PrerequisiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every edge reachable from `root` through the lookup
    pub fn reachable_from(lookup: &dyn Lookup, root: Uuid) -> Self {
        let mut graph = Self::new();
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);

        while let Some(subject) = queue.pop_front() {
            for edge in lookup.prerequisites_of(subject) {
                let Some(required) = edge.required_subject_id else {
                    continue;
                };

                graph.add_edge(subject, required);
                if visited.insert(required) {
                    queue.push_back(required);
                }
            }
        }

        graph
    }

    fn add_edge(&mut self, subject: Uuid, required: Uuid) {
        let targets = self.edges.entry(subject).or_default();
        if !targets.contains(&required) {
            targets.push(required);
        }
    }

    /// Shortest chain of requirements leading from `from` to `to`, both ends included.
    ///
    /// Each node is expanded at most once, so the search terminates even if the
    /// stored graph already contains a cycle.
    pub fn path(&self, from: Uuid, to: Uuid) -> Option<Vec<Uuid>> {
        if from == to {
            return Some(vec![from]);
        }

        let mut parents: HashMap<Uuid, Uuid> = HashMap::new();
        let mut queue = VecDeque::from([from]);

        while let Some(node) = queue.pop_front() {
            for &next in self.edges.get(&node).into_iter().flatten() {
                if next == from || parents.contains_key(&next) {
                    continue;
                }
                parents.insert(next, node);

                if next == to {
                    let mut path = vec![to];
                    let mut cursor = to;
                    while let Some(&parent) = parents.get(&cursor) {
                        path.push(parent);
                        cursor = parent;
                    }
                    path.reverse();
                    return Some(path);
                }

                queue.push_back(next);
            }
        }

        None
    }

    /// The cycle adding `subject -> required` would close, starting and ending at `subject`
    pub fn cycle_through(&self, subject: Uuid, required: Uuid) -> Option<Vec<Uuid>> {
        let mut cycle = vec![subject];
        cycle.extend(self.path(required, subject)?);
        Some(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [Uuid; N] {
        std::array::from_fn(|_| Uuid::new_v4())
    }

    fn graph(edges: &[(Uuid, Uuid)]) -> PrerequisiteGraph {
        let mut graph = PrerequisiteGraph::new();
        for &(subject, required) in edges {
            graph.add_edge(subject, required);
        }
        graph
    }

    #[test]
    fn test_path_along_chain() {
        let [a, b, c] = ids::<3>();
        let graph = graph(&[(a, b), (b, c)]);

        assert_eq!(graph.path(a, c), Some(vec![a, b, c]));
        assert_eq!(graph.path(c, a), None);
        assert_eq!(graph.path(a, b), Some(vec![a, b]));
        assert_eq!(graph.path(b, a), None);
    }

    #[test]
    fn test_cycle_through() {
        let [a, b, c] = ids::<3>();
        let graph = graph(&[(a, b), (b, c)]);

        // c -> a would close a -> b -> c -> a
        assert_eq!(graph.cycle_through(c, a), Some(vec![c, a, b, c]));
        assert_eq!(graph.cycle_through(a, c), None);
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let [a] = ids::<1>();
        let graph = PrerequisiteGraph::new();

        assert_eq!(graph.cycle_through(a, a), Some(vec![a, a]));
    }

    #[test]
    fn test_path_terminates_on_existing_cycle() {
        let [a, b, c, d] = ids::<4>();
        let graph = graph(&[(a, b), (b, c), (c, a)]);

        assert_eq!(graph.path(a, d), None);
        assert_eq!(graph.path(b, a), Some(vec![b, c, a]));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let [a, b, c, d] = ids::<4>();
        let graph = graph(&[(a, b), (a, c), (b, d), (c, d)]);

        assert_eq!(graph.path(a, d).map(|path| path.len()), Some(3));
        assert!(graph.cycle_through(a, d).is_none());
        assert!(graph.cycle_through(d, a).is_some());
    }

    #[test]
    fn test_duplicate_edges_are_collapsed() {
        let [a, b] = ids::<2>();
        let graph = graph(&[(a, b), (a, b)]);

        assert_eq!(graph.edges[&a], vec![b]);
        assert!(!graph.edges.contains_key(&b));
    }
}
