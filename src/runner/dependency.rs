//! Dependency graph for step execution ordering.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{FlowError, Result};

/// Represents the dependency relationships between steps.
///
/// Dependencies on names that are not part of the graph are kept aside as
/// unresolved; they do not constrain ordering.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Map of step name to its registered direct dependencies.
    dependencies: BTreeMap<String, BTreeSet<String>>,
    /// Map of step name to steps that depend on it.
    dependents: BTreeMap<String, BTreeSet<String>>,
    /// Map of step name to dependencies that are not in the graph.
    unresolved: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Create a new dependency graph builder.
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::new()
    }

    /// Get the direct dependencies of a step.
    pub fn dependencies_of(&self, step: &str) -> Option<&BTreeSet<String>> {
        self.dependencies.get(step)
    }

    /// Get steps that depend on the given step.
    pub fn dependents_of(&self, step: &str) -> Option<&BTreeSet<String>> {
        self.dependents.get(step)
    }

    /// Dependencies of a step that name no step in the graph.
    pub fn unresolved_of(&self, step: &str) -> Option<&BTreeSet<String>> {
        self.unresolved.get(step)
    }

    /// Check if a step exists in the graph.
    pub fn contains(&self, step: &str) -> bool {
        self.dependencies.contains_key(step)
    }

    /// Iterate over all step names in lexicographic order.
    pub fn steps(&self) -> impl Iterator<Item = &String> {
        self.dependencies.keys()
    }

    /// Get the number of steps in the graph.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Returns steps in topological order (dependencies before dependents).
    ///
    /// Ties between ready steps are broken lexicographically, so identical
    /// graphs always produce the same order. A step depending on itself is a
    /// cycle.
    ///
    /// Returns [`FlowError::CyclicDependency`] if a cycle is detected.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        let mut in_degree: BTreeMap<&str, usize> = self
            .dependencies
            .iter()
            .map(|(step, deps)| (step.as_str(), deps.len()))
            .collect();

        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&step, _)| step)
            .collect();

        let mut result = Vec::with_capacity(self.len());

        while let Some(step) = ready.pop_first() {
            result.push(step.to_string());

            if let Some(dependents) = self.dependents.get(step) {
                for dependent in dependents {
                    if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            ready.insert(dependent.as_str());
                        }
                    }
                }
            }
        }

        if result.len() != self.len() {
            return Err(FlowError::CyclicDependency);
        }

        Ok(result)
    }

    /// Find a cycle in the graph, returning the path if one exists.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Unvisited,
            Visiting,
            Visited,
        }

        fn dfs<'a>(
            node: &'a str,
            graph: &'a DependencyGraph,
            state: &mut BTreeMap<&'a str, State>,
            path: &mut Vec<String>,
        ) -> Option<Vec<String>> {
            state.insert(node, State::Visiting);
            path.push(node.to_string());

            if let Some(deps) = graph.dependencies.get(node) {
                for dep in deps {
                    match state.get(dep.as_str()) {
                        Some(State::Visiting) => {
                            let cycle_start = path.iter().position(|s| s == dep)?;
                            let mut cycle: Vec<String> = path[cycle_start..].to_vec();
                            cycle.push(dep.clone());
                            return Some(cycle);
                        }
                        Some(State::Unvisited) | None => {
                            if let Some(cycle) = dfs(dep, graph, state, path) {
                                return Some(cycle);
                            }
                        }
                        Some(State::Visited) => {}
                    }
                }
            }

            path.pop();
            state.insert(node, State::Visited);
            None
        }

        let mut state: BTreeMap<&str, State> = self
            .dependencies
            .keys()
            .map(|s| (s.as_str(), State::Unvisited))
            .collect();
        let mut path: Vec<String> = Vec::new();

        for step in self.dependencies.keys() {
            if state.get(step.as_str()) == Some(&State::Unvisited) {
                if let Some(cycle) = dfs(step, self, &mut state, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }
}

/// Builder for constructing a DependencyGraph.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    declared: BTreeMap<String, Vec<String>>,
}

impl DependencyGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step with its dependencies.
    pub fn add_step<I, S>(mut self, name: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared
            .entry(name.into())
            .or_default()
            .extend(depends_on.into_iter().map(Into::into));
        self
    }

    /// Build the dependency graph.
    ///
    /// Duplicate dependency entries collapse to one edge. Dependencies on
    /// unknown steps are recorded as unresolved instead of failing.
    pub fn build(self) -> DependencyGraph {
        let mut dependencies: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut dependents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut unresolved: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for step in self.declared.keys() {
            dependencies.insert(step.clone(), BTreeSet::new());
            dependents.insert(step.clone(), BTreeSet::new());
        }

        for (step, deps) in &self.declared {
            for dep in deps {
                if self.declared.contains_key(dep) {
                    dependencies
                        .entry(step.clone())
                        .or_default()
                        .insert(dep.clone());
                    dependents
                        .entry(dep.clone())
                        .or_default()
                        .insert(step.clone());
                } else {
                    unresolved
                        .entry(step.clone())
                        .or_default()
                        .insert(dep.clone());
                }
            }
        }

        DependencyGraph {
            dependencies,
            dependents,
            unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn builder_creates_empty_graph() {
        let graph = DependencyGraph::builder().build();
        assert!(graph.is_empty());
    }

    #[test]
    fn builder_tracks_dependents() {
        let graph = DependencyGraph::builder()
            .add_step("step1", none())
            .add_step("step2", ["step1"])
            .add_step("step3", ["step1"])
            .build();

        let dependents = graph.dependents_of("step1").unwrap();
        assert!(dependents.contains("step2"));
        assert!(dependents.contains("step3"));
        assert!(graph.dependencies_of("step2").unwrap().contains("step1"));
    }

    #[test]
    fn builder_keeps_unknown_dependency_aside() {
        let graph = DependencyGraph::builder()
            .add_step("step1", ["nonexistent"])
            .build();

        assert!(graph.dependencies_of("step1").unwrap().is_empty());
        assert!(graph.unresolved_of("step1").unwrap().contains("nonexistent"));
        assert_eq!(graph.topological_order().unwrap(), vec!["step1"]);
    }

    #[test]
    fn duplicate_dependencies_collapse() {
        let graph = DependencyGraph::builder()
            .add_step("a", none())
            .add_step("b", ["a", "a"])
            .build();

        assert_eq!(graph.dependencies_of("b").unwrap().len(), 1);
        assert_eq!(graph.topological_order().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn topo_sort_empty_graph() {
        let graph = DependencyGraph::builder().build();
        assert!(graph.topological_order().unwrap().is_empty());
    }

    #[test]
    fn topo_sort_linear_chain() {
        let graph = DependencyGraph::builder()
            .add_step("step1", none())
            .add_step("step2", ["step1"])
            .add_step("step3", ["step2"])
            .build();

        assert_eq!(
            graph.topological_order().unwrap(),
            vec!["step1", "step2", "step3"]
        );
    }

    #[test]
    fn topo_sort_breaks_ties_lexicographically() {
        let graph = DependencyGraph::builder()
            .add_step("b", none())
            .add_step("a", none())
            .add_step("c", none())
            .build();

        assert_eq!(graph.topological_order().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn topo_sort_prefers_smallest_ready_name() {
        // "z" becomes ready before "m" is popped; "m" must still come first.
        let graph = DependencyGraph::builder()
            .add_step("a", none())
            .add_step("z", ["a"])
            .add_step("m", none())
            .build();

        assert_eq!(graph.topological_order().unwrap(), vec!["a", "m", "z"]);
    }

    #[test]
    fn topo_sort_diamond_dependency() {
        let graph = DependencyGraph::builder()
            .add_step("d", ["b", "c"])
            .add_step("c", ["a"])
            .add_step("b", ["a"])
            .add_step("a", none())
            .build();

        assert_eq!(graph.topological_order().unwrap(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn topo_sort_detects_simple_cycle() {
        let graph = DependencyGraph::builder()
            .add_step("a", ["b"])
            .add_step("b", ["a"])
            .build();

        assert!(matches!(
            graph.topological_order(),
            Err(FlowError::CyclicDependency)
        ));
    }

    #[test]
    fn topo_sort_detects_self_loop() {
        let graph = DependencyGraph::builder()
            .add_step("a", ["a"])
            .add_step("b", none())
            .build();

        assert!(graph.topological_order().is_err());
    }

    #[test]
    fn no_cycle_returns_none() {
        let graph = DependencyGraph::builder()
            .add_step("a", none())
            .add_step("b", ["a"])
            .build();

        assert!(graph.find_cycle().is_none());
    }

    #[test]
    fn simple_cycle_returns_path() {
        let graph = DependencyGraph::builder()
            .add_step("a", ["b"])
            .add_step("b", ["a"])
            .build();

        let path = graph.find_cycle().unwrap();
        assert!(path.len() >= 2);
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn longer_cycle_returns_full_path() {
        let graph = DependencyGraph::builder()
            .add_step("a", ["c"])
            .add_step("b", ["a"])
            .add_step("c", ["b"])
            .build();

        let path = graph.find_cycle().unwrap();
        assert!(path.contains(&"a".to_string()));
        assert!(path.contains(&"b".to_string()));
        assert!(path.contains(&"c".to_string()));
    }

    #[test]
    fn self_cycle_detected() {
        let graph = DependencyGraph::builder().add_step("a", ["a"]).build();
        assert_eq!(graph.find_cycle().unwrap(), vec!["a", "a"]);
    }
}
