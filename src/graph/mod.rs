pub mod edge;
pub mod node;
pub mod shortener;

use petgraph::Directed;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;

use edge::EdgeKind;
use node::ModuleInfo;

/// The bundler's module graph as seen by the diagnostics layer.
///
/// Nodes are modules, edges are imports plus the distinguished issuer relation.
/// The diagnostics core only ever reads it.
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    /// The underlying directed graph, parameterised over module info and edge kinds.
    pub graph: StableGraph<ModuleInfo, EdgeKind, Directed>,
}

impl ModuleGraph {
    /// Create an empty module graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
        }
    }

    /// Add a module node. Every call creates a distinct module, even when `info`
    /// matches an existing one.
    pub fn add_module(&mut self, info: ModuleInfo) -> NodeIndex {
        self.graph.add_node(info)
    }

    /// Record that `origin` imports `module` via `specifier`.
    ///
    /// The first importer of a module becomes its issuer, mirroring how a
    /// bundler attributes a module to whoever pulled it in first.
    pub fn add_import(&mut self, origin: NodeIndex, module: NodeIndex, specifier: &str) {
        self.graph.add_edge(
            origin,
            module,
            EdgeKind::Imports {
                specifier: specifier.to_owned(),
            },
        );
        if self.issuer(module).is_none() {
            self.graph.add_edge(origin, module, EdgeKind::Issuer);
        }
    }

    /// Replace the issuer of `module` with `origin`.
    pub fn set_issuer(&mut self, module: NodeIndex, origin: NodeIndex) {
        let existing: Vec<_> = self
            .graph
            .edges_directed(module, Direction::Incoming)
            .filter(|e| matches!(e.weight(), EdgeKind::Issuer))
            .map(|e| e.id())
            .collect();
        for edge in existing {
            self.graph.remove_edge(edge);
        }
        self.graph.add_edge(origin, module, EdgeKind::Issuer);
    }

    /// The module that caused `module` to be included, if any.
    pub fn issuer(&self, module: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(module, Direction::Incoming)
            .find(|e| matches!(e.weight(), EdgeKind::Issuer))
            .map(|e| e.source())
    }

    /// The specifier `origin` used to import `module`, if it imports it at all.
    pub fn import_specifier(&self, origin: NodeIndex, module: NodeIndex) -> Option<&str> {
        self.graph
            .edges_connecting(origin, module)
            .find_map(|e| match e.weight() {
                EdgeKind::Imports { specifier } => Some(specifier.as_str()),
                EdgeKind::Issuer => None,
            })
    }

    /// Module metadata for `idx`. Returns `None` for indices not in this graph.
    pub fn module(&self, idx: NodeIndex) -> Option<&ModuleInfo> {
        self.graph.node_weight(idx)
    }

    /// Number of module nodes in the graph.
    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl Default for ModuleGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(identifier: &str) -> ModuleInfo {
        ModuleInfo {
            identifier: identifier.into(),
            ..ModuleInfo::default()
        }
    }

    #[test]
    fn test_identical_modules_are_distinct_nodes() {
        let mut graph = ModuleGraph::new();
        let a1 = graph.add_module(module("/proj/a.js"));
        let a2 = graph.add_module(module("/proj/a.js"));
        assert_ne!(a1, a2, "module identity is the node, not the path");
        assert_eq!(graph.module_count(), 2);
    }

    #[test]
    fn test_first_importer_becomes_issuer() {
        let mut graph = ModuleGraph::new();
        let a = graph.add_module(module("/proj/a.js"));
        let b = graph.add_module(module("/proj/b.js"));
        let c = graph.add_module(module("/proj/c.js"));

        graph.add_import(a, c, "./c");
        graph.add_import(b, c, "./c");

        assert_eq!(graph.issuer(c), Some(a), "first importer should be the issuer");
        assert_eq!(graph.issuer(a), None, "entry module has no issuer");
        assert_eq!(graph.import_specifier(b, c), Some("./c"));
        assert_eq!(graph.import_specifier(c, b), None);
    }

    #[test]
    fn test_set_issuer_replaces_existing() {
        let mut graph = ModuleGraph::new();
        let a = graph.add_module(module("/proj/a.js"));
        let b = graph.add_module(module("/proj/b.js"));
        let c = graph.add_module(module("/proj/c.js"));

        graph.add_import(a, c, "./c");
        graph.set_issuer(c, b);

        assert_eq!(graph.issuer(c), Some(b));
        let issuer_edges = graph
            .graph
            .edges_directed(c, Direction::Incoming)
            .filter(|e| matches!(e.weight(), EdgeKind::Issuer))
            .count();
        assert_eq!(issuer_edges, 1, "a module keeps at most one issuer edge");
    }

    #[test]
    fn test_module_lookup() {
        let mut graph = ModuleGraph::new();
        let a = graph.add_module(ModuleInfo {
            identifier: "/proj/a.js".into(),
            original_source: Some("export {}".into()),
            ..ModuleInfo::default()
        });
        let info = graph.module(a).expect("module should exist");
        assert_eq!(info.original_source(), "export {}");
        assert_eq!(module("/x").original_source(), "", "absent source reads as empty");
    }
}
