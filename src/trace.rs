use std::collections::HashSet;
use std::hash::Hash;

use petgraph::stable_graph::NodeIndex;
use regex::Regex;

use crate::graph::ModuleGraph;
use crate::graph::shortener::RequestShortener;

/// Framework loader modules that wrap user code. They add nothing to an import
/// trace and are hidden from it.
const INTERNAL_LOADER_PATTERN: &str =
    r"next-(app|middleware|client-pages|flight-(client|server|client-entry))-loader\.js";

/// One hop of a reconstructed import chain: `origin` pulled in `module`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry<N> {
    pub origin: N,
    pub module: N,
}

/// Walk the issuer relation from `start` outward.
///
/// Returns hops innermost first. The issuer relation is expected to be acyclic
/// but is not trusted to be: a revisited node ends the walk silently, so the
/// result never holds more entries than there are distinct nodes.
pub fn trace_issuers<N, F>(start: N, mut issuer_of: F) -> Vec<TraceEntry<N>>
where
    N: Copy + Eq + Hash,
    F: FnMut(N) -> Option<N>,
{
    let mut visited: HashSet<N> = HashSet::new();
    let mut trace = Vec::new();
    let mut current = start;

    loop {
        if !visited.insert(current) {
            break;
        }
        let Some(origin) = issuer_of(current) else {
            break;
        };
        trace.push(TraceEntry {
            origin,
            module: current,
        });
        current = origin;
    }

    trace
}

/// Import trace of `failing` through the module graph's issuer edges.
pub fn module_trace(graph: &ModuleGraph, failing: NodeIndex) -> Vec<TraceEntry<NodeIndex>> {
    trace_issuers(failing, |m| graph.issuer(m))
}

/// Decides which module identifiers are hidden from rendered import traces.
#[derive(Debug, Clone)]
pub struct LoaderFilter {
    patterns: Vec<Regex>,
}

impl LoaderFilter {
    /// Filter with the built-in framework loader denylist plus `extra` patterns.
    pub fn new(extra: &[String]) -> anyhow::Result<Self> {
        let mut patterns = vec![Regex::new(INTERNAL_LOADER_PATTERN)?];
        for pattern in extra {
            patterns.push(Regex::new(pattern)?);
        }
        Ok(Self { patterns })
    }

    /// Whether `name` should appear in a trace.
    pub fn is_visible(&self, name: &str) -> bool {
        !name.is_empty() && !self.patterns.iter().any(|re| re.is_match(name))
    }

    /// Keep only visible names, preserving order.
    pub fn filter(&self, names: Vec<String>) -> Vec<String> {
        names.into_iter().filter(|n| self.is_visible(n)).collect()
    }
}

/// Render the "Import trace" section for a failing module.
///
/// Lists the readable identifier of each hop's origin. Returns the empty string
/// when no visible entries remain.
pub fn render_import_trace(
    graph: &ModuleGraph,
    failing: NodeIndex,
    shortener: &RequestShortener,
    filter: &LoaderFilter,
) -> String {
    let names: Vec<String> = module_trace(graph, failing)
        .iter()
        .filter_map(|entry| graph.module(entry.origin))
        .map(|origin| shortener.readable_identifier(origin))
        .collect();
    let names = filter.filter(names);

    if names.is_empty() {
        return String::new();
    }
    format!(
        "\nImport trace for requested module:\n{}\n\n",
        names.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use super::*;
    use crate::graph::node::ModuleInfo;

    fn module(identifier: &str) -> ModuleInfo {
        ModuleInfo {
            identifier: identifier.into(),
            ..ModuleInfo::default()
        }
    }

    /// a.js -> b.js -> c.js, c.js failing.
    fn linear_chain() -> (ModuleGraph, NodeIndex, NodeIndex, NodeIndex) {
        let mut graph = ModuleGraph::new();
        let a = graph.add_module(module("/proj/a.js"));
        let b = graph.add_module(module("/proj/b.js"));
        let c = graph.add_module(module("/proj/c.js"));
        graph.add_import(a, b, "./b");
        graph.add_import(b, c, "./c");
        (graph, a, b, c)
    }

    #[test]
    fn test_linear_chain_ordered_innermost_first() {
        let (graph, a, b, c) = linear_chain();
        let trace = module_trace(&graph, c);
        assert_eq!(
            trace,
            vec![
                TraceEntry { origin: b, module: c },
                TraceEntry { origin: a, module: b },
            ]
        );
    }

    #[test]
    fn test_entry_module_has_empty_trace() {
        let (graph, a, _, _) = linear_chain();
        assert!(module_trace(&graph, a).is_empty());
    }

    #[test]
    fn test_cycle_terminates() {
        // 1 -> 2 -> 3 -> 1 through the issuer relation.
        let issuers: HashMap<u32, u32> = [(1, 3), (2, 1), (3, 2)].into_iter().collect();
        let trace = trace_issuers(1, |n| issuers.get(&n).copied());
        assert_eq!(trace.len(), 3, "each distinct node contributes at most one hop");
        assert_eq!(trace[0], TraceEntry { origin: 3, module: 1 });
        assert_eq!(trace[1], TraceEntry { origin: 2, module: 3 });
        assert_eq!(trace[2], TraceEntry { origin: 1, module: 2 });
    }

    #[test]
    fn test_self_issuer_terminates() {
        let trace = trace_issuers(7, |n| Some(n));
        assert_eq!(trace, vec![TraceEntry { origin: 7, module: 7 }]);
    }

    #[test]
    fn test_graph_cycle_terminates() {
        let (mut graph, a, _, c) = linear_chain();
        graph.set_issuer(a, c);
        let trace = module_trace(&graph, c);
        assert!(
            trace.len() <= graph.module_count(),
            "trace must be bounded by the module count"
        );
        assert_eq!(trace.len(), 3);
    }

    #[test]
    fn test_filter_hides_framework_loaders() {
        let filter = LoaderFilter::new(&[]).unwrap();
        assert!(!filter.is_visible(
            "./node_modules/next/dist/build/webpack/loaders/next-app-loader.js?page=x!./app/page.js"
        ));
        assert!(!filter.is_visible("next-flight-client-entry-loader.js?modules=a"));
        assert!(!filter.is_visible(""), "empty identifiers are dropped");
        assert!(filter.is_visible("./pages/index.js"));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = LoaderFilter::new(&["^virtual:".to_owned()]).unwrap();
        let names = vec![
            "./a.js".to_owned(),
            "next-middleware-loader.js?x".to_owned(),
            "virtual:entry".to_owned(),
            String::new(),
            "./b.js".to_owned(),
        ];
        let once = filter.filter(names);
        let twice = filter.filter(once.clone());
        assert_eq!(once, vec!["./a.js".to_owned(), "./b.js".to_owned()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_extra_pattern_is_rejected() {
        assert!(LoaderFilter::new(&["(unclosed".to_owned()]).is_err());
    }

    #[test]
    fn test_render_lists_origins() {
        let (graph, _, _, c) = linear_chain();
        let shortener = RequestShortener::new(Path::new("/proj"));
        let rendered = render_import_trace(&graph, c, &shortener, &LoaderFilter::new(&[]).unwrap());
        assert_eq!(
            rendered,
            "\nImport trace for requested module:\n./b.js\n./a.js\n\n"
        );
    }

    #[test]
    fn test_render_empty_when_everything_filtered() {
        let mut graph = ModuleGraph::new();
        let loader =
            graph.add_module(module("/proj/node_modules/next/next-app-loader.js?page=/"));
        let page = graph.add_module(module("/proj/app/page.js"));
        graph.add_import(loader, page, "./app/page.js");

        let shortener = RequestShortener::new(Path::new("/proj"));
        let filter = LoaderFilter::new(&[]).unwrap();
        let rendered = render_import_trace(&graph, page, &shortener, &filter);
        assert_eq!(rendered, "", "no header when every entry is filtered out");
    }
}
