use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use petgraph::stable_graph::NodeIndex;
use serde::Deserialize;

use crate::diagnostics::raw::{Dependency, DependencyLocation, RawError};
use crate::graph::ModuleGraph;
use crate::graph::node::ModuleInfo;

/// JSON snapshot of a failed build: the module graph plus the raw errors.
#[derive(Debug, Deserialize)]
pub struct BuildReport {
    /// Project root the build ran in.
    pub root: Option<PathBuf>,
    pub modules: Vec<ReportModule>,
    #[serde(default)]
    pub imports: Vec<ReportImport>,
    /// Explicit issuer assignments, applied after `imports`.
    #[serde(default)]
    pub issuers: Vec<ReportIssuer>,
    #[serde(default)]
    pub errors: Vec<ReportError>,
}

#[derive(Debug, Deserialize)]
pub struct ReportModule {
    /// Report-local id used by edges and errors.
    pub id: String,
    pub identifier: String,
    pub raw_request: Option<String>,
    pub resource: Option<PathBuf>,
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportImport {
    pub from: String,
    pub to: String,
    pub specifier: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportIssuer {
    pub module: String,
    pub issuer: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportError {
    pub name: String,
    #[serde(default)]
    pub message: String,
    pub module: Option<String>,
    pub loc: Option<DependencyLocation>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Logical module path to report against, overriding the module's resource.
    pub file: Option<String>,
}

/// A raw error from a report, with its optional module path override.
#[derive(Debug)]
pub struct ReportedError {
    pub raw: RawError,
    pub file: Option<String>,
}

/// A report with its modules loaded into a [`ModuleGraph`].
#[derive(Debug)]
pub struct LoadedReport {
    pub root: Option<PathBuf>,
    pub graph: ModuleGraph,
    pub errors: Vec<ReportedError>,
}

/// Read and load a build report from disk.
pub fn load_report(path: &Path) -> anyhow::Result<LoadedReport> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read build report {}", path.display()))?;
    let report: BuildReport = serde_json::from_str(&contents)
        .with_context(|| format!("invalid build report {}", path.display()))?;
    report.load()
}

impl BuildReport {
    /// Build the module graph and resolve every report-local module id.
    pub fn load(self) -> anyhow::Result<LoadedReport> {
        let mut graph = ModuleGraph::new();
        let mut ids: HashMap<String, NodeIndex> = HashMap::new();

        for module in self.modules {
            if ids.contains_key(&module.id) {
                bail!("duplicate module id '{}' in build report", module.id);
            }
            let idx = graph.add_module(ModuleInfo {
                identifier: module.identifier,
                raw_request: module.raw_request,
                resource: module.resource,
                original_source: module.source,
            });
            ids.insert(module.id, idx);
        }

        let lookup = |id: &str| -> anyhow::Result<NodeIndex> {
            ids.get(id)
                .copied()
                .with_context(|| format!("unknown module id '{id}' in build report"))
        };

        for import in &self.imports {
            graph.add_import(lookup(&import.from)?, lookup(&import.to)?, &import.specifier);
        }
        for issuer in &self.issuers {
            graph.set_issuer(lookup(&issuer.module)?, lookup(&issuer.issuer)?);
        }

        let errors = self
            .errors
            .into_iter()
            .map(|err| -> anyhow::Result<ReportedError> {
                let module = err.module.as_deref().map(lookup).transpose()?;
                Ok(ReportedError {
                    raw: RawError {
                        name: err.name,
                        message: err.message,
                        loc: err.loc,
                        dependencies: err.dependencies,
                        module,
                    },
                    file: err.file,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(LoadedReport {
            root: self.root,
            graph,
            errors,
        })
    }
}
