//! Layer boundary lint for the contract service backend.
//!
//! `backend/src` is split into three layers: `domain` (records, rules and
//! ports), `inbound` (HTTP adapters) and `outbound` (PostgreSQL adapters).
//! This crate parses every source file in those layers and reports paths
//! that cross a boundary:
//!
//! - `domain` may not reach `inbound`, `outbound`, or any web, ORM or
//!   OpenAPI crate
//! - `inbound` may not reach `outbound` or any ORM crate
//! - `outbound` may not reach `inbound` or any web crate
//!
//! Run it with `cargo run -p architecture-lint` from anywhere in the
//! workspace.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Name the backend library is imported under by its own binaries and tests.
const CRATE_ALIAS: &str = "contract_service";

const WEB_CRATES: &[&str] = &["actix", "actix_http", "actix_rt", "actix_service", "actix_web", "awc"];

const ORM_CRATES: &[&str] = &[
    "bb8",
    "diesel",
    "diesel_async",
    "diesel_migrations",
    "pg_embedded_setup_unpriv",
    "postgres",
    "tokio_postgres",
];

const OPENAPI_CRATES: &[&str] = &["utoipa", "utoipa_swagger_ui"];

/// A path in one file that crosses a layer boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Which rule the path broke.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    /// Reading the source tree failed.
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    /// A file could not be attributed to a layer or parsed as Rust.
    #[error("failed to lint {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },
    /// At least one boundary was crossed.
    #[error("layer boundary violations:\n{}", render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}\n"))
        .collect()
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint the layer directories under `backend_dir/src`.
///
/// Missing layer directories are skipped.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.dir_name());
        if dir.is_dir() {
            collect_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources; every violation across all files is reported.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = BTreeSet::new();

    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is outside the domain, inbound and outbound layers".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;

        let mut collector = PathCollector::default();
        collector.visit_file(&parsed);
        for path in &collector.paths {
            if let Some(message) = layer.check(path) {
                violations.insert(Violation {
                    file: source.file.clone(),
                    message,
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(
            violations.into_iter().collect(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    const fn dir_name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        Self::ALL.into_iter().find(|layer| layer.dir_name() == first)
    }

    fn forbidden_layers(self) -> &'static [Self] {
        match self {
            Self::Domain => &[Self::Inbound, Self::Outbound],
            Self::Inbound => &[Self::Outbound],
            Self::Outbound => &[Self::Inbound],
        }
    }

    fn forbids_crate(self, name: &str) -> bool {
        let groups: &[&[&str]] = match self {
            Self::Domain => &[WEB_CRATES, ORM_CRATES, OPENAPI_CRATES],
            Self::Inbound => &[ORM_CRATES],
            Self::Outbound => &[WEB_CRATES],
        };
        groups.iter().any(|group| group.contains(&name))
    }

    /// Describe the rule `path` breaks, if any.
    fn check(self, path: &[String]) -> Option<String> {
        match classify(path)? {
            Target::Layer(target) if self.forbidden_layers().contains(&target) => Some(format!(
                "{} module must not depend on crate::{}",
                self.dir_name(),
                target.dir_name()
            )),
            Target::External(name) if self.forbids_crate(name) => Some(format!(
                "{} module must not depend on external crate `{name}`",
                self.dir_name()
            )),
            Target::Layer(_) | Target::External(_) => None,
        }
    }
}

/// What the first meaningful segment of a path refers to.
enum Target<'a> {
    Layer(Layer),
    External(&'a str),
}

fn classify(path: &[String]) -> Option<Target<'_>> {
    let first = path.first()?.as_str();
    let internal = match first {
        "crate" | "self" | "super" => path
            .iter()
            .map(String::as_str)
            .find(|segment| !matches!(*segment, "crate" | "self" | "super")),
        CRATE_ALIAS => path.get(1).map(String::as_str),
        _ => {
            return Some(
                Layer::ALL
                    .into_iter()
                    .find(|layer| layer.dir_name() == first)
                    .map_or(Target::External(first), Target::Layer),
            );
        }
    }?;
    Layer::ALL
        .into_iter()
        .find(|layer| layer.dir_name() == internal)
        .map(Target::Layer)
}

/// Every path and `use` tree leaf in a file, as segment lists.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let file = path
                .strip_prefix(src_root)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}
