//! The namespace walk.
//!
//! [`Generator::run`] mirrors a single generation pass: require the
//! namespace, walk its entries in index order, dispatch enums and objects to
//! the builders, then write the rendered text next to its siblings.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use codegen::{
    process_enum, process_object, EntryOutcome, GenerationContext, RenderFailure, Renderer,
    SkippedMethod,
};
use config::{Config, DEFAULT_MAX_ANCESTOR_DEPTH};
use metadata::{InfoKind, Repository, TypelibRepository};
use templates::{JsonRenderer, TemplateRenderer, TemplateSet};
use tracing::{debug, info, warn};

use crate::blacklist::Blacklist;
use crate::output::{default_header, read_header, write_output};
use crate::{PipelineError, Result};

/// What the renderer produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Go source through the snippet templates.
    #[default]
    Go,
    /// One JSON object per render request.
    Json,
}

impl OutputFormat {
    /// File extension of the bindings file.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Go => "go",
            OutputFormat::Json => "jsonl",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Go => f.write_str("go"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" => Ok(OutputFormat::Go),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected go or json)")),
        }
    }
}

/// Inputs and placement of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Snippet directory; the built-in snippets when `None`.
    pub templates_dir: Option<PathBuf>,
    /// Directory of per-namespace blacklist files.
    pub blacklist_dir: Option<PathBuf>,
    /// Directory of per-namespace headers; a generated preamble when `None`.
    pub header_dir: Option<PathBuf>,
    /// Where the bindings file goes.
    pub output_dir: PathBuf,
    /// Renderer to use.
    pub format: OutputFormat,
    /// Render everything but write nothing.
    pub dry_run: bool,
    /// Bound on ancestor walks.
    pub max_ancestor_depth: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            templates_dir: None,
            blacklist_dir: None,
            header_dir: None,
            output_dir: PathBuf::from("generated"),
            format: OutputFormat::Go,
            dry_run: false,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

impl GeneratorOptions {
    /// Options taken from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            templates_dir: config.generator.templates_dir.clone(),
            blacklist_dir: config.generator.blacklist_dir.clone(),
            header_dir: config.generator.header_dir.clone(),
            output_dir: config.output.output_dir.clone(),
            max_ancestor_depth: config.generator.max_ancestor_depth,
            ..Self::default()
        }
    }
}

/// Summary of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Namespace generated.
    pub namespace: String,
    /// Enum and flags definitions built.
    pub enums: usize,
    /// Object definitions built.
    pub objects: usize,
    /// Implements relationships built.
    pub implements: usize,
    /// Function definitions built.
    pub functions: usize,
    /// Methods left out because their types could not be mapped.
    pub skipped_methods: Vec<SkippedMethod>,
    /// Render requests the renderer rejected.
    pub render_failures: Vec<RenderFailure>,
    /// Problems found in the metadata.
    pub diagnostics: Vec<String>,
    /// Entries left out by the blacklist, in index order.
    pub blacklisted: Vec<String>,
    /// Entries of kinds the generator does not bind, counted per kind.
    pub skipped_kinds: BTreeMap<&'static str, usize>,
    /// Written file; `None` on a dry run.
    pub output_path: Option<PathBuf>,
}

impl GenerationReport {
    /// Whether nothing was skipped or rejected.
    pub fn is_clean(&self) -> bool {
        self.skipped_methods.is_empty() && self.render_failures.is_empty() && self.diagnostics.is_empty()
    }

    fn absorb(&mut self, outcome: EntryOutcome) {
        self.enums += outcome.enums;
        self.objects += outcome.objects;
        self.implements += outcome.implements;
        self.functions += outcome.functions;
        self.skipped_methods.extend(outcome.skipped_methods);
        self.render_failures.extend(outcome.render_failures);
        self.diagnostics.extend(outcome.diagnostics);
    }
}

/// One line of a namespace listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    /// Position in the namespace.
    pub index: usize,
    /// Node kind.
    pub kind: InfoKind,
    /// Entry name.
    pub name: String,
}

/// Load every typelib document in `paths` into one repository.
pub fn load_repository<P: AsRef<Path>>(paths: &[P]) -> Result<TypelibRepository> {
    Ok(TypelibRepository::from_files(paths)?)
}

/// Index, kind and name of every entry of `namespace`.
pub fn list_entries(repo: &dyn Repository, namespace: &str) -> Result<Vec<EntrySummary>> {
    repo.require(namespace)?;
    Ok((0..repo.count(namespace))
        .filter_map(|index| repo.at(namespace, index).map(|node| (index, node)))
        .map(|(index, node)| EntrySummary { index, kind: node.kind(), name: node.name().to_string() })
        .collect())
}

/// Runs generation passes against one repository.
pub struct Generator<'r> {
    repo: &'r dyn Repository,
    options: GeneratorOptions,
}

impl<'r> Generator<'r> {
    /// Create a generator over `repo`.
    pub fn new(repo: &'r dyn Repository, options: GeneratorOptions) -> Self { Self { repo, options } }

    /// Options in effect.
    pub fn options(&self) -> &GeneratorOptions { &self.options }

    /// Generate the bindings of `namespace`.
    ///
    /// Setup problems (unknown namespace, incomplete snippets, unreadable
    /// header or blacklist, unwritable output) abort the run. Problems with
    /// single entries or methods are collected in the report.
    pub fn run(&self, namespace: &str) -> Result<GenerationReport> {
        info!("Generating {namespace} bindings...");
        self.repo.require(namespace)?;

        let blacklist = match &self.options.blacklist_dir {
            Some(dir) => Blacklist::load(dir, namespace)?,
            None => Blacklist::default(),
        };

        let mut report = GenerationReport { namespace: namespace.to_string(), ..Default::default() };
        let text = match self.options.format {
            OutputFormat::Go => {
                let templates = match &self.options.templates_dir {
                    Some(dir) => TemplateSet::from_dir(dir)?,
                    None => TemplateSet::builtin()?,
                };
                let header = match &self.options.header_dir {
                    Some(dir) => read_header(dir, namespace)?,
                    None => default_header(namespace),
                };
                let mut renderer = TemplateRenderer::new(templates, header);
                self.walk(namespace, &blacklist, &mut renderer, &mut report)?;
                renderer.finish()
            }
            OutputFormat::Json => {
                let mut renderer = JsonRenderer::new();
                self.walk(namespace, &blacklist, &mut renderer, &mut report)?;
                renderer.finish()
            }
        };

        if self.options.dry_run {
            info!(bytes = text.len(), "Dry run, nothing written");
        } else {
            let path = write_output(&self.options.output_dir, namespace, self.options.format, &text)?;
            info!("Bindings written to {}", path.display());
            report.output_path = Some(path);
        }
        info!(
            enums = report.enums,
            objects = report.objects,
            functions = report.functions,
            skipped_methods = report.skipped_methods.len(),
            render_failures = report.render_failures.len(),
            "generation finished"
        );
        Ok(report)
    }

    fn walk<R: Renderer<'r>>(
        &self,
        namespace: &str,
        blacklist: &Blacklist,
        renderer: &mut R,
        report: &mut GenerationReport,
    ) -> Result<()> {
        let mut ctx = GenerationContext::builder()
            .max_ancestor_depth(self.options.max_ancestor_depth)
            .build();

        for index in 0..self.repo.count(namespace) {
            let Some(node) = self.repo.at(namespace, index) else {
                warn!(namespace, index, "entry vanished during the walk");
                continue;
            };
            if blacklist.contains(node.name()) {
                debug!(entity = node.name(), "blacklisted");
                report.blacklisted.push(node.name().to_string());
                continue;
            }
            let outcome = match node.kind() {
                InfoKind::Enum | InfoKind::Flags => process_enum(&mut ctx, self.repo, node, renderer)?,
                InfoKind::Object => process_object(&mut ctx, self.repo, node, renderer)?,
                kind => {
                    *report.skipped_kinds.entry(kind.as_str()).or_default() += 1;
                    continue;
                }
            };
            report.absorb(outcome);
        }
        Ok(())
    }
}
