//! gigen command line
//!
//! Generates target-language bindings for one introspection namespace, or
//! lists the entries of a namespace.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gigen_cli::{load_config, Overrides, Result};
use pipeline::{Generator, GeneratorOptions, OutputFormat, PipelineError};

/// Command-line interface configuration for gigen.
#[derive(Parser, Debug)]
#[command(name = "gigen", about = "Binding generator for introspection metadata", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// Configuration file; defaults to the user config when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level or filter directive (overrides the configuration)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

/// Inputs shared by every command.
#[derive(Args, Debug)]
struct Inputs {
    /// Namespace to process
    namespace: Option<String>,
    /// Typelib JSON document; repeat for dependencies
    #[arg(long = "typelib", value_name = "FILE")]
    typelibs: Vec<PathBuf>,
}

/// Renderer selection.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Go,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Go => OutputFormat::Go,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Available gigen commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the bindings of a namespace
    Generate {
        #[command(flatten)]
        inputs: Inputs,
        /// Snippet template directory
        #[arg(long, value_name = "DIR")]
        templates: Option<PathBuf>,
        /// Output directory
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Directory of per-namespace blacklist files
        #[arg(long, value_name = "DIR")]
        blacklist: Option<PathBuf>,
        /// Directory of per-namespace header files
        #[arg(long, value_name = "DIR")]
        header_dir: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "go")]
        format: Format,
        /// Render everything but write nothing
        #[arg(long)]
        dry_run: bool,
        /// Bound on ancestor walks
        #[arg(long)]
        max_ancestor_depth: Option<usize>,
    },
    /// Print the index, kind and name of every entry
    List {
        #[command(flatten)]
        inputs: Inputs,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_ref())?;
    match cli.cmd {
        Commands::Generate {
            inputs,
            templates,
            output,
            blacklist,
            header_dir,
            format,
            dry_run,
            max_ancestor_depth,
        } => {
            Overrides {
                namespace: inputs.namespace,
                typelibs: inputs.typelibs,
                templates_dir: templates,
                blacklist_dir: blacklist,
                header_dir,
                output_dir: output,
                log_level: cli.log_level,
                max_ancestor_depth,
            }
            .apply(&mut config);
            gigen_logging::init(&config.logging.level)?;

            let namespace = config.generator.namespace.clone().ok_or(PipelineError::MissingNamespace)?;
            let repo = pipeline::load_repository(config.generator.typelibs.as_slice())?;
            let options = GeneratorOptions {
                format: format.into(),
                dry_run,
                ..GeneratorOptions::from_config(&config)
            };
            let report = Generator::new(&repo, options).run(&namespace)?;

            println!(
                "{}: {} enums, {} objects, {} implements, {} functions",
                report.namespace, report.enums, report.objects, report.implements, report.functions
            );
            for skipped in &report.skipped_methods {
                println!("  skipped {}.{}: {}", skipped.class_name, skipped.method, skipped.reason);
            }
            for failure in &report.render_failures {
                println!("  failed {} for {}: {}", failure.slot, failure.entity, failure.error);
            }
            for diagnostic in &report.diagnostics {
                println!("  warning: {}", diagnostic);
            }
            match &report.output_path {
                Some(path) => println!("Bindings written to {}", path.display()),
                None => println!("Dry run, nothing written"),
            }
            Ok(())
        }
        Commands::List { inputs } => {
            Overrides {
                namespace: inputs.namespace,
                typelibs: inputs.typelibs,
                log_level: cli.log_level,
                ..Default::default()
            }
            .apply(&mut config);
            gigen_logging::init(&config.logging.level)?;

            let namespace = config.generator.namespace.clone().ok_or(PipelineError::MissingNamespace)?;
            let repo = pipeline::load_repository(config.generator.typelibs.as_slice())?;
            for entry in pipeline::list_entries(&repo, &namespace)? {
                println!("{}\t{}\t{}", entry.index, entry.kind, entry.name);
            }
            Ok(())
        }
    }
}
