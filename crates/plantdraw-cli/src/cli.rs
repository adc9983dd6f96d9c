//! Command-line interface for the plantdraw utility
//!
//! Provides a CLI to convert PlantUML files into draw.io documents.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use plantdraw::core::logging::init_logging;
use plantdraw::plugins::Orchestrator;
use plantdraw::{Document, DiagramKind, RenderConfig};

/// Plantdraw - Convert PlantUML diagrams to draw.io
#[derive(Parser)]
#[command(name = "plantdraw")]
#[command(about = "Convert PlantUML sequence, class, use-case and activity diagrams to draw.io")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Serialized form of a converted document
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// draw.io `mxfile` XML
    #[default]
    Xml,
    /// The primitive document as JSON
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "drawio",
            OutputFormat::Json => "json",
        }
    }

    fn serialize(&self, document: &Document) -> Result<String> {
        match self {
            OutputFormat::Xml => Ok(document.to_xml()),
            OutputFormat::Json => document.to_json(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert PlantUML files to draw.io documents
    Convert {
        /// Input files containing PlantUML diagrams
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (only with a single input; use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Xml)]
        format: OutputFormat,

        /// Page name inside the document
        #[arg(long)]
        name: Option<String>,

        /// Column count of the class diagram grid
        #[arg(long)]
        columns: Option<usize>,
    },

    /// Detect the notation of an input file
    Detect {
        /// Input file to analyze (use - for stdin)
        input: PathBuf,
    },

    /// Show supported diagram types
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Outcome of one file conversion
#[derive(Debug)]
pub struct Converted {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: DiagramKind,
}

/// Main CLI application
pub struct PlantdrawApp {
    orchestrator: Orchestrator,
}

impl PlantdrawApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            orchestrator: Orchestrator::new(config),
        }
    }

    fn build_config(name: Option<String>, columns: Option<usize>) -> RenderConfig {
        let mut config = RenderConfig::default();
        if let Some(name) = name {
            config = config.with_name(name);
        }
        if let Some(columns) = columns {
            config = config.with_class_columns(columns);
        }
        config
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Flags win over PLANTDRAW_LOG_LEVEL / PLANTDRAW_LOG_FORMAT
        let level = cli
            .log_level
            .map(|l| l.as_str())
            .or(cli.verbose.then_some("debug"));
        if let Err(e) = init_logging(level, cli.log_format.map(|f| f.as_str())) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("plantdraw v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert {
                inputs,
                output,
                format,
                name,
                columns,
            } => {
                self.orchestrator = Orchestrator::new(Self::build_config(name, columns));
                self.convert_command(&inputs, output, format)
            }
            Commands::Detect { input } => self.detect_command(&input),
            Commands::Types { json } => self.types_command(json),
        }
    }

    /// Handle the convert command
    ///
    /// Every input is attempted; the command fails unless all succeeded.
    fn convert_command(
        &self,
        inputs: &[PathBuf],
        output: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<()> {
        if output.is_some() && inputs.len() > 1 {
            bail!("--output can only be used with a single input file");
        }

        let mut succeeded = 0;
        for input in inputs {
            let target = match &output {
                Some(path) => path.clone(),
                None => default_output_path(input, format),
            };
            match self.convert_file(input, &target, format) {
                Ok(converted) => {
                    succeeded += 1;
                    info!(input = %converted.input.display(), kind = %converted.kind, "Converted");
                    if !is_stdout(&converted.output) {
                        println!("converted: {}", converted.output.display());
                    }
                }
                Err(e) => {
                    warn!(input = %input.display(), error = %e, "Conversion failed");
                    eprintln!("error: {}: {:#}", input.display(), e);
                }
            }
        }

        let summary = format!("{}/{} file(s) converted", succeeded, inputs.len());
        if output.as_deref().is_some_and(is_stdout) {
            eprintln!("{}", summary);
        } else {
            println!("{}", summary);
        }

        if succeeded == inputs.len() {
            Ok(())
        } else {
            Err(anyhow!("{} file(s) failed", inputs.len() - succeeded))
        }
    }

    /// Convert one file and write the result
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        format: OutputFormat,
    ) -> Result<Converted> {
        let content = read_input(input)?;
        debug!(bytes = content.len(), input = %input.display(), "Read input");

        let kind = self.orchestrator.detect_diagram_type(&content)?;
        let document = self.orchestrator.process_kind(kind, &content)?;
        let serialized = format.serialize(&document)?;
        write_output(output, &serialized)?;

        Ok(Converted {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            kind,
        })
    }

    /// Handle the detect command
    fn detect_command(&self, input: &Path) -> Result<()> {
        let content = read_input(input)?;
        match self.orchestrator.classifier().detect_notation(&content) {
            Some(notation) => {
                println!("{}", notation);
                Ok(())
            }
            None => Err(anyhow!("Could not detect diagram type")),
        }
    }

    /// Handle the types command
    fn types_command(&self, json: bool) -> Result<()> {
        let kinds = DiagramKind::supported();

        if json {
            let types: Vec<_> = kinds
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "name": kind.to_string(),
                        "page": kind.page_name(),
                        "status": "supported"
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "supported_types": types,
                "total": kinds.len()
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported diagram types:");
            for kind in kinds {
                println!("  {:<10} - {}", kind.to_string(), kind.page_name());
            }
            println!();
            println!("Total: {} diagram types supported", kinds.len());
        }

        Ok(())
    }

    /// Get a reference to the orchestrator (for testing)
    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

impl Default for PlantdrawApp {
    fn default() -> Self {
        Self::new()
    }
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// `<input stem>.<extension>` in the current directory
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "diagram".to_string());
    PathBuf::from(format!("{}.{}", stem, format.extension()))
}

/// Read input from file or stdin (`-`)
pub fn read_input(input: &Path) -> Result<String> {
    if is_stdout(input) {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file '{}'", input.display()))
}

/// Write output to file or stdout (`-`)
pub fn write_output(output: &Path, content: &str) -> Result<()> {
    if is_stdout(output) {
        print!("{}", content);
        io::stdout().flush()?;
        return Ok(());
    }
    fs::write(output, content)
        .with_context(|| format!("Failed to write output file '{}'", output.display()))
}
