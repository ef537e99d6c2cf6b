//! typegen - generate TypeScript declarations or JSON Schema from sample data

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use schema_typegen::cli::CliError;
use schema_typegen::cli::commands::{self, CustomField, GenerateArgs, OutputFormat, Source};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    /// JSON samples from a file or inline string
    Json,
    /// Declared column descriptors from a file
    Columns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    /// TypeScript interface declaration
    Typescript,
    /// JSON Schema validation document
    Jsonschema,
}

#[derive(Parser, Debug)]
#[command(
    name = "typegen",
    version,
    about = "Infer a schema from sample data and render it as TypeScript or JSON Schema"
)]
struct Cli {
    /// Data source type
    #[arg(short, long, value_enum)]
    source: SourceArg,

    /// Input file path (JSON samples, or column descriptors as JSON/YAML)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Direct JSON input string (for source=json)
    #[arg(short = 'j', long)]
    json_input: Option<String>,

    /// Table name for the columns source (used in messages)
    #[arg(long)]
    table: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputArg::Typescript)]
    output: OutputArg,

    /// Name for the generated interface / schema title
    #[arg(short, long, default_value = "Generated")]
    interface_name: String,

    /// Infer optional properties (fields absent from some samples get '?')
    #[arg(long, conflicts_with = "no_infer_optional")]
    infer_optional: bool,

    /// Do not infer optional properties
    #[arg(long)]
    no_infer_optional: bool,

    /// Maximum samples to analyze (0 = all)
    #[arg(long, default_value_t = 0)]
    sample_size: usize,

    /// Additional fields as JSON (e.g. '[{"name":"note","type":"string"}]')
    #[arg(long)]
    custom_fields: Option<String>,

    /// Prettify output
    #[arg(short, long)]
    prettify: bool,

    /// Output file path (stdout if not specified)
    #[arg(long)]
    out_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn into_args(self) -> Result<GenerateArgs, CliError> {
        let source = match self.source {
            SourceArg::Json => Source::Json,
            SourceArg::Columns => Source::Columns,
        };

        // Declared columns carry NOT NULL information, so optionality
        // inference defaults off for them and on for sampled sources
        let infer_optional = if self.infer_optional {
            true
        } else if self.no_infer_optional {
            false
        } else {
            source == Source::Json
        };

        let custom_fields: Vec<CustomField> = match self.custom_fields {
            Some(ref json) => serde_json::from_str(json)
                .map_err(|e| CliError::Input(format!("invalid --custom-fields value: {e}")))?,
            None => Vec::new(),
        };

        Ok(GenerateArgs {
            source,
            file: self.file,
            json_input: self.json_input,
            table: self.table,
            output: match self.output {
                OutputArg::Typescript => OutputFormat::Typescript,
                OutputArg::Jsonschema => OutputFormat::JsonSchema,
            },
            interface_name: self.interface_name,
            infer_optional,
            sample_size: self.sample_size,
            custom_fields,
            prettify: self.prettify,
            out_file: self.out_file,
        })
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let args = cli.into_args()?;
    commands::handle_generate(&args)
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
