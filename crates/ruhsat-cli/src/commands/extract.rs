//! Extract command - read a registration record from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use ruhsat_core::models::config::RuhsatConfig;
use ruhsat_core::{read_registration, Catalog, ExtractionResult, MatchPhase, RegistrationParser};

use super::output::{format_result, OutputFormat};
use super::transcriber::Transcriber;

/// Image formats sent to the transcription service.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp"];

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (image, or .txt with already transcribed text)
    #[arg(required = true)]
    input: PathBuf,

    /// Brand/model catalog JSON file
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show how brand and model were resolved
    #[arg(long)]
    show_resolution: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::config::load(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if !is_supported(&args.input) {
        anyhow::bail!("Unsupported file format: {}", extension(&args.input));
    }

    let catalog = load_catalog(args.catalog.as_deref(), &config)?;
    let parser = RegistrationParser::from_config(&config.extraction);

    let transcriber = if is_text_file(&args.input) {
        None
    } else {
        Some(Transcriber::from_config(&config.transcription)?)
    };

    info!("Processing file: {}", args.input.display());

    let result = extract_file(&args.input, &parser, &catalog, transcriber.as_ref()).await?;

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_resolution {
        eprintln!();
        for (label, resolution) in [("Brand", &result.brand), ("Model", &result.model)] {
            match resolution {
                Some(r) => eprintln!(
                    "{} {}: {} ({}) via {}",
                    style("ℹ").blue(),
                    label,
                    r.name,
                    r.id,
                    describe_phase(&r.phase)
                ),
                None => eprintln!("{} {}: not resolved", style("ℹ").blue(), label),
            }
        }
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn describe_phase(phase: &MatchPhase) -> String {
    match phase {
        MatchPhase::Label => "printed label".to_string(),
        MatchPhase::LabelToken => "printed label token".to_string(),
        MatchPhase::Document => "document text".to_string(),
        MatchPhase::Fuzzy { score } => format!("fuzzy match ({:.2})", score),
    }
}

/// Load the catalog from the command line, the config, or fall back to an
/// empty one.
pub fn load_catalog(path: Option<&Path>, config: &RuhsatConfig) -> anyhow::Result<Catalog> {
    match path.or(config.catalog.path.as_deref()) {
        Some(path) => {
            let catalog = Catalog::from_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", path.display(), e))?;
            debug!(
                "Loaded catalog with {} brands and {} models",
                catalog.brands.len(),
                catalog.models.len()
            );
            Ok(catalog)
        }
        None => {
            warn!("No catalog given, brand and model ids will not be resolved");
            Ok(Catalog::default())
        }
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_text_file(path: &Path) -> bool {
    extension(path) == "txt"
}

pub fn is_supported(path: &Path) -> bool {
    let ext = extension(path);
    ext == "txt" || IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Extract one document. Text files are parsed directly; images go through
/// the transcription service.
pub async fn extract_file(
    path: &Path,
    parser: &RegistrationParser,
    catalog: &Catalog,
    transcriber: Option<&Transcriber>,
) -> anyhow::Result<ExtractionResult> {
    let ext = extension(path);

    if ext == "txt" {
        let text = fs::read_to_string(path)?;
        return Ok(parser.parse(&text, catalog));
    }

    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        anyhow::bail!("Unsupported file format: {}", ext);
    }

    let Some(transcriber) = transcriber else {
        anyhow::bail!("No transcription backend available for {}", path.display());
    };

    let image = fs::read(path)?;
    let result = read_registration(transcriber, parser, &image, catalog)
        .await
        .map_err(|e| anyhow::anyhow!("{} (re-photograph the document and try again)", e))?;

    Ok(result)
}
