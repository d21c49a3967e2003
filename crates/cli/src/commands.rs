use crate::config::AppConfig;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use rentlaw::{DocumentLoader, Segment, SegmentationPipeline, SegmentationReport};
use rentlaw_pdf::PdfLoader;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// A pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

#[derive(Parser, Debug)]
pub struct SegmentArgs {
    /// The statutory PDF to segment (defaults to `law_pdf` from the configuration)
    pub path: Option<PathBuf>,
    /// Output format for the paragraph units
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    /// Write the units to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Skip page annotation
    #[arg(long)]
    pub no_pages: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// The PDFs to inspect (defaults to `law_pdf` from the configuration)
    pub paths: Vec<PathBuf>,
    /// Fail unless every document is well formed
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct TextArgs {
    /// The PDF to extract text from
    #[arg(required = true)]
    pub path: PathBuf,
    /// Print every page separately
    #[arg(long)]
    pub by_page: bool,
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    source: &'a Path,
    well_formed: bool,
    report: &'a SegmentationReport,
}

fn build_pipeline(config: &AppConfig) -> Result<SegmentationPipeline> {
    Ok(SegmentationPipeline::new(config.heading_patterns()?))
}

fn configured_law_pdf(config: &AppConfig) -> Result<PathBuf> {
    config
        .law_pdf
        .as_ref()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("No PDF given and `law_pdf` is not configured."))
}

/// Runs blocking PDF work off the async runtime.
async fn blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| anyhow!("Tokio join error during PDF processing: {e}"))?
}

pub async fn handle_segment(args: &SegmentArgs, config: &AppConfig) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let path = match &args.path {
        Some(path) => path.clone(),
        None => configured_law_pdf(config)?,
    };
    info!("Segmenting '{}'", path.display());

    let no_pages = args.no_pages;
    let task_path = path.clone();
    let law = blocking(move || {
        let loader = PdfLoader::new();
        if no_pages {
            let document = loader.load_single(&task_path)?;
            Ok(pipeline.run_without_pages(&document))
        } else {
            Ok(pipeline.index_document(&loader, &task_path)?)
        }
    })
    .await
    .with_context(|| format!("Failed to segment '{}'", path.display()))?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(output) => Box::new(BufWriter::new(File::create(output)?)),
        None => Box::new(io::stdout().lock()),
    };
    write_units(&mut writer, &law.paragraphs, args.format)?;
    writer.flush()?;

    info!(
        "Wrote {} paragraph units from {} chapters.",
        law.paragraphs.len(),
        law.chapters.len()
    );
    Ok(())
}

fn write_units(writer: &mut dyn Write, units: &[Segment], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, units)?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for unit in units {
                serde_json::to_writer(&mut *writer, unit)?;
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

pub async fn handle_inspect(args: &InspectArgs, config: &AppConfig) -> Result<()> {
    let pipeline = Arc::new(build_pipeline(config)?);
    let paths = if args.paths.is_empty() {
        vec![configured_law_pdf(config)?]
    } else {
        args.paths.clone()
    };

    // Documents share no state, so they are segmented concurrently.
    let tasks = paths.iter().cloned().map(|path| {
        let pipeline = Arc::clone(&pipeline);
        blocking(move || {
            let law = pipeline
                .index_document(&PdfLoader::new(), &path)
                .with_context(|| format!("Failed to inspect '{}'", path.display()))?;
            Ok(SegmentationReport::new(&law)?)
        })
    });
    let reports = futures::future::try_join_all(tasks).await?;

    let mut stdout = io::stdout().lock();
    let mut malformed = Vec::new();
    for (path, report) in paths.iter().zip(&reports) {
        let well_formed = report.is_well_formed();
        if !well_formed {
            malformed.push(path.display().to_string());
        }
        let output = InspectOutput {
            source: path,
            well_formed,
            report,
        };
        serde_json::to_writer_pretty(&mut stdout, &output)?;
        writeln!(stdout)?;
    }

    if args.strict && !malformed.is_empty() {
        bail!("Not well formed: {}", malformed.join(", "));
    }
    Ok(())
}

pub async fn handle_text(args: &TextArgs) -> Result<()> {
    let path = args.path.clone();
    let pages = blocking(move || Ok(PdfLoader::new().load_pages(&path)?))
        .await
        .with_context(|| format!("Failed to read '{}'", args.path.display()))?;

    let mut stdout = io::stdout().lock();
    if args.by_page {
        for page in &pages {
            let number = page.page_index.map_or(0, |i| i + 1);
            writeln!(stdout, "--- page {number} ---")?;
            writeln!(stdout, "{}", page.content)?;
        }
    } else {
        let texts: Vec<_> = pages.iter().map(|p| p.content.as_str()).collect();
        writeln!(stdout, "{}", texts.join(rentlaw::PAGE_DELIMITER))?;
    }
    Ok(())
}
