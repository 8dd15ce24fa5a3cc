//! ocrdocx CLI - OCR markdown to Word conversion tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use ocrdocx::render::ExtractionStats;
use ocrdocx::{
    detect_input_from_path, ocr, ConversionService, ConvertOptions, Document, DocumentAssembler,
    InputKind, JsonFormat, LocalDirStore, MarkdownFiles, PageSelection, PageSource, ParseOptions,
    RenderOptions,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "ocrdocx")]
#[command(version)]
#[command(about = "Turn OCR page markdown into DOCX, Markdown, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that reads input.
#[derive(clap::Args)]
struct InputArgs {
    /// OCR JSON response, or one markdown file per page
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Assemble pages on a single thread
    #[arg(long)]
    sequential: bool,

    /// Keep paragraphs and tables in page order instead of paragraphs first
    #[arg(long)]
    source_order: bool,
}

impl InputArgs {
    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if self.sequential {
            options = options.sequential();
        }
        if self.source_order {
            options = options.source_order();
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert OCR output to a Word document
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to <stem>.docx next to the first input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Body font size in points
        #[arg(long, value_name = "PT", default_value_t = ocrdocx::render::DEFAULT_FONT_SIZE_PT)]
        font_size: f32,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Convert OCR output to Markdown
    #[command(alias = "md")]
    Markdown {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Convert OCR output to plain text
    Text {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Convert OCR output to JSON
    Json {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        #[command(flatten)]
        input: InputArgs,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            font_size,
            pages,
        }) => cmd_convert(&input, output.as_deref(), font_size, pages.as_deref()),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            pages,
        }) => cmd_markdown(&input, output.as_deref(), frontmatter, pages.as_deref()),
        Some(Commands::Text {
            input,
            output,
            pages,
        }) => cmd_text(&input, output.as_deref(), pages.as_deref()),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: ocrdocx convert <INPUT>... [-o FILE]".yellow());
            println!("       ocrdocx --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Pick the page source for the given inputs.
///
/// A single JSON file is an OCR response; anything else is markdown,
/// one page per file in argument order.
fn page_source(inputs: &[PathBuf]) -> CliResult<Box<dyn PageSource>> {
    log::debug!("reading {} input file(s)", inputs.len());
    if let [single] = inputs {
        if detect_input_from_path(single)? == InputKind::OcrJson {
            return Ok(Box::new(ocr::read_response(single)?));
        }
        return Ok(Box::new(MarkdownFiles::new(inputs)));
    }

    for path in inputs {
        if detect_input_from_path(path)? == InputKind::OcrJson {
            return Err(format!(
                "{} is an OCR response; pass it on its own",
                path.display()
            )
            .into());
        }
    }
    Ok(Box::new(MarkdownFiles::new(inputs)))
}

fn load(input: &InputArgs) -> CliResult<Document> {
    let source = page_source(&input.inputs)?;
    let pages = source.pages()?;
    let mut doc = DocumentAssembler::with_options(input.parse_options()).assemble(pages.as_slice());
    doc.metadata.source = Some(source.describe());
    Ok(doc)
}

fn page_selection(pages: Option<&str>) -> CliResult<PageSelection> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
        None => Ok(PageSelection::All),
    }
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}.docx", stem))
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &InputArgs,
    output: Option<&Path>,
    font_size: f32,
    pages: Option<&str>,
) -> CliResult<()> {
    let target = match output {
        Some(path) => path.to_path_buf(),
        None => default_output(&input.inputs[0]),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| format!("Invalid output path: {}", target.display()))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading input...");
    let source = page_source(&input.inputs)?;

    let options = ConvertOptions::new()
        .with_parse_options(input.parse_options())
        .with_render_options(
            RenderOptions::new()
                .with_font_size(font_size)
                .with_pages(page_selection(pages)?),
        )
        .with_stats(true);

    pb.set_message("Building document...");
    let service = ConversionService::with_store(Arc::new(LocalDirStore::new(dir)));
    let result = service.convert(source.as_ref(), &stem, &options)?;

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Saved to".green().bold(), result.locator);
    if let Some(ref title) = result.metadata.title {
        println!("  {} title: {}", "├─".dimmed(), title);
    }
    if let Some(ref stats) = result.stats {
        println!(
            "  {} {} page(s), {} paragraph(s), {} table(s)",
            "├─".dimmed(),
            stats.page_count,
            stats.paragraph_count,
            stats.table_count
        );
    }
    println!("  {} {} bytes", "└─".dimmed(), result.size);

    Ok(())
}

fn cmd_markdown(
    input: &InputArgs,
    output: Option<&Path>,
    frontmatter: bool,
    pages: Option<&str>,
) -> CliResult<()> {
    let doc = load(input)?;
    let selection = page_selection(pages)?;
    selection.validate(doc.page_count())?;

    let render_options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_pages(selection);
    let markdown = ocrdocx::render::to_markdown(&doc, &render_options)?;

    write_or_print(output, &markdown)
}

fn cmd_text(input: &InputArgs, output: Option<&Path>, pages: Option<&str>) -> CliResult<()> {
    let doc = load(input)?;
    let selection = page_selection(pages)?;
    selection.validate(doc.page_count())?;

    let render_options = RenderOptions::new().with_pages(selection);
    let text = ocrdocx::render::to_text(&doc, &render_options)?;

    write_or_print(output, &text)
}

fn cmd_json(input: &InputArgs, output: Option<&Path>, compact: bool) -> CliResult<()> {
    let doc = load(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = ocrdocx::render::to_json(&doc, format)?;

    write_or_print(output, &json)
}

fn cmd_info(input: &InputArgs, as_json: bool) -> CliResult<()> {
    let doc = load(input)?;
    let stats = ExtractionStats::from_document(&doc, &PageSelection::All);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if let Some(ref source) = doc.metadata.source {
        println!("{}: {}", "Source".bold(), source);
    }
    println!("{}: {}", "Pages".bold(), doc.metadata.page_count);
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for page in &doc.pages {
        println!(
            "{:>4}  {}  {} paragraph(s), {} table(s)",
            page.number,
            if page.title.is_some() {
                "heading".green()
            } else {
                "-      ".dimmed()
            },
            page.paragraphs().count(),
            page.tables().count()
        );
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Table rows".bold(), stats.table_row_count);
    println!("{}: {}", "Padded cells".bold(), stats.padded_cell_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ocrdocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR markdown to Word conversion tool");
    println!();
    println!("License: MIT");
}
