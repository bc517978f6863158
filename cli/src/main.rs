//! unocr CLI - OCR result export and visualization tool

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unocr::render::{read_json_file, recognized_lines, write_json_file, write_summary};
use unocr::source::{self, page_images};
use unocr::visualize::visualize_page;
use unocr::{
    augment_dir, AugmentOptions, Document, DisplayOutcome, JsonFormat, LoadOptions, OcrEngine,
    PageSelection, PageStats, SystemViewer, TesseractEngine, TesseractOptions, VisualizeOptions,
};

#[derive(Parser)]
#[command(name = "unocr")]
#[command(author = "iyulab")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Run OCR on images and PDFs, export JSON and annotated images", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize a document, print a summary, export JSON and save a visualization
    Run(RunArgs),

    /// Print the summary of a previously exported JSON file
    Summary {
        /// Exported JSON file
        #[arg(value_name = "JSON")]
        input: PathBuf,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Write a rotated copy of every JPEG image in a directory
    Augment {
        /// Image directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Seed for reproducible rotation angles
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Input images, or a single PDF
    #[arg(value_name = "FILES")]
    inputs: Vec<PathBuf>,

    /// JSON output file
    #[arg(long, value_name = "FILE", default_value = "ocr_output.json")]
    json: PathBuf,

    /// Visualization output file
    #[arg(long, value_name = "FILE", default_value = "ocr_visualization.png")]
    image: PathBuf,

    /// Page to visualize (1-indexed)
    #[arg(long, default_value = "1")]
    page: u32,

    /// Tesseract language model
    #[arg(long, env = "UNOCR_LANG", default_value = "eng")]
    lang: String,

    /// Tesseract page segmentation mode
    #[arg(long, default_value = "3")]
    psm: u8,

    /// Tesseract executable
    #[arg(long, env = "UNOCR_TESSERACT", default_value = "tesseract")]
    tesseract: PathBuf,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Do not try to open the visualization
    #[arg(long)]
    no_show: bool,

    /// Outline lines and blocks as well as words
    #[arg(long)]
    all_boxes: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Summary { input, pages }) => cmd_summary(&input, pages.as_deref()),
        Some(Commands::Augment { dir, seed }) => cmd_augment(&dir, seed),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: run the pipeline if inputs are provided
            if cli.run.inputs.is_empty() {
                println!("{}", "Usage: unocr <FILES>...".yellow());
                println!("       unocr --help for more information");
                Ok(())
            } else {
                cmd_run(&cli.run)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.inputs.is_empty() {
        return Err("no input files given".into());
    }

    let source = source::load(&args.inputs, &LoadOptions::default())?;
    let images = page_images(source.as_ref())?;
    println!("{} {} pages", "Loaded".green(), images.len());

    let options = TesseractOptions::new()
        .with_binary(&args.tesseract)
        .with_language(&args.lang)
        .with_psm(args.psm);
    let engine = TesseractEngine::new(options);
    log::debug!("Recognizing with the {} engine", engine.name());

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Recognizing...");

    let mut doc = Document::new();
    for image in &images {
        doc.add_page(engine.recognize_page(image)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!();
    write_summary(&doc, &mut std::io::stdout().lock())?;
    println!();

    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_json_file(&doc, &args.json, format)?;
    println!("{} {}", "Saved OCR results to".green(), args.json.display());

    let index = args.page.checked_sub(1).ok_or("page numbers start at 1")? as usize;
    let page = doc
        .get_page(args.page)
        .ok_or_else(|| unocr::Error::PageOutOfRange(args.page, doc.page_count()))?;

    let mut visualize = VisualizeOptions::new().with_show(!args.no_show);
    if args.all_boxes {
        visualize = visualize.with_all_levels();
    }
    let outcome = visualize_page(
        page,
        source.as_ref(),
        index,
        &args.image,
        &visualize,
        &SystemViewer::new(),
    )?;
    println!("{} {}", "Saved visualization to".green(), args.image.display());

    if let Some(DisplayOutcome::Skipped(reason)) = outcome {
        println!(
            "{}",
            format!("(Non-interactive backend, skipping display: {})", reason).dimmed()
        );
    }

    Ok(())
}

fn cmd_summary(input: &Path, pages: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
    } else {
        PageSelection::All
    };

    let doc = read_json_file(input)?.into_document();
    let mut selected = Document::new();
    for number in page_selection.resolve(doc.page_count()) {
        if let Some(page) = doc.get_page(number) {
            println!("{}", PageStats::of(page, number));
            selected.add_page(page.clone());
        }
    }

    println!();
    println!("{}", "Recognized Text:".cyan().bold());
    println!("{}", "-".repeat(30).dimmed());
    for line in recognized_lines(&selected) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_augment(dir: &Path, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = AugmentOptions::new();
    if let Some(seed) = seed {
        options = options.with_seed(seed);
    }

    let written = augment_dir(dir, &options)?;
    for path in &written {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("{} {}", "Wrote".green(), name);
    }

    println!("\n{} {} images augmented", "Done!".green().bold(), written.len());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unocr".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR result export and visualization tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unocr".dimmed());
    println!("License: MIT");
}
