//! CLI tool for generating PowerPoint decks from a topic.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use deck_core::backup::{self, backup_filename, download_filename};
use deck_core::quality::score_deck;
use deck_core::{
    classify_topic, Audience, Deck, DeckSession, DesignTemplate, FontSizes, GenerationRequest,
    Oracle, ParseMode, PreviewFormatter, SlideCount, SlideRequestor, TalkLength,
};
use deck_oracle::{OracleConfig, Provider};
use deck_pptx::{DeckRenderer, PptxReader, RenderOptions, SlideSize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Generate slide decks with an LLM and export them as PowerPoint files.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a deck for a topic and write it as .pptx
    Generate(GenerateArgs),
    /// Render a JSON backup to .pptx
    Render(RenderArgs),
    /// Show the template and colors a topic would get
    Classify {
        /// Presentation topic
        topic: String,
    },
    /// Print the slides of a .pptx file
    Inspect {
        /// Input PowerPoint file (.pptx)
        input: PathBuf,

        /// Print the slides as a JSON backup instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
struct StyleArgs {
    /// Design template (modern, dark, minimal, corporate); default follows the topic
    #[arg(short, long)]
    template: Option<DesignTemplate>,

    /// Title font size in points (18-36)
    #[arg(long, default_value = "24")]
    title_size: u32,

    /// Content font size in points (12-24)
    #[arg(long, default_value = "16")]
    content_size: u32,

    /// Do not prefix content lines with bullets
    #[arg(long)]
    no_bullets: bool,

    /// Slide size: 4:3, 16:9 or <width>x<height> in EMU
    #[arg(long, default_value = "4:3", value_parser = SlideSize::parse)]
    slide_size: SlideSize,
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    /// Presentation topic
    topic: String,

    /// Number of slides (5, 8, 10, 12, 15 or 20)
    #[arg(short = 'n', long, default_value = "10", value_parser = parse_slide_count)]
    slides: SlideCount,

    /// Presentation style
    #[arg(long, default_value = deck_core::types::DEFAULT_STYLE)]
    style: String,

    /// Audience (team, client, executive, student, public)
    #[arg(long, default_value = "team")]
    audience: Audience,

    /// Talk length in minutes (5, 10, 15, 20, 30, 60+)
    #[arg(long, default_value = "15")]
    length: TalkLength,

    /// Text-generation provider (anthropic, openai)
    #[arg(long, default_value = "anthropic")]
    provider: Provider,

    /// Model name (overrides DECK_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(flatten)]
    style_args: StyleArgs,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a JSON backup of the slides
    #[arg(short, long)]
    backup: bool,

    /// Do not print the slide preview
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    /// JSON backup file
    input: PathBuf,

    #[command(flatten)]
    style_args: StyleArgs,

    /// Output file (default: named after the first slide)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            log::warn!("Could not load .env: {}", e);
        }
    }

    let now = Local::now().naive_local();

    match cli.command {
        Command::Generate(args) => {
            let oracle = build_oracle(&args)?;
            let session = generate(oracle, &args)?;
            let written = write_outputs(&session, &args, now)?;
            for path in written {
                eprintln!("Written to: {}", path.display());
            }
        }
        Command::Render(args) => {
            let path = render_backup(&args, now)?;
            eprintln!("Written to: {}", path.display());
        }
        Command::Classify { topic } => {
            print!("{}", describe_classification(&topic));
        }
        Command::Inspect { input, json } => {
            print!("{}", inspect(&input, json)?);
        }
    }

    Ok(())
}

fn parse_slide_count(s: &str) -> std::result::Result<SlideCount, String> {
    let count: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    SlideCount::new(count).map_err(|e| e.to_string())
}

fn build_oracle(args: &GenerateArgs) -> Result<Box<dyn Oracle>> {
    let mut config = OracleConfig::from_env(args.provider);
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(seconds) = args.timeout {
        config = config.with_timeout(Duration::from_secs(seconds));
    }
    config
        .build()
        .with_context(|| format!("Failed to set up the {} backend", args.provider))
}

/// Session configured from the style options.
fn session_for(style: &StyleArgs) -> Result<DeckSession> {
    let fonts = FontSizes::new(style.title_size, style.content_size)?;
    let mut session = DeckSession::new()
        .with_fonts(fonts)
        .with_bullets(!style.no_bullets);
    if let Some(template) = style.template {
        session = session.with_template(template);
    }
    Ok(session)
}

fn render_options(session: &DeckSession, style: &StyleArgs) -> RenderOptions {
    RenderOptions::from(session).with_slide_size(style.slide_size)
}

/// Ask the oracle for slides and keep them in a fresh session.
fn generate<O: Oracle>(oracle: O, args: &GenerateArgs) -> Result<DeckSession> {
    let mut session = session_for(&args.style_args)?;
    let request = GenerationRequest::new(args.topic.as_str(), args.slides)
        .with_style(args.style.as_str())
        .with_audience(args.audience)
        .with_talk_length(args.length);

    let requestor = SlideRequestor::new(oracle);
    let generation = session
        .generate(&requestor, &request)
        .with_context(|| format!("Failed to generate slides for '{}'", args.topic))?;

    if generation.parse_mode == ParseMode::Heuristic {
        log::warn!("Reply was not a JSON slide array; slides were recovered line by line");
    }
    if generation.padded_slides() > 0 {
        eprintln!(
            "Only {} slides were generated; added {} placeholder slides",
            generation.parsed_slides,
            generation.padded_slides()
        );
    }
    log::info!("Content quality score: {:.2}", score_deck(&generation.deck));

    if !args.quiet {
        let preview = PreviewFormatter::new().with_bullets(session.use_bullets);
        println!("{}\n", preview.format(&generation.deck));
    }

    Ok(session)
}

/// Write the rendered deck (and optionally a JSON backup) into the output directory.
fn write_outputs(session: &DeckSession, args: &GenerateArgs, now: NaiveDateTime) -> Result<Vec<PathBuf>> {
    let deck = session
        .deck
        .as_ref()
        .context("No slides to write")?;

    let dir = match &args.output {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.clone()
        }
        None => PathBuf::from("."),
    };

    let mut written = Vec::new();
    let pptx_path = dir.join(download_filename(deck, now));
    write_pptx(deck, &render_options(session, &args.style_args), &pptx_path)?;
    written.push(pptx_path);

    if args.backup {
        let backup_path = dir.join(backup_filename(now));
        let file = File::create(&backup_path)
            .with_context(|| format!("Failed to create {}", backup_path.display()))?;
        backup::write_backup(deck, BufWriter::new(file))
            .with_context(|| format!("Failed to write to {}", backup_path.display()))?;
        written.push(backup_path);
    }

    Ok(written)
}

fn write_pptx(deck: &Deck, options: &RenderOptions, path: &Path) -> Result<()> {
    let output = DeckRenderer::new(options.clone())
        .render(deck)
        .context("Failed to render the presentation")?;
    for warning in &output.warnings {
        eprintln!("Warning: {}", warning);
    }
    fs::write(path, &output.bytes).with_context(|| format!("Failed to write to {}", path.display()))?;
    Ok(())
}

/// Render a JSON backup to a .pptx file.
fn render_backup(args: &RenderArgs, now: NaiveDateTime) -> Result<PathBuf> {
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let deck = backup::read_backup(BufReader::new(file))
        .with_context(|| format!("Failed to read backup {}", args.input.display()))?;

    let mut session = session_for(&args.style_args)?;
    if args.style_args.template.is_none() {
        if let Some(title) = deck.first_title() {
            session.apply_profile(&classify_topic(title));
        }
    }

    let path = match &args.output {
        Some(path) => path.clone(),
        None => PathBuf::from(download_filename(&deck, now)),
    };
    write_pptx(&deck, &render_options(&session, &args.style_args), &path)?;
    Ok(path)
}

fn describe_classification(topic: &str) -> String {
    let profile = classify_topic(topic);
    format!(
        "category: {}\ntemplate: {}\ncolors:   {} ({} / {})\n",
        profile.category.label(),
        profile.template,
        profile.color_scheme,
        profile.color_scheme.primary(),
        profile.color_scheme.secondary()
    )
}

/// Read a .pptx file and format its slides.
fn inspect(input: &Path, json: bool) -> Result<String> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let deck = PptxReader::new()
        .read(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", input.display()))?;

    log::debug!("Found {} slides", deck.len());
    if json {
        return Ok(format!("{}\n", backup::to_json(&deck)?));
    }
    Ok(format!(
        "{}\n\n({} slides, quality {:.2})\n",
        PreviewFormatter::new().format(&deck),
        deck.len(),
        score_deck(&deck)
    ))
}
