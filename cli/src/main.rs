//! unscroll CLI - screen-height pagination tool

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unscroll::layout::{self, CollectingObserver, PaginationOptions};
use unscroll::render::{self, HtmlOptions, JsonFormat, ScaleStyle};
use unscroll::{
    Book, Document, Paginator, Presentation, ReflowController, ReflowOptions, ReflowTrigger,
    Surface, TextMetrics, Viewport,
};

#[derive(Parser)]
#[command(name = "unscroll")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Paginate long-form posts into screen-height pages", long_about = None)]
struct Cli {
    /// Input document (JSON node list)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct ViewportArgs {
    /// Viewport width in CSS px
    #[arg(long, default_value = "390", env = "UNSCROLL_VIEWPORT_WIDTH")]
    viewport_width: f32,

    /// Viewport height in CSS px
    #[arg(long, default_value = "844", env = "UNSCROLL_VIEWPORT_HEIGHT")]
    viewport_height: f32,

    /// Bottom edge of the fixed header in CSS px
    #[arg(long, default_value = "56")]
    chrome_bottom: f32,

    /// Content column width (defaults to viewport width minus 32px gutters)
    #[arg(long)]
    column_width: Option<f32>,

    /// Minimum page scale
    #[arg(long)]
    min_scale: Option<f32>,

    /// Options file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl ViewportArgs {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height, self.chrome_bottom)
    }

    fn column_width(&self) -> f32 {
        self.column_width
            .unwrap_or((self.viewport_width - 32.0).max(1.0))
    }

    fn pagination_options(&self) -> Result<PaginationOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => PaginationOptions::default(),
        };
        if let Some(min_scale) = self.min_scale {
            options = options.with_min_scale(min_scale);
        }
        options.validate()?;
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Paginate a document for one viewport
    Paginate {
        /// Input document (JSON node list)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        viewport: ViewportArgs,

        /// Write sheet markup to this file
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,

        /// Scale pages with transform instead of zoom in HTML output
        #[arg(long)]
        transform: bool,

        /// Print the pages as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Replay a sequence of viewport heights through the reflow controller
    Simulate {
        /// Input document (JSON node list)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        viewport: ViewportArgs,

        /// Viewport heights to resize through, comma separated
        #[arg(long, value_delimiter = ',', default_value = "844,700,560,844")]
        heights: Vec<f32>,
    },

    /// Show document structure
    Info {
        /// Input document (JSON node list)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Paginate {
            input,
            viewport,
            html,
            transform,
            json,
            compact,
        }) => cmd_paginate(&input, &viewport, html.as_deref(), transform, json, compact),
        Some(Commands::Simulate {
            input,
            viewport,
            heights,
        }) => cmd_simulate(&input, &viewport, &heights),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                let viewport = ViewportArgs {
                    viewport_width: 390.0,
                    viewport_height: 844.0,
                    chrome_bottom: 56.0,
                    column_width: None,
                    min_scale: None,
                    config: None,
                };
                cmd_paginate(&input, &viewport, None, false, false, false)
            } else {
                println!("{}", "Usage: unscroll <FILE>".yellow());
                println!("       unscroll --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_paginate(
    input: &Path,
    args: &ViewportArgs,
    html: Option<&Path>,
    transform: bool,
    json: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = Document::from_path(input)?;
    let options = args.pagination_options()?;
    let viewport = args.viewport();
    let column_width = args.column_width();
    let paginator = Paginator::new().with_options(options);

    let mut observer = CollectingObserver::new();
    let presentation = paginator.run_with_observer(
        &mut document.nodes,
        &mut TextMetrics::default(),
        &viewport,
        column_width,
        &mut observer,
    )?;

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", render::to_json(&presentation, format)?);
    }

    let book = match &presentation {
        Presentation::Paged(book) => book,
        Presentation::Continuous => {
            if !json {
                println!(
                    "{} {}px is wider than {}px; continuous layout is used",
                    "Viewport".yellow(),
                    viewport.width,
                    paginator.options().phone_max_width
                );
            }
            return Ok(());
        }
    };

    if !json {
        print_summary(input, &viewport, book, &observer);
    }

    if let Some(path) = html {
        let style = if transform {
            ScaleStyle::Transform
        } else {
            ScaleStyle::Zoom
        };
        let markup = render::to_html(book, &HtmlOptions::new().with_scale_style(style));
        fs::write(path, markup)?;
        println!("{} {}", "Saved to".green(), path.display());
    }

    Ok(())
}

fn print_summary(input: &Path, viewport: &Viewport, book: &Book, observer: &CollectingObserver) {
    println!("{}", "Pagination".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {} × {} (chrome {})",
        "Viewport".bold(),
        viewport.width,
        viewport.height,
        viewport.chrome_bottom
    );
    println!("{}: {}px", "Budget".bold(), book.budget.height());
    println!("{}: {}px", "Column".bold(), book.column_width);
    println!("{}: {}", "Pages".bold(), book.page_count());
    println!();

    for page in &book.pages {
        let line = format!(
            "  {:>3}  {:>2} blocks  {:>6.0}px  scale {:.3}",
            page.index + 1,
            page.block_count(),
            page.height,
            page.scale
        );
        if page.oversized {
            println!("{} {}", line.red(), "oversized".red().bold());
        } else if page.is_scaled() {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }

    if !observer.unfitted.is_empty() {
        println!();
        println!(
            "{} {} page(s) overflow even at the minimum scale",
            "Warning:".yellow().bold(),
            observer.unfitted.len()
        );
    }
}

/// Surface backed by the built-in text metrics.
struct CliSurface {
    viewport: Viewport,
    column_width: f32,
    metrics: TextMetrics,
    refits: usize,
}

impl Surface for CliSurface {
    type Oracle = TextMetrics;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn column_width(&self) -> f32 {
        self.column_width
    }

    fn oracle(&mut self) -> &mut TextMetrics {
        &mut self.metrics
    }

    fn present(&mut self, presentation: &Presentation) {
        log::debug!("Presenting {} pages", presentation.book().map_or(0, Book::page_count));
    }

    fn apply_scales(&mut self, _scales: &[f32]) {
        self.refits += 1;
    }
}

fn cmd_simulate(
    input: &Path,
    args: &ViewportArgs,
    heights: &[f32],
) -> Result<(), Box<dyn std::error::Error>> {
    let document = Document::from_path(input)?;
    let options = ReflowOptions::new().with_pagination(args.pagination_options()?);
    let debounce = options.debounce_for(ReflowTrigger::Resize);
    let mut controller = ReflowController::new(document.nodes, options)?;
    let handle = controller.handle();

    let mut surface = CliSurface {
        viewport: args.viewport(),
        column_width: args.column_width(),
        metrics: TextMetrics::default(),
        refits: 0,
    };

    let pb = ProgressBar::new(heights.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    // Virtual clock: frames are 16ms apart and no real time passes.
    let frame = Duration::from_millis(16);
    let mut now = Instant::now();
    let mut rows = Vec::new();

    for &height in heights {
        pb.set_message(format!("{}px", height));
        surface.viewport = Viewport::new(args.viewport_width, height, args.chrome_bottom);
        handle.request(ReflowTrigger::Resize, now);
        now += debounce;
        controller.poll(now, &mut surface);

        let mut frames = 0;
        while controller.on_frame(now, &mut surface) {
            now += frame;
            frames += 1;
        }

        let summary = match controller.book() {
            Some(book) => format!(
                "{} pages, budget {}px, {} scaled, {} frames chased",
                book.page_count(),
                book.budget.height(),
                book.pages.iter().filter(|p| p.is_scaled()).count(),
                frames
            ),
            None => "continuous".to_string(),
        };
        rows.push((height, summary, controller.navigator().label()));
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!();
    println!("{}", "Reflow".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (height, summary, label) in rows {
        println!("  {:>6}px  {}  [{}]", height, summary, label.dimmed());
    }
    println!(
        "{}: {} passes, {} refits",
        "Total".bold(),
        controller.pass_count(),
        surface.refits
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = Document::from_path(input)?;
    let stats = layout::normalize(&mut document.nodes);
    let sections = layout::build_sections(&document.nodes);

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    let mut units = 0;
    let mut paired = 0;
    let mut headings = 0;
    for section in &sections {
        for block in &section.blocks {
            *kinds.entry(block.kind.label()).or_default() += 1;
        }
        units += section.units.len();
        paired += section.units.iter().filter(|u| u.is_keep_with_next()).count();
        headings += section.heading_count();
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Nodes".bold(), document.len());
    println!("{}: {}", "Sections".bold(), sections.len());
    println!("{}: {} ({} heading pairs)", "Units".bold(), units, paired);
    println!("{}: {}", "Headings".bold(), headings);

    println!();
    println!("{}", "Blocks".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (kind, count) in &kinds {
        println!("{}: {}", (*kind).bold(), count);
    }

    if !stats.is_clean() {
        println!();
        println!(
            "{}: {} text runs wrapped, {} whitespace runs dropped, {} headings rewritten",
            "Normalized".bold(),
            stats.wrapped_text,
            stats.dropped_whitespace,
            stats.headings_rewritten
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unscroll".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Screen-height pagination tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unscroll".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(config: Option<PathBuf>, min_scale: Option<f32>) -> ViewportArgs {
        ViewportArgs {
            viewport_width: 390.0,
            viewport_height: 844.0,
            chrome_bottom: 56.0,
            column_width: None,
            min_scale,
            config,
        }
    }

    #[test]
    fn test_default_column_width() {
        assert_eq!(args(None, None).column_width(), 358.0);
    }

    #[test]
    fn test_config_file_with_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"chrome_padding": 20, "fit": {{"min_scale": 0.8}}}}"#).unwrap();

        let options = args(Some(file.path().to_path_buf()), None)
            .pagination_options()
            .unwrap();
        assert_eq!(options.chrome_padding, 20.0);
        assert_eq!(options.fit.min_scale, 0.8);

        let options = args(Some(file.path().to_path_buf()), Some(0.9))
            .pagination_options()
            .unwrap();
        assert_eq!(options.fit.min_scale, 0.9);
    }

    #[test]
    fn test_invalid_min_scale_is_rejected() {
        assert!(args(None, Some(0.0)).pagination_options().is_err());
    }
}
