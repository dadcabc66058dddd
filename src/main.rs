//! Mini-Justify CLI (for trying patterns and widths from a terminal)
//! The main interface is the library and its WASM bindings.

use anyhow::{Context, Result};
use clap::Parser;
use mini_justify::{
    hyphenate_with, DisplayItem, FontMetrics, Line, LineWidths, PatternTree, RecordingListener,
    Typesetter,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mini-justify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pattern tree (.json) or TeX pattern file
    patterns: PathBuf,

    /// Line width in characters; repeat for per-line widths
    #[arg(short, long = "width", default_value = "40")]
    widths: Vec<f64>,

    /// Print lines as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print the hyphenation trace of every word
    #[arg(long)]
    trace: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Paragraph text
    #[arg(required = true)]
    text: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let tree = load_patterns(&cli.patterns)?;
    log::info!("loaded {} patterns from {}", tree.pattern_count(), cli.patterns.display());

    let text = cli.text.join(" ");
    if cli.trace {
        for word in text.split_whitespace() {
            let mut listener = RecordingListener::new();
            let syllables = hyphenate_with(&tree, word, &mut listener);
            print!("{}", listener.render());
            println!("{}\n", syllables.join("-"));
        }
    }

    let metrics = FontMetrics::monospace(1.0);
    let widths = LineWidths::per_line(cli.widths.iter().copied());
    let lines = Typesetter::new(&tree)
        .line_break_with_widths(&text, &metrics, &widths)
        .context("Failed to break paragraph")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for line in &lines {
            println!("|{}|", render_line(line));
        }
    }
    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env().filter_level(level).init();
}

fn load_patterns(path: &Path) -> Result<PatternTree> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read patterns from {}", path.display()))?;
    let tree = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => PatternTree::from_json(&source),
        _ => PatternTree::from_patterns(&source),
    }
    .with_context(|| format!("Failed to load patterns from {}", path.display()))?;

    if tree.is_empty() {
        log::warn!("{} contains no patterns, words will not be hyphenated", path.display());
    }
    Ok(tree)
}

/// Lay a line out on a character grid, spreading glue over whole cells
fn render_line(line: &Line) -> String {
    let mut out = String::new();
    let mut x = 0.0;
    for (item, start) in line.items.iter().zip(line.positions()) {
        match item {
            DisplayItem::Box { content, .. } => {
                out.push_str(content);
                x = start + item.width();
            }
            DisplayItem::Glue { width } => {
                let cells = ((start + width).round() - x.round()).max(1.0) as usize;
                out.extend(std::iter::repeat(' ').take(cells));
                x = start + width;
            }
        }
    }
    out
}
