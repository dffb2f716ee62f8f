//! Pinpoint CLI
//!
//! Prints ranked CSS selector candidates for elements of an HTML document.

mod report;

use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pinpoint_dom::{DomTree, NodeId};
use pinpoint_html::{load_file, parse_html};
use pinpoint_selector::{Generator, GeneratorOptions, specificity_of};
use tracing_subscriber::EnvFilter;

use crate::report::{ElementReport, Palette};

/// Pinpoint - CSS selector suggestions for HTML elements
#[derive(Parser, Debug)]
#[command(name = "pinpoint")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Every element under <body>
    pinpoint page.html

    # One element by id, as JSON
    pinpoint page.html --id submit --json

    # Element by element-child indices from <html> (1 = body after head)
    pinpoint --html '<ul><li>a</li><li>b</li></ul>' --path 1/0/1

    # Drop candidates that repeat an earlier selector
    pinpoint page.html --id nav --dedupe

    # Score a selector without loading a document
    pinpoint --specificity '#nav .item:hover'

    # Debug logging
    RUST_LOG=pinpoint_selector=trace pinpoint page.html --id nav
"#)]
struct Cli {
    /// Path to HTML file
    #[arg(value_name = "FILE", conflicts_with = "html")]
    file: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Inspect the first element with this id
    #[arg(long, value_name = "ID", conflicts_with = "path")]
    id: Option<String>,

    /// Inspect the element at this slash-separated index path
    #[arg(long, value_name = "0/1/2")]
    path: Option<String>,

    /// Print candidates as JSON
    #[arg(long)]
    json: bool,

    /// Drop candidates whose selector repeats an earlier one
    #[arg(long)]
    dedupe: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Print the specificity of a selector and exit
    #[arg(long, value_name = "SELECTOR")]
    specificity: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let palette = Palette::new(!cli.no_color && !cli.json);
    let mut out = io::stdout().lock();

    if let Some(selector) = &cli.specificity {
        let weight = specificity_of(selector);
        if cli.json {
            serde_json::to_writer_pretty(&mut out, &weight)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", palette.weight(weight))?;
        }
        return Ok(());
    }

    let tree = load(&cli)?;
    let generator = Generator::new(&tree).with_options(GeneratorOptions { dedupe: cli.dedupe });
    let targets = resolve_targets(&cli, &tree, generator.boundary())?;
    tracing::debug!(targets = targets.len(), "resolved inspection targets");

    let reports: Vec<ElementReport> = targets
        .into_iter()
        .map(|node| ElementReport::new(&tree, &generator, node))
        .collect();

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &reports)?;
        writeln!(out)?;
    } else {
        for report in &reports {
            write!(out, "{}", report.render(palette))?;
        }
    }
    Ok(())
}

/// Logs go to stderr so they never mix with candidate output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(cli: &Cli) -> Result<DomTree> {
    if let Some(html) = &cli.html {
        return Ok(parse_html(html));
    }
    let Some(path) = &cli.file else {
        bail!("no input given: pass a FILE or --html");
    };
    load_file(path).with_context(|| format!("failed to load {}", path.display()))
}

/// The element named by `--id` or `--path`, else every element from the
/// boundary down.
fn resolve_targets(cli: &Cli, tree: &DomTree, boundary: Option<NodeId>) -> Result<Vec<NodeId>> {
    if let Some(id) = &cli.id {
        let Some(node) = tree.find_by_id(id) else {
            bail!("no element with id '{id}'");
        };
        return Ok(vec![node]);
    }
    if let Some(path) = &cli.path {
        let indices = parse_path(path)?;
        let Some(node) = tree.element_at_path(&indices) else {
            bail!("no element at path '{path}'");
        };
        return Ok(vec![node]);
    }

    let Some(boundary) = boundary else {
        bail!("document has no elements");
    };
    let mut targets = vec![boundary];
    targets.extend(tree.descendant_elements(boundary));
    Ok(targets)
}

/// `1/0/2` -> `[1, 0, 2]`. Empty segments are skipped, so `""` is `<html>`.
fn parse_path(path: &str) -> Result<Vec<usize>> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .parse::<usize>()
                .with_context(|| format!("invalid path segment '{segment}' in '{path}'"))
        })
        .collect()
}
