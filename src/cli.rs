use crate::config::{EdgeStyle, load_config};
use crate::ir::{self, Direction, PersonRecord};
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::theme::Palette;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "famtree", version, about = "Lay out a family tree for a node-link renderer")]
pub struct Args {
    /// Input JSON file with person records, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output JSON file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON/JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Colour palette (default, protanopia, deuteranopia, tritanopia)
    #[arg(long = "palette", value_parser = parse_palette)]
    pub palette: Option<Palette>,

    /// Edge style (straight, step, smoothstep, bezier, simplebezier)
    #[arg(long = "edgeStyle", value_parser = parse_edge_style)]
    pub edge_style: Option<EdgeStyle>,

    /// Layout direction (TB, TD or LR)
    #[arg(short = 'd', long = "direction", value_parser = parse_direction)]
    pub direction: Option<Direction>,

    /// Log debug output from the layout stages
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(palette) = args.palette {
        config.settings = config.settings.with_palette(palette);
    }
    if let Some(edge_style) = args.edge_style {
        config.settings = config.settings.with_edge_style(edge_style);
    }
    if let Some(direction) = args.direction {
        config.layout.direction = direction;
    }

    let input = read_input(args.input.as_deref())?;
    let records = parse_records(&input)?;
    tracing::info!(records = records.len(), "laying out family tree");

    let layout = compute_layout(&records, &config);
    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout)?,
        None => {
            let json = LayoutDump::from_layout(&layout).to_json()?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn parse_records(input: &str) -> Result<Vec<PersonRecord>> {
    ir::parse_records(input).map_err(|err| anyhow::anyhow!("records must be a JSON array: {err}"))
}

fn parse_palette(value: &str) -> Result<Palette, String> {
    Palette::from_name(value).ok_or_else(|| format!("unknown palette: {value}"))
}

fn parse_edge_style(value: &str) -> Result<EdgeStyle, String> {
    EdgeStyle::from_token(value).ok_or_else(|| format!("unknown edge style: {value}"))
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    Direction::from_token(&value.to_ascii_uppercase())
        .ok_or_else(|| format!("unknown direction: {value}"))
}
