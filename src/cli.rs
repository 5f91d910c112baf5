use crate::config::load_config;
use crate::graph::parse_snapshot;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kintree", version, about = "Family tree layout engine")]
pub struct Args {
    /// Input snapshot JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout JSON. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Viewer id; defaults to the snapshot's tree root
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Config JSON5 file (layout geometry, dump options)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long = "pretty")]
    pub pretty: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let snapshot = parse_snapshot(&input).context("failed to parse snapshot")?;

    let user = args
        .user
        .as_deref()
        .or(snapshot.tree.root_person_id.as_deref())
        .or_else(|| snapshot.people.first().map(|p| p.id.as_str()))
        .unwrap_or_default()
        .to_string();

    let layout = compute_layout(&snapshot, &user, &config.layout);
    let pretty = args.pretty || config.dump.pretty;
    write_layout_dump(&layout, args.output.as_deref(), pretty)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
