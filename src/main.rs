//! genovis CLI
//!
//! Reads a JSON visualization specification from a file or stdin, compiles
//! the layout and linking tables, and prints the renderer-facing output
//! document as JSON.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use genovis::{compile_with_config, CompiledOutput, LayoutConfig, RootSpec};

#[derive(Parser)]
#[command(name = "genovis")]
#[command(about = "Layout and linking compiler for genomic visualization specifications")]
struct Cli {
    /// Input specification file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(short, long)]
    pretty: bool,

    /// Debug mode: print the resolved bounding-box table to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("genovis: no input file and stdin is a terminal; see --help");
        std::process::exit(2);
    }

    let config = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading configuration '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let spec: RootSpec = match serde_json::from_str(&source) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error decoding specification: {}", e);
            std::process::exit(1);
        }
    };

    let output = compile_with_config(&spec, &config);

    if cli.debug {
        print_track_table(&output);
    }

    let json = if cli.pretty {
        output.to_json_pretty()
    } else {
        output.to_json()
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_track_table(output: &CompiledOutput) {
    eprintln!("=== Track placements ===");
    for info in &output.tracks {
        let id = info.primary_id().unwrap_or("<anon>");
        let b = &info.bounds;
        match info.placement.circular_band() {
            Some(band) => {
                let mid = band.midpoint(b);
                eprintln!(
                    "[{}] x={:.1} y={:.1} w={:.1} h={:.1} ring r=[{:.1},{:.1}] a=[{:.1},{:.1}] mid=({:.1},{:.1})",
                    id,
                    b.x,
                    b.y,
                    b.width,
                    b.height,
                    band.inner_radius,
                    band.outer_radius,
                    band.start_angle,
                    band.end_angle,
                    mid.x,
                    mid.y
                );
            }
            None => {
                eprintln!(
                    "[{}] x={:.1} y={:.1} w={:.1} h={:.1} grid=({:.2},{:.2},{:.2},{:.2})",
                    id,
                    b.x,
                    b.y,
                    b.width,
                    b.height,
                    info.grid.x,
                    info.grid.y,
                    info.grid.w,
                    info.grid.h
                );
            }
        }
    }
    eprintln!(
        "total {:.1} x {:.1}, {} zoom lock(s), {} location lock(s), {} brush(es)",
        output.size.width,
        output.size.height,
        output.zoom_locks.locks_dict.len(),
        output.location_locks.locks_dict.len(),
        output.brushes.len()
    );
    eprintln!("========================");
}
