use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use radview::Simulation;
use radview::io::{error_json, parse_scene, read_scene, response_json, write_response};

/// Computes radiative temperatures on receiver grids from a JSON scene
/// description.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene description file; reads stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Result file; writes stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(args: &Args) -> Result<()> {
    let scene = match &args.input {
        Some(path) => read_scene(path)?,
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read stdin")?;
            parse_scene(&body)?
        }
    };

    let results = Simulation::new(&scene).run();

    match &args.output {
        Some(path) => write_response(path, &results)?,
        None => println!("{}", response_json(&results)?),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        println!("{}", error_json(&format!("{err:#}")));
        std::process::exit(1);
    }
}
