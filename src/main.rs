//! # Pagegrid CLI
//!
//! Usage:
//!   pagegrid request.json -o layout.json
//!   echo '{ ... }' | pagegrid
//!   pagegrid --example > request.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pagegrid")]
#[command(about = "Lay out a paged grid from a JSON request", long_about = None)]
#[command(version)]
struct Cli {
    /// Request file. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the layout here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print an example request and exit.
    #[arg(long)]
    example: bool,

    /// Log each pass at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.example {
        print!("{}", example_request_json());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), pagegrid::PagedError> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let json = pagegrid::layout_json_to_string(&input)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &json)?;
            info!(bytes = json.len(), path = %path.display(), "wrote layout");
            eprintln!("✓ Written {} bytes to {}", json.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn example_request_json() -> &'static str {
    r##"{
  "config": {
    "viewport": { "width": 320, "height": 480 },
    "itemSize": { "width": 100, "height": 60 },
    "footerSize": { "width": 320, "height": 24 },
    "minimumRowSpacing": 10,
    "startAllSectionsOnNewPage": false,
    "pageContentInset": { "top": 10, "left": 0, "bottom": 10, "right": 0 },
    "scrollDirection": "Vertical"
  },
  "sections": [
    { "itemCount": 20 },
    {
      "items": [
        { "width": 320, "height": 200 },
        { "width": 155, "height": 90 },
        { "width": 155, "height": 90 }
      ],
      "startOnNewPage": true
    },
    { "itemCount": 9 }
  ],
  "footers": {
    "0": { "width": 0, "height": 0 }
  }
}
"##
}
