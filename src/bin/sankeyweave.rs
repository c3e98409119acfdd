//! Command-line front end: reads a seed file and prints the specification
//! document, or the tooltip of one link.

use clap::{Parser, Subcommand};
use sankeyweave::{PipelineRegistry, SankeyBuilder, Seed};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sankeyweave", version, about = "Build sankey specifications from seed files")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Build the specification document for a seed.
  Build {
    /// Seed JSON file.
    seed: PathBuf,
    /// Write the document here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Emit compact instead of indented JSON.
    #[arg(long)]
    compact: bool,
  },
  /// Print the tooltip of one link.
  Tooltip {
    /// Seed JSON file.
    seed: PathBuf,
    /// Position of the link (depth-first pre-order for trees).
    link_index: usize,
  },
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
  let registry = PipelineRegistry::standard();
  let builder = SankeyBuilder::new(&registry);
  match cli.command {
    Command::Build {
      seed,
      output,
      compact,
    } => {
      let doc = builder.build(&Seed::from_path(&seed)?)?;
      let json = if compact {
        doc.to_json()?
      } else {
        doc.to_json_pretty()?
      };
      match output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
      }
    }
    Command::Tooltip { seed, link_index } => {
      let doc = builder.build(&Seed::from_path(&seed)?)?;
      let tip = doc
        .tooltip_for(link_index)
        .ok_or_else(|| format!("no tooltip for link {link_index}"))?;
      println!("{}", tip.title);
      for row in &tip.content {
        println!("  {}: {}", row.key, row.value);
      }
    }
  }
  Ok(())
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  match run(Cli::parse()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("error: {e}");
      ExitCode::FAILURE
    }
  }
}
