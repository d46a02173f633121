//! formflow demo CLI

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formflow::observability;
use formflow_cli::commands::{parse_field, RenderCommand, ServeCommand, SubmitCommand};

#[derive(Parser)]
#[command(name = "formflow")]
#[command(version)]
#[command(about = "Render, submit or serve the formflow demo contact form", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./formflow.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the unsubmitted form
    Render,
    /// Submit the form once and print the result
    Submit {
        /// Submitted field, repeatable (e.g. `--field name=Ben --field options[]=extra`)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Serve the form over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init("warn")?;

    match cli.command {
        Commands::Render => RenderCommand::new(cli.config).execute()?,
        Commands::Submit { fields } => SubmitCommand::new(fields, cli.config).execute()?,
        Commands::Serve { bind } => ServeCommand::new(bind, cli.config).execute().await?,
    }

    Ok(())
}
