mod aggregate;
mod clean;
mod cli;
mod config;
mod deserialise;
mod error;
mod export;
mod logging;
mod pipeline;
mod reading;
mod report;
mod reshape;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Commands::Missing { file, args } => {
            match command::missing(file, &args.to_config(vec![file.clone()])) {
                Ok(summary) => println!("{}", summary),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        Commands::Annual { file, args } => {
            match command::annual(file, &args.to_config(vec![file.clone()])) {
                Ok(filename) => println!("File saved to `{}`", filename),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        Commands::Folder { dir, args } => match command::folder(dir, args.to_config(vec![])).await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Stats { dir, args } => match command::stats(dir, args.to_config(vec![])).await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Subfolders { dir, args } => {
            match command::subfolders(dir, args.to_config(vec![])).await {
                Ok(written) => println!("{} summaries written", written),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }

    Ok(())
}
