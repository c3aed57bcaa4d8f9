use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::{info, warn, Level, LevelFilter};

use blog_index::logger::configure_logger;
use blog_index::post_processor::{collect_posts, excluded_paths, generate_index, render_index, IndexError};

use crate::config::open_config;

mod config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Blog root directory. Defaults to the current directory
    root_dir: Option<PathBuf>,

    /// Config path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Index file, relative to the blog root. Overrides the configuration
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prints the index instead of writing it
    #[arg(long)]
    stdout: bool,

    /// Prints the parsed posts as JSON instead of rendering the index
    #[arg(long, conflicts_with = "stdout")]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let root_dir = match args.root_dir {
        Some(dir) => dir,
        None => env::current_dir().context("Reading current directory")?,
    };

    let (mut config, config_path) = open_config(&root_dir, args.config_path)?;
    if let Some(output) = args.output {
        config.paths.output_file = output;
    }

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let print_only = args.stdout || args.json;
    if print_only {
        // Keep stdout for the document itself
        spdlog::default_logger().set_level_filter(LevelFilter::MoreSevereEqual(Level::Warn));
    }

    match config_path {
        Some(path) => info!("Using configuration {}", path.display()),
        None => info!("No {} found, using defaults", blog_index::config::CFG_FILE_NAME),
    }

    if print_only {
        let collection = collect_posts(&root_dir, excluded_paths(&config))?;
        if collection.records.is_empty() {
            return Err(IndexError::NoValidPosts {
                root: root_dir,
                found: collection.found,
            }.into());
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(&collection.records)?);
        } else {
            print!("{}", render_index(&config, &collection.records));
        }
        return Ok(());
    }

    let summary = generate_index(&root_dir, &config)?;
    println!("Found {} markdown files, processed {} posts", summary.found, summary.processed);
    println!("Index written to {}", summary.output_file.display());

    Ok(())
}
