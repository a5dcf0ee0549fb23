#![warn(clippy::all, clippy::nursery, clippy::pedantic)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use bookmenu::{MemoryPage, Navigator, config::NavigatorConfig, parser, script::Step};
use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "bookmenu")]
#[command(about = "Build a paragraph menu for an HTML document and replay navigation steps", long_about = None)]
struct Args {
	/// HTML document to index
	file: PathBuf,

	/// Steps to replay: next, prev, scroll, page, toggle, link:ID, click:ID, hash:FRAGMENT, clear
	steps: Vec<Step>,

	/// Address fragment present when the page loads
	#[arg(short, long, default_value = "")]
	fragment: String,

	/// INI file with a [navigation] section
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Print the final page as JSON
	#[arg(long)]
	json: bool,

	/// Log every transition
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();
	let mut logger = env_logger::Builder::from_default_env();
	if args.verbose {
		logger.filter_level(LevelFilter::Debug);
	}
	logger.init();

	let config = match &args.config {
		Some(path) => NavigatorConfig::load(path)?,
		None => NavigatorConfig::default(),
	};
	let index = parser::load_file(&args.file, &config.paragraph_selector)?;
	let mut navigator = Navigator::new(index, config, MemoryPage::with_fragment(args.fragment.as_str()));
	navigator.load().context("Failed to restore the active paragraph from the fragment")?;
	for step in &args.steps {
		step.apply(&mut navigator).with_context(|| format!("Step '{step}' failed"))?;
	}

	let snapshot = navigator.presenter().snapshot();
	if args.json {
		println!("{}", serde_json::to_string_pretty(&snapshot)?);
	} else {
		print!("{snapshot}");
	}
	Ok(())
}
