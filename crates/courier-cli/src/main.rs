//! Main entry point for the courier CLI.
//!
//! One-shot flow: load configuration, assemble the pipeline, prompt for
//! a single line of natural language, run the pipeline once, print the
//! outcome, exit. This is the single catch point for every pipeline
//! error; failures print and end the request without crashing.

use clap::Parser;
use courier_cli::build_pipeline;
use courier_config::Config;
use courier_core::PipelineOutcome;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command-line arguments for the courier CLI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "courier.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
	fmt().with_env_filter(env_filter).init();

	let config = Config::from_file(&args.config)?;
	tracing::info!("Loaded configuration [{}]", config.courier.id);

	let pipeline = build_pipeline(&config).await?;

	print!("What do you want to do?\n> ");
	io::stdout().flush()?;

	let mut line = String::new();
	io::stdin().lock().read_line(&mut line)?;
	let user_text = line.trim();

	if user_text.is_empty() {
		println!("Nothing to do.");
		return Ok(());
	}
	println!("User input: {}", user_text);

	match pipeline.handle(user_text).await {
		Ok(PipelineOutcome::Executed { intent, receipt }) => {
			println!("Parsed intent: transfer {} SUI to {}", intent.amount, intent.to);
			println!("Transaction digest: {}", receipt.digest);
		},
		Ok(PipelineOutcome::Incomplete) => {
			println!(
				"That didn't contain a complete transfer. \
				Please include an amount and a 0x recipient address."
			);
		},
		Err(err) => {
			eprintln!("Error: {}", err);
		},
	}

	Ok(())
}
