use clap::Parser;
use fiw_processor::cli::{self, Args};
use fiw_processor::pipeline::RatingsPipeline;
use std::process;

fn main() {
    let args = Args::parse();
    cli::setup_logging(args.verbose);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let config = args.to_config();
    let result = runtime.block_on(async { RatingsPipeline::new(config).run().await });

    match result {
        Ok(_stats) => {
            // Success - the summary has already been printed by the pipeline
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
