//! Ratings pipeline orchestration.
//!
//! Runs the fixed transform sequence once per invocation: fetch both
//! sources, reshape the wide grid to long records, tag them
//! positionally, widen to one record per (country, year), recode the
//! rating scales, join the continent reference, and write the tidy
//! table. Stages run strictly in order; no stage calls back into an
//! earlier one.

pub mod enrich;
pub mod frame;
pub mod recode;
pub mod reshape;
pub mod widen;

use crate::config::FiwConfig;
use crate::error::Result;
use crate::fetch::{fetch_source, read_ratings_grid};
use crate::models::PipelineStats;
use enrich::ReferenceTable;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// One-shot processor for the ratings dataset
#[derive(Debug)]
pub struct RatingsPipeline {
    config: FiwConfig,
    client: Client,
}

impl RatingsPipeline {
    pub fn new(config: FiwConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Run the full pipeline and write the tidy table
    pub async fn run(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        println!("{}", "Starting ratings processing".bright_green().bold());
        println!(
            "  {} {}",
            "Ratings:".bright_cyan(),
            self.config.ratings_source
        );
        println!(
            "  {} {}",
            "Reference:".bright_cyan(),
            self.config.reference_source
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.config.output_path.display()
        );

        // Step 1: fetch both sources concurrently
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message("Fetching sources...");

        let (ratings_bytes, reference_bytes) = tokio::try_join!(
            fetch_source(&self.client, &self.config.ratings_source),
            fetch_source(&self.client, &self.config.reference_source),
        )?;
        spinner.finish_with_message("Sources fetched");

        // Step 2: read the positional grid and the reference table
        let grid = read_ratings_grid(
            ratings_bytes,
            &self.config.ratings_source.to_string(),
            self.config.sheet_index,
            self.config.skip_rows,
            &self.config.na_marker,
        )?;
        let reference = ReferenceTable::from_csv(&reference_bytes)?;
        info!(
            "Loaded grid ({} rows x {} columns) and reference table ({} countries)",
            grid.rows.len(),
            grid.width(),
            reference.len()
        );

        // Steps 3-6: reshape, tag, widen, recode
        let long = reshape::reshape(&grid)?;
        let tagged = reshape::annotate(long, self.config.base_year);
        let wide = widen::widen(tagged)?;
        let recoded = recode::recode(wide)?;

        let countries: HashSet<&str> = recoded.iter().map(|r| r.country.as_str()).collect();
        let years: HashSet<i32> = recoded.iter().map(|r| r.year).collect();
        let country_count = countries.len();
        let year_count = years.len();

        // Step 7: continent join, left-preserving
        let enriched = enrich::enrich(recoded, &reference);
        let unmatched: HashSet<&str> = enriched
            .iter()
            .filter(|r| r.continent.is_none() && r.region.is_none())
            .map(|r| r.country.as_str())
            .collect();
        if !unmatched.is_empty() {
            warn!(
                "{} countries had no reference table match and keep null continent/region",
                unmatched.len()
            );
        }

        // Step 8: materialise and write the tidy table
        let mut df = frame::to_dataframe(&enriched)?;
        frame::write_output(&mut df, &self.config.output_path, self.config.format)?;

        let total_time = start_time.elapsed().as_millis();
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}",
            "Countries:".bright_cyan(),
            country_count.to_string().bright_white()
        );
        println!(
            "  {} {} ({}..{})",
            "Years:".bright_cyan(),
            year_count.to_string().bright_white(),
            self.config.base_year,
            self.config.base_year + year_count.saturating_sub(1) as i32
        );
        println!(
            "  {} {}",
            "Rows:".bright_cyan(),
            df.height().to_string().bright_white().bold()
        );
        if !unmatched.is_empty() {
            println!(
                "  {} {}",
                "Unmatched countries:".bright_yellow(),
                unmatched.len().to_string().bright_yellow()
            );
        }
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            total_time.to_string().bright_white()
        );

        Ok(PipelineStats {
            countries: country_count,
            years: year_count,
            rows: df.height(),
            unmatched_countries: unmatched.len(),
            output_path: self.config.output_path.clone(),
            processing_time_ms: total_time,
        })
    }
}
