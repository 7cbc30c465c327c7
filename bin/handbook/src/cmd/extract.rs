//! Extract command - writes the per-language search corpora

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use handbook_extract::{ExtractStats, Extractor};

use super::{load_config, site_dir};

/// Run the extract command.
///
/// Reads every rendered page under the site directory and writes one corpus
/// per language.
pub fn run(config_path: &Path, site: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let site_dir = site_dir(site, &config);

    tracing::info!(?config_path, ?site_dir, "Starting extraction");

    let extractor = Extractor::new(config, &site_dir).wrap_err("Invalid extraction settings")?;
    let stats = extractor.run().wrap_err("Extraction failed")?;

    print_stats(&stats);
    println!("  Duration:   {:.2}s", start.elapsed().as_secs_f64());
    println!();

    tracing::info!(?stats, "Extraction completed successfully");

    Ok(())
}

/// Print extraction statistics in a user-friendly format.
fn print_stats(stats: &ExtractStats) {
    println!();
    println!("  Search corpora written:");
    println!("  ─────────────────────────────────");
    for lang in &stats.languages {
        println!("  {:<10} {:>6} pages", lang.language, lang.pages);
        if lang.skipped > 0 {
            println!("  {:<10} {:>6} unreadable (skipped)", "", lang.skipped);
        }
        println!("  {:<10} {}", "", lang.output.display());
    }
    println!("  ─────────────────────────────────");
    println!(
        "  Total:     {:>6} pages in {} languages",
        stats.total_pages(),
        stats.languages.len()
    );
}
