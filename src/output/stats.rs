//! Statistics reporting.

use console::style;

use crate::download::RunSummary;

/// Print the end-of-run summary.
pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Summary:").bold());
    println!("  API requests:     {}", summary.request_count);
    println!("  New liked tweets: {}", summary.new_tweets);
    println!("  New media:        {}", summary.new_media);
    println!("  Cached tweets:    {}", summary.cached_tweets);
    println!("  Downloaded:       {}", style(summary.downloads.downloaded).green());
    println!("  Skipped:          {} (already on disk)", style(summary.downloads.skipped).yellow());
    if !summary.downloads.failed.is_empty() {
        println!(
            "  Failed:           {}",
            style(summary.downloads.failed.len()).red()
        );
        for url in &summary.downloads.failed {
            println!("    {}", style(url).dim());
        }
    }
    if let Some(cursor) = summary.resume_cursor {
        println!(
            "  {} pagination stopped early; rerun with --resume-from {}",
            style("Partial:").yellow().bold(),
            cursor
        );
    } else if summary.truncated {
        println!(
            "  {} pagination stopped before the first page",
            style("Partial:").yellow().bold()
        );
    }
    println!("{}", style("═".repeat(50)).dim());
}
