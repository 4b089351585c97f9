//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Likes Exporter                                    ║
║     Incremental export of media from liked tweets     ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print where this run reads and writes.
pub fn print_config_summary(cache_file: &str, media_dir: &str, parallel: usize, resume: Option<u64>) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Cache file: {}", cache_file);
    println!("  Media dir:  {}", media_dir);
    println!("  Parallel:   {}", parallel);
    if let Some(cursor) = resume {
        println!("  Resume at:  {}", cursor);
    }
    println!();
}
