//! Command-line interface definitions.
//!
//! The crawler runs one full pass when invoked; scheduling repeated runs
//! belongs to whatever invokes the binary (cron, a service manager, or the
//! embedding application).

use clap::Parser;

/// Command-line arguments for the crawler binary.
///
/// # Examples
///
/// ```sh
/// # One crawl pass, log-only
/// vn_news_crawler
///
/// # Export the crawled articles as JSON
/// vn_news_crawler -j ./out
///
/// # Smaller test run
/// vn_news_crawler --vnexpress-limit 3 --otofun-limit 2
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the aggregated JSON export (written as
    /// all_news.json); skipped when absent
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Override the per-category item limit for VnExpress
    #[arg(long)]
    pub vnexpress_limit: Option<usize>,

    /// Override the per-category item limit for Otofun
    #[arg(long)]
    pub otofun_limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["vn_news_crawler"]);
        assert!(cli.json_output_dir.is_none());
        assert!(cli.vnexpress_limit.is_none());
        assert!(cli.otofun_limit.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "vn_news_crawler",
            "-j",
            "./out",
            "--vnexpress-limit",
            "3",
            "--otofun-limit",
            "2",
        ]);
        assert_eq!(cli.json_output_dir.as_deref(), Some("./out"));
        assert_eq!(cli.vnexpress_limit, Some(3));
        assert_eq!(cli.otofun_limit, Some(2));
    }
}
