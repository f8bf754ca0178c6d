//! Stats command: per-document readability statistics.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lexometer_core::config::Config;
use lexometer_core::statistics::{Cell, FeatureTable, compute_statistics_with};
use lexometer_core::{Batch, BatchFormat};

use super::read_input_file;

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// How the file is split into documents [default: json for .json files, else lines]
    #[arg(long, value_enum)]
    pub format: Option<BatchFormat>,

    /// Syllable thresholds for polysyllable columns (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "N,..")]
    pub polysyllables: Option<Vec<u32>>,

    /// Character-length thresholds for long-word columns (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "N,..")]
    pub long_words: Option<Vec<u32>>,

    /// Add num_char, ARI, Coleman-Liau, Gunning fog, SMOG, and Linsear Write columns
    #[arg(long)]
    pub extended: bool,

    /// Evaluate documents on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Decimal places for scores in table output
    #[arg(long, default_value_t = 3)]
    pub precision: usize,
}

impl StatsArgs {
    /// Format from the flag, the file extension, the config, then the default.
    fn batch_format(&self, config: &Config) -> BatchFormat {
        self.format
            .or_else(|| (self.file.extension() == Some("json")).then_some(BatchFormat::Json))
            .or(config.input_format)
            .unwrap_or_default()
    }

    /// The loaded config with command-line overrides applied.
    fn effective_config(&self, config: &Config) -> Config {
        let mut effective = config.clone();
        if let Some(ref thresholds) = self.polysyllables {
            effective.polysyllable_thresholds.clone_from(thresholds);
        }
        if let Some(ref thresholds) = self.long_words {
            effective.long_word_thresholds.clone_from(thresholds);
        }
        effective.extended_scores |= self.extended;
        if self.sequential {
            effective.parallel = false;
        }
        effective
    }
}

/// Compute statistics for every document in a file.
#[instrument(name = "cmd_stats", skip_all, fields(file = %args.file))]
pub fn cmd_stats(
    args: StatsArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let format = args.batch_format(config);
    debug!(file = %args.file, %format, "executing stats command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let batch = Batch::parse(&content, format)
        .with_context(|| format!("failed to read documents from {}", args.file))?;
    let stats_config = args
        .effective_config(config)
        .statistics_config()
        .context("invalid statistics configuration")?;

    let progress = if quiet || global_json {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(batch.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} documents")?
                .progress_chars("█▓▒░  "),
        );
        bar
    };
    let table = compute_statistics_with(&batch, &stats_config, || progress.inc(1));
    progress.finish_and_clear();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else if table.is_empty() {
        println!("{}", "no documents".yellow());
    } else {
        let mut lines = render_table(&table, args.precision).into_iter();
        if let Some(header) = lines.next() {
            println!("{}", header.bold());
        }
        for line in lines {
            println!("{line}");
        }
    }

    Ok(())
}

/// Render `table` as right-aligned text columns, header first.
///
/// Undefined scores print as `NaN`.
fn render_table(table: &FeatureTable, precision: usize) -> Vec<String> {
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(table.len() + 1);
    grid.push(
        std::iter::once("doc".to_string())
            .chain(table.columns().iter().cloned())
            .collect(),
    );
    for (index, row) in table.rows().iter().enumerate() {
        grid.push(
            std::iter::once(index.to_string())
                .chain(row.cells().into_iter().map(|(_, cell)| match cell {
                    Cell::Count(n) => n.to_string(),
                    Cell::Score(score) => format!("{score:.precision$}"),
                }))
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..grid[0].len())
        .map(|col| grid.iter().map(|r| r[col].len()).max().unwrap_or(0))
        .collect();

    grid.iter()
        .map(|r| {
            r.iter()
                .zip(&widths)
                .map(|(value, &width)| format!("{value:>width$}"))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexometer_core::{StatisticsConfig, compute_statistics};

    fn args(file: &str) -> StatsArgs {
        StatsArgs {
            file: Utf8PathBuf::from(file),
            format: None,
            polysyllables: None,
            long_words: None,
            extended: false,
            sequential: false,
            precision: 3,
        }
    }

    #[test]
    fn json_extension_selects_json_format() {
        let config = Config::default();
        assert_eq!(args("docs.json").batch_format(&config), BatchFormat::Json);
        assert_eq!(args("docs.txt").batch_format(&config), BatchFormat::Lines);
    }

    #[test]
    fn flag_beats_config_beats_default() {
        let config = Config {
            input_format: Some(BatchFormat::Paragraphs),
            ..Config::default()
        };
        assert_eq!(
            args("docs.txt").batch_format(&config),
            BatchFormat::Paragraphs
        );
        let mut a = args("docs.json");
        a.format = Some(BatchFormat::Whole);
        assert_eq!(a.batch_format(&config), BatchFormat::Whole);
    }

    #[test]
    fn overrides_apply_to_config() {
        let mut a = args("docs.txt");
        a.polysyllables = Some(vec![4]);
        a.extended = true;
        a.sequential = true;
        let effective = a.effective_config(&Config::default());
        assert_eq!(effective.polysyllable_thresholds, [4]);
        assert_eq!(effective.long_word_thresholds, [3, 5, 8, 10, 15]);
        assert!(effective.extended_scores);
        assert!(!effective.parallel);
    }

    #[test]
    fn table_shows_nan_for_undefined() {
        let batch: Batch = ["homomorphism", "Short one."].into_iter().collect();
        let table = compute_statistics(&batch, &StatisticsConfig::default());
        let lines = render_table(&table, 3);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("flesch_reading_ease"));
        assert!(lines[1].contains("NaN"));
        assert!(!lines[2].contains("NaN"));
        // Every line is padded to the same width.
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn table_honors_precision() {
        let batch: Batch = ["This is test-sentence number 1 with a comma ,."]
            .into_iter()
            .collect();
        let table = compute_statistics(&batch, &StatisticsConfig::default());
        assert!(render_table(&table, 3)[1].contains("71.815"));
        assert!(render_table(&table, 1)[1].contains("71.8"));
    }
}
