//! Syllables command: heuristic syllable counts per word.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use lexometer_core::word_syllables;

/// Arguments for the `syllables` subcommand.
#[derive(Args, Debug)]
pub struct SyllablesArgs {
    /// Words (or phrases) to count; each is preprocessed first.
    #[arg(required = true)]
    pub words: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct WordCount {
    word: String,
    syllables: usize,
}

fn word_counts(inputs: &[String]) -> Vec<WordCount> {
    inputs
        .iter()
        .map(String::as_str)
        .flat_map(word_syllables)
        .map(|(word, syllables)| WordCount { word, syllables })
        .collect()
}

/// Print the syllable count of every word.
#[instrument(name = "cmd_syllables", skip_all, fields(inputs = args.words.len()))]
pub fn cmd_syllables(args: SyllablesArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(inputs = args.words.len(), "executing syllables command");

    let counts = word_counts(&args.words);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        let width = counts.iter().map(|c| c.word.len()).max().unwrap_or(0);
        for count in &counts {
            println!("{:<width$}  {}", count.word, count.syllables.cyan());
        }
    }

    Ok(())
}
