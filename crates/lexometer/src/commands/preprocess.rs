//! Preprocess command: show normalized text.

use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `preprocess` subcommand.
#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Text to normalize.
    pub text: String,
}

#[derive(Serialize)]
struct PreprocessOutput<'a> {
    original: &'a str,
    preprocessed: String,
    words: usize,
}

/// Print the preprocessed form of the text.
#[instrument(name = "cmd_preprocess", skip_all, fields(text_len = args.text.len()))]
pub fn cmd_preprocess(args: PreprocessArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(text_len = args.text.len(), "executing preprocess command");

    let preprocessed = lexometer_core::preprocess(&args.text);

    if global_json {
        let output = PreprocessOutput {
            original: &args.text,
            words: lexometer_core::text::count_words(&preprocessed),
            preprocessed,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{preprocessed}");
    }

    Ok(())
}
