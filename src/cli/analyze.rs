//! CLI entry-point analysing local files without starting the server.

use std::{io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use serde_json::json;
use tracing::instrument;

use crate::{
    config::Settings,
    encoder,
    nlp::TextRecord,
    processor::{ProcessOptions, TextProcessor, DEFAULT_LANGUAGE, DEFAULT_MODEL, KEYWORDS_DEFAULT},
};

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Files to analyse, one text per file; stdin when omitted.
    pub files: Vec<PathBuf>,
    /// Pipeline model.
    #[arg(long, default_value_t = DEFAULT_MODEL.to_string())]
    pub model: String,
    /// Keyword model; defaults by language.
    #[arg(long)]
    pub keyword_model: Option<String>,
    /// Keywords per text.
    #[arg(long, default_value_t = KEYWORDS_DEFAULT)]
    pub keywords: usize,
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let texts = read_texts(&args.files)?;
    let options = ProcessOptions {
        model: args.model,
        keyword_model: args.keyword_model,
        top_n: args.keywords,
        language: args.language,
    };

    let processor = TextProcessor::with_device(settings.device);
    match processor.process(texts, &options).await {
        Ok(results) => {
            println!("{}", serde_json::to_string_pretty(&encoder::encode(&results))?);
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&json!({ "error": err.to_string() }))?);
            bail!("analysis failed: {err}")
        }
    }
}

fn read_texts(files: &[PathBuf]) -> Result<Vec<TextRecord>> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(vec![TextRecord::new(text)]);
    }
    files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(TextRecord::with_id(text, path.display().to_string().into()))
        })
        .collect()
}
