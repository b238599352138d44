//! CLI entry-point listing the model registry.

use anyhow::Result;
use clap::Args as ClapArgs;

use crate::nlp::{KeywordModelName, ModelName};

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// List keyword-extraction models instead of pipelines.
    #[arg(long)]
    pub keyword: bool,
}

pub async fn run(args: Args) -> Result<()> {
    if args.keyword {
        for model in KeywordModelName::ALL {
            println!("{model}");
        }
    } else {
        for model in ModelName::ALL {
            println!("{:<20} {}", model.as_str(), model.language());
        }
    }
    Ok(())
}
