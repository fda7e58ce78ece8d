use std::path::PathBuf;

use clap::Args;
use pemutil::{BlockKind, Primitive, Store};
use serde::Serialize;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::load_store;

#[derive(Args)]
pub(crate) struct Config {
    /// PEM files to load. If not specified, reads from stdin
    pub(crate) files: Vec<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub(crate) output: OutputFormat,
}

/// Summary of one store entry
#[derive(Debug, Serialize)]
struct Entry {
    kind: &'static str,
    primitive: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
}

impl Entry {
    fn new(kind: BlockKind, primitive: &Primitive) -> Self {
        Entry {
            kind: kind.label(),
            primitive: primitive.name(),
            algorithm: primitive.algorithm().map(|a| a.to_string()),
            size: primitive.key_size(),
            subject: primitive
                .as_certificate()
                .map(|cert| cert.tbs_certificate.subject.to_string()),
        }
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.primitive)?;
        if let Some(algorithm) = &self.algorithm {
            write!(f, ", {}", algorithm)?;
        }
        if let Some(size) = self.size {
            write!(f, ", {} bits", size)?;
        }
        if let Some(subject) = &self.subject {
            write!(f, ", subject {}", subject)?;
        }
        Ok(())
    }
}

fn entries(store: &Store) -> Vec<Entry> {
    store
        .iter()
        .map(|(kind, primitive)| Entry::new(kind, primitive))
        .collect()
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let store = load_store(&config.files)?;
    let entries = entries(&store);

    match config.output {
        OutputFormat::Text => {
            for entry in &entries {
                println!("{}", entry);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
