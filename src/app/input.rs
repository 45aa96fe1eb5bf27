//! Domain-list input.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads the domain list, one domain per line.
///
/// Blank lines and `#` comments are skipped; surrounding whitespace is
/// trimmed. Passing `-` reads from stdin. Input order is preserved, and
/// duplicate domains are kept; each occurrence is processed independently
/// downstream.
pub async fn read_domain_list(path: &Path) -> Result<Vec<String>> {
    let mut domains = Vec::new();

    if path.as_os_str() == "-" {
        info!("Reading domains from stdin");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read line from stdin")?
        {
            push_domain(&mut domains, &line);
        }
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read line from input file")?
        {
            push_domain(&mut domains, &line);
        }
    }

    Ok(domains)
}

fn push_domain(domains: &mut Vec<String>, line: &str) {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return;
    }
    domains.push(trimmed.to_string());
}
