//! Company directory loading
//!
//! The directory is a markdown file with `[Name](URL)` links. Only links
//! whose URL contains both the forum and the site marker are companies.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::config::DirectoryConfig;
use crate::error::Result;
use crate::models::Company;

lazy_static! {
    static ref MARKDOWN_LINK: Regex =
        Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid markdown link regex");
}

/// Extract companies from markdown text
///
/// A name listed twice keeps its first position and takes the last URL.
pub fn parse_companies(markdown: &str, markers: &DirectoryConfig) -> Vec<Company> {
    let mut companies: Vec<Company> = Vec::new();

    for caps in MARKDOWN_LINK.captures_iter(markdown) {
        let name = caps[1].trim();
        let url = caps[2].trim();

        if !url.contains(&markers.forum_marker) || !url.contains(&markers.site_marker) {
            continue;
        }

        match companies.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.forum_url = url.to_string(),
            None => companies.push(Company::new(name, url)),
        }
    }

    companies
}

/// Load companies from a markdown file
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read.
pub fn load_companies(path: &Path, markers: &DirectoryConfig) -> Result<Vec<Company>> {
    let content = std::fs::read_to_string(path)?;
    let companies = parse_companies(&content, markers);

    tracing::info!(
        path = %path.display(),
        companies = companies.len(),
        "Loaded company directory"
    );

    Ok(companies)
}
