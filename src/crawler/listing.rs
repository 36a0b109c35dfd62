//! Company listing crawl

use std::sync::Arc;

use crate::crawler::fetcher::PageFetcher;
use crate::models::{Company, ThreadRef};
use crate::parser::listing::{parse_listing, RecencyFilter};
use crate::utils::error::CrawlerError;

/// Fetches a company's forum page and returns its recent threads
pub struct ListingCrawler {
    fetcher: Arc<dyn PageFetcher>,
}

impl ListingCrawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Threads of `company` that pass the recency filter, in listing order
    ///
    /// # Errors
    ///
    /// `ListingUnavailable` when the page cannot be fetched, `Parse` when
    /// it has no thread table.
    pub async fn recent_threads(
        &self,
        company: &Company,
        filter: &RecencyFilter,
    ) -> Result<Vec<ThreadRef>, CrawlerError> {
        let html = self
            .fetcher
            .fetch(&company.forum_url)
            .await
            .map_err(|source| CrawlerError::ListingUnavailable {
                company: company.name.clone(),
                source,
            })?;

        let rows = parse_listing(&html, &company.forum_url)?;
        let listed = rows.len();
        let threads = filter.apply(rows);

        tracing::debug!(
            company = %company.name,
            listed,
            recent = threads.len(),
            cutoff = %filter.cutoff,
            "Parsed listing page"
        );

        Ok(threads)
    }
}
