//! Multi-page thread crawling
//!
//! The first page is always fetched. Further pages are discovered from its
//! pagination links and fetched in ascending page order until either the
//! page cap or the post cap is reached.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ThreadConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::stats::CrawlStats;
use crate::models::{ThreadRef, ThreadText};
use crate::parser::pagination::{discover_pages, PageLink};
use crate::parser::posts::PostExtractor;
use crate::utils::truncate_chars;

/// Posts of one thread, deduplicated across its pages
struct PostAccumulator {
    seen: HashSet<String>,
    posts: Vec<String>,
    cap: usize,
}

impl PostAccumulator {
    fn new(cap: usize) -> Self {
        Self {
            seen: HashSet::new(),
            posts: Vec::new(),
            cap,
        }
    }

    fn is_full(&self) -> bool {
        self.posts.len() >= self.cap
    }

    fn extend(&mut self, posts: Vec<String>) {
        for post in posts {
            if self.is_full() {
                break;
            }
            if self.seen.insert(post.clone()) {
                self.posts.push(post);
            }
        }
    }
}

/// Crawls a single forum thread into scoring text
pub struct ThreadCrawler {
    fetcher: Arc<dyn PageFetcher>,
    extractor: PostExtractor,
    max_pages: usize,
    max_posts: usize,
    max_text_chars: usize,
    page_delay: Duration,
    stats: Arc<CrawlStats>,
}

impl ThreadCrawler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        limits: &ThreadConfig,
        page_delay: Duration,
        stats: Arc<CrawlStats>,
    ) -> Self {
        Self {
            fetcher,
            extractor: PostExtractor::new(limits.min_post_chars),
            max_pages: limits.max_pages.max(1),
            max_posts: limits.max_posts,
            max_text_chars: limits.max_text_chars,
            page_delay,
            stats,
        }
    }

    /// Crawl a thread and build its text
    ///
    /// Never fails: if the first page cannot be fetched the result holds the
    /// title alone and is flagged as degraded.
    pub async fn crawl(&self, thread: &ThreadRef) -> ThreadText {
        let first_page = match self.fetcher.fetch(&thread.url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(
                    url = %thread.url,
                    title = %thread.title,
                    error = %e,
                    "First page unavailable, scoring title only"
                );
                self.stats.record_thread(true);
                return ThreadText::title_only(&thread.title, self.max_text_chars);
            }
        };

        let mut posts = PostAccumulator::new(self.max_posts);
        posts.extend(self.extractor.extract(&first_page));
        let mut pages_fetched = 1;

        if !posts.is_full() && self.max_pages > 1 {
            for page in self.further_pages(&first_page, &thread.url) {
                if posts.is_full() {
                    tracing::debug!(url = %thread.url, posts = posts.posts.len(), "Post cap reached");
                    break;
                }

                match self.fetcher.fetch(&page.url).await {
                    Ok(html) => {
                        pages_fetched += 1;
                        posts.extend(self.extractor.extract(&html));
                        tokio::time::sleep(self.page_delay).await;
                    }
                    Err(e) => {
                        tracing::debug!(url = %page.url, page = page.index, error = %e, "Skipping thread page");
                    }
                }
            }
        }

        self.stats.record_thread(false);

        let joined = format!("{} {}", thread.title, posts.posts.join(" "));
        ThreadText {
            text: truncate_chars(joined.trim(), self.max_text_chars),
            pages_fetched,
            post_count: posts.posts.len(),
            degraded: false,
        }
    }

    /// Pagination links of the first page; discovery problems fall back to a single page
    fn further_pages(&self, html: &str, thread_url: &str) -> Vec<PageLink> {
        match discover_pages(html, thread_url, self.max_pages) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::debug!(url = %thread_url, error = %e, "Pagination discovery failed");
                Vec::new()
            }
        }
    }
}
