//! Sitemap feed model.
//!
//! Holds a deduplicated, insertion-ordered collection of URL entries and
//! renders it as a sitemap document through [`XmlBuilder`].
//!
//! # Document format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <modified>2025-01-01T00:00:00+00:00</modified>
//!   </url>
//! </urlset>
//! ```
//!
//! Lifecycle: construct once per request, feed it via [`FeedModel::load_urls`]
//! and [`FeedModel::set_url`], apply the operator settings, then consume it
//! with [`FeedModel::render`].

use crate::{
    config::SitemapSettings,
    content::ContentSource,
    debug, log,
    utils::{date::DateTime, escape::escape, url},
    xml::{Attrs, XmlBuilder},
};
use anyhow::Result;
use regex::RegexBuilder;
use rustc_hash::FxHashMap;

/// Namespace of the produced document root.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// MIME type the document should be served with.
pub const CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// One URL's complete record in the feed. All fields are escaped for
/// embedding at insertion time.
#[derive(Debug, Clone)]
pub struct UrlEntry {
    pub loc: String,
    pub modified: Option<String>,
    /// Extra named metadata fields, rendered after `loc`/`modified` in
    /// insertion order.
    pub extra: Vec<(String, String)>,
}

/// Deduplicated URL collection that renders itself as a sitemap document.
///
/// Entries are keyed by the raw URL string. Re-inserting an existing key
/// replaces the entry in place: the second write's fields win but the
/// original position is kept.
pub struct FeedModel {
    body: XmlBuilder,
    entries: Vec<(String, UrlEntry)>,
    index: FxHashMap<String, usize>,
    home_url: String,
}

impl FeedModel {
    /// Create a feed for the given site home URL.
    ///
    /// The prolog and the `urlset` root are emitted immediately, so the
    /// builder's stack already holds the root before any URL is added. The
    /// home URL is normalized with a trailing slash for callers needing a
    /// base reference; it is not otherwise consumed here.
    pub fn new(home_url: &str) -> Self {
        let mut body = XmlBuilder::new();
        body.init("1.0", "UTF-8");
        body.open("urlset", &Attrs::new().set("xmlns", SITEMAP_NS));

        let home_url = match url::normalize(home_url) {
            Ok(normalized) => normalized,
            Err(err) => {
                debug!("sitemap"; "home URL {home_url} did not normalize: {err}");
                home_url.trim().to_owned()
            }
        };

        Self {
            body,
            entries: Vec::new(),
            index: FxHashMap::default(),
            home_url: url::ensure_trailing_slash(&home_url),
        }
    }

    /// The normalized site home URL, trailing slash enforced.
    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add or replace a URL entry.
    ///
    /// `url` is normalized into a safe absolute reference and escaped;
    /// `modified` (when non-empty) and every extra value are escaped as
    /// text. URLs that do not normalize are skipped.
    pub fn set_url(&mut self, url: &str, modified: &str, extra: &[(&str, &str)]) {
        let loc = match url::normalize(url) {
            Ok(normalized) => normalized,
            Err(err) => {
                debug!("sitemap"; "skipping unparseable URL {url}: {err}");
                return;
            }
        };

        let entry = UrlEntry {
            loc: escape(&loc).into_owned(),
            modified: if modified.is_empty() {
                None
            } else {
                Some(escape(modified).into_owned())
            },
            extra: extra
                .iter()
                .map(|(name, value)| ((*name).to_owned(), escape(value).into_owned()))
                .collect(),
        };

        match self.index.get(url) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.index.insert(url.to_owned(), self.entries.len());
                self.entries.push((url.to_owned(), entry));
            }
        }
    }

    /// Shorthand for a bare URL with no modification date.
    pub fn include_url(&mut self, url: &str) {
        self.set_url(url, "", &[]);
    }

    /// Load every URL derivable from the publishable content records:
    /// taxonomy term links and the author profile link without a timestamp,
    /// the item itself with its last-modified timestamp (ISO-8601 with
    /// offset). Timestamps that do not parse are dropped, not fatal.
    pub fn load_urls(&mut self, source: &dyn ContentSource) -> Result<()> {
        for record in source.publishable()? {
            for term in &record.terms {
                self.include_url(term);
            }

            if let Some(author) = &record.author {
                self.include_url(author);
            }

            let modified = record
                .modified
                .as_deref()
                .and_then(DateTime::parse)
                .map(|dt| dt.to_iso8601())
                .unwrap_or_default();
            self.set_url(&record.permalink, &modified, &[]);
        }
        Ok(())
    }

    /// Remove every entry whose URL matches `pattern` (trimmed, compiled
    /// case-insensitively). Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns the compile error for an invalid pattern; no entries are
    /// removed in that case.
    pub fn filter_out(&mut self, pattern: &str) -> Result<usize, regex::Error> {
        let re = RegexBuilder::new(pattern.trim())
            .case_insensitive(true)
            .build()?;

        let before = self.entries.len();
        self.entries.retain(|(key, _)| !re.is_match(key));
        let removed = before - self.entries.len();

        if removed > 0 {
            self.index.clear();
            for (pos, (key, _)) in self.entries.iter().enumerate() {
                self.index.insert(key.clone(), pos);
            }
        }

        Ok(removed)
    }

    /// Apply operator settings: add the include list, then run every
    /// exclusion pattern. An invalid pattern is skipped with a warning
    /// rather than failing the whole feed.
    pub fn apply_settings(&mut self, settings: &SitemapSettings) {
        for include in settings.include_urls() {
            self.include_url(include);
        }

        for pattern in settings.exclude_patterns() {
            match self.filter_out(pattern) {
                Ok(removed) => {
                    debug!("sitemap"; "pattern {pattern} excluded {removed} URLs");
                }
                Err(err) => {
                    log!("warning"; "skipping invalid exclude pattern {pattern}: {err}");
                }
            }
        }
    }

    /// Render the complete document, prolog included, consuming the feed.
    ///
    /// Per entry: a `url` element containing `loc` first, `modified` when
    /// present, then the extra fields in insertion order.
    pub fn render(mut self) -> String {
        for (_, entry) in &self.entries {
            self.body.open("url", &Attrs::new());
            self.body.element("loc", &entry.loc);

            if let Some(modified) = &entry.modified {
                self.body.element("modified", modified);
            }

            for (name, value) in &entry.extra {
                self.body.element(name, value);
            }

            self.body.close(1);
        }

        self.body.close_all();
        self.body.take_output()
    }
}

// ============================================================================
// Tests
// ============================================================================
