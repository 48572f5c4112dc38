/// Result of merging entries into the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddStats {
    pub added: usize,
    /// Valid entries that were already queued (or repeated within the batch).
    pub skipped: usize,
}

/// Naive URL check: scheme-prefixed or containing a dot.
pub fn is_url_like(candidate: &str) -> bool {
    candidate.starts_with("http://") || candidate.starts_with("https://") || candidate.contains('.')
}

/// Splits pasted text on newlines and commas, trims every piece and keeps
/// the URL-like ones in input order. Duplicates are left for the queue to
/// resolve.
pub fn parse_url_input(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|piece| !piece.is_empty() && is_url_like(piece))
        .map(ToOwned::to_owned)
        .collect()
}

/// Insertion-ordered set of target URLs. Entries are compared verbatim, so
/// `https://a.com` and `https://a.com/` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlQueue {
    urls: Vec<String>,
}

impl UrlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses raw pasted text and merges the surviving entries.
    pub fn add(&mut self, raw: &str) -> AddStats {
        self.merge(parse_url_input(raw))
    }

    /// Merges a batch of already separated URLs, applying the same trimming
    /// and validation as [`UrlQueue::add`].
    pub fn add_all<I, S>(&mut self, urls: I) -> AddStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = urls
            .into_iter()
            .map(|url| url.as_ref().trim().to_string())
            .filter(|url| !url.is_empty() && is_url_like(url))
            .collect();
        self.merge(entries)
    }

    fn merge(&mut self, entries: Vec<String>) -> AddStats {
        let mut stats = AddStats::default();
        for entry in entries {
            if self.contains(&entry) {
                stats.skipped += 1;
            } else {
                self.urls.push(entry);
                stats.added += 1;
            }
        }
        stats
    }

    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.urls.len();
        self.urls.retain(|u| u != url);
        self.urls.len() != before
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
