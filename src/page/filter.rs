//! Directory-link filtering.

/// Drops links that look like directories or navigation.
///
/// A link is dropped when it starts or ends with `/`. With
/// `skip_query_links`, links starting with `?` (column-sort links on
/// server-generated listings) are dropped too. Order and duplicates of
/// the kept links are preserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkFilter {
    /// Also drop links beginning with `?`.
    pub skip_query_links: bool,
}

impl LinkFilter {
    /// Returns true if `link` should be kept.
    #[must_use]
    pub fn keeps(&self, link: &str) -> bool {
        if link.starts_with('/') || link.ends_with('/') {
            return false;
        }
        !(self.skip_query_links && link.starts_with('?'))
    }

    /// Applies the filter, preserving order.
    #[must_use]
    pub fn apply(&self, links: Vec<String>) -> Vec<String> {
        links.into_iter().filter(|link| self.keeps(link)).collect()
    }
}

/// Removes directory links (starting or ending with `/`).
#[must_use]
pub fn filter_files(links: Vec<String>) -> Vec<String> {
    LinkFilter::default().apply(links)
}
