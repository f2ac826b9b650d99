//! Page-level types.

use super::Fragment;
use serde::{Deserialize, Serialize};

/// A single page as delivered by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Fragments in reading order
    pub fragments: Vec<Fragment>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Append a fragment, stamping it with this page's number.
    pub fn push(&mut self, mut fragment: Fragment) {
        fragment.page = self.number;
        self.fragments.push(fragment);
    }

    /// Builder form of [`Page::push`].
    pub fn with(mut self, fragment: Fragment) -> Self {
        self.push(fragment);
        self
    }

    /// Check if the page has no visible text.
    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(Fragment::is_blank)
    }

    /// Number of fragments on the page.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}
