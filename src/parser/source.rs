//! The extractor seam.

use crate::error::Result;
use crate::model::Page;

/// Anything that can deliver a document's pages of positioned fragments.
///
/// The structure pipeline needs every page before it can classify a single
/// line, so sources hand over the whole document at once.
pub trait FragmentSource {
    /// All pages in document order.
    fn pages(&self) -> Result<Vec<Page>>;
}

impl FragmentSource for Vec<Page> {
    fn pages(&self) -> Result<Vec<Page>> {
        Ok(self.clone())
    }
}

impl FragmentSource for [Page] {
    fn pages(&self) -> Result<Vec<Page>> {
        Ok(self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fragment;

    #[test]
    fn test_in_memory_source() {
        let pages = vec![Page::new(1).with(Fragment::new("Hello", 11.0, 0, 10.0))];
        let out = pages.pages().unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].fragments[0].page, 1);

        let slice: &[Page] = &pages;
        assert_eq!(slice.pages().unwrap().len(), 1);
    }
}
