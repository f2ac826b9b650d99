//! PDF fragment extraction using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::{pdf_version_from_bytes, pdf_version_from_path};
use crate::error::{Error, Result};
use crate::model::Page;

use super::content::{extract_fragments, get_number, PageFonts};
use super::options::ParseOptions;
use super::source::FragmentSource;

/// US Letter height, used when a page has no MediaBox.
const DEFAULT_PAGE_TOP: f32 = 792.0;

const MAX_TREE_DEPTH: usize = 32;

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        pdf_version_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        log::debug!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());
        Ok(Self { doc, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        pdf_version_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Extract one page's fragments.
    fn parse_page(&self, page_num: u32, page_id: ObjectId) -> Result<Page> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::InputUnreadable(format!("Page {}: {}", page_num, e)))?;
        let fonts = PageFonts::new(&self.doc, fonts);

        let content = self.get_page_content(page_id)?;
        let page_top = self.page_top(page_id);
        let fragments = extract_fragments(&content, &fonts, page_num, page_top)?;

        let mut page = Page::new(page_num);
        for fragment in fragments {
            page.push(fragment);
        }
        log::debug!("Page {}: {} fragments", page_num, page.fragment_count());
        Ok(page)
    }

    /// Get the concatenated, decompressed content streams of a page.
    fn get_page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content is blank, not broken.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => self.stream_content(*r),
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        content.extend_from_slice(&self.stream_content(*r)?);
                        content.push(b' ');
                    }
                }
                Ok(content)
            }
            _ => Err(Error::InputUnreadable("Invalid content stream".to_string())),
        }
    }

    fn stream_content(&self, id: ObjectId) -> Result<Vec<u8>> {
        match self.doc.get_object(id)? {
            Object::Stream(s) => match s.decompressed_content() {
                Ok(data) => Ok(data),
                // Unfiltered streams report an error from decompression.
                Err(_) if s.dict.get(b"Filter").is_err() => Ok(s.content.clone()),
                Err(e) => Err(e.into()),
            },
            _ => Err(Error::InputUnreadable("Invalid content stream".to_string())),
        }
    }

    /// Upper edge of the page's MediaBox, looking through inherited
    /// attributes of parent page-tree nodes.
    fn page_top(&self, page_id: ObjectId) -> f32 {
        let mut node = self.doc.get_dictionary(page_id).ok();
        // Bounded walk; malformed trees may loop.
        for _ in 0..MAX_TREE_DEPTH {
            let Some(dict) = node else {
                break;
            };
            if let Ok(array) = dict.get(b"MediaBox").and_then(Object::as_array) {
                if let Some(top) = array.get(3).and_then(get_number) {
                    return top;
                }
            }
            node = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|id| self.doc.get_dictionary(id))
                .ok();
        }
        DEFAULT_PAGE_TOP
    }
}

impl FragmentSource for PdfParser {
    fn pages(&self) -> Result<Vec<Page>> {
        let page_ids = self.doc.get_pages();
        let mut pages = Vec::with_capacity(page_ids.len());

        for (page_num, page_id) in page_ids {
            match self.parse_page(page_num, page_id) {
                Ok(page) => pages.push(page),
                Err(e) if self.options.is_lenient() => {
                    log::warn!("Skipping page {}: {}", page_num, e);
                    pages.push(Page::new(page_num));
                }
                Err(e) => return Err(e),
            }
        }

        log::info!("Extracted {} pages", pages.len());
        Ok(pages)
    }
}
