//! Content stream walking.
//!
//! Interprets the text operators of a page's content stream and produces
//! positioned [`Fragment`]s in reading order.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};
use crate::model::Fragment;

/// TJ adjustments (thousandths of text space) wider than this become a space.
const SPACE_THRESHOLD: f32 = 200.0;

/// Leading used by T* when the stream never sets TL.
const DEFAULT_LEADING_RATIO: f32 = 1.2;

/// Fonts of one page, keyed by resource name.
pub struct PageFonts<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
}

impl<'a> PageFonts<'a> {
    /// Wrap the font dictionaries returned by lopdf for a page.
    pub fn new(doc: &'a LopdfDocument, fonts: BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self { doc, fonts }
    }

    /// Base font name (e.g. "Helvetica-Bold") of a resource name.
    fn base_font(&self, resource: &[u8]) -> String {
        self.fonts
            .get(resource)
            .and_then(|font| font.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| String::from_utf8_lossy(resource).to_string())
    }

    /// Decode a string operand through the font's encoding.
    fn decode(&self, resource: &[u8], bytes: &[u8]) -> String {
        let decoded = self
            .fonts
            .get(resource)
            .and_then(|font| font.get_font_encoding(self.doc).ok())
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .unwrap_or_default();
        if decoded.is_empty() {
            decode_text_simple(bytes)
        } else {
            decoded
        }
    }
}

/// An affine transform `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let n: Vec<f32> = operands[..6].iter().filter_map(get_number).collect();
        if n.len() < 6 {
            return None;
        }
        Some(Self {
            a: n[0],
            b: n[1],
            c: n[2],
            d: n[3],
            e: n[4],
            f: n[5],
        })
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self × other`
    fn then(&self, other: &Matrix) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// A shown string before reading-order sorting.
#[derive(Debug, Clone)]
struct Span {
    text: String,
    x: f32,
    y: f32,
    font_size: f32,
    font_name: String,
    /// No positioning operator since the previous span
    continues: bool,
}

impl Span {
    fn into_fragment(self, page: u32) -> Fragment {
        let name = self.font_name.to_lowercase();
        let mut fragment = Fragment::new(self.text, self.font_size, page, self.y);
        if name.contains("bold") || name.contains("black") || name.contains("heavy") {
            fragment = fragment.bold();
        }
        if name.contains("italic") || name.contains("oblique") {
            fragment = fragment.italic();
        }
        fragment
    }
}

/// Text state tracked while walking a content stream.
struct TextState {
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: Option<f32>,
    in_text: bool,
    positioned: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: None,
            in_text: false,
            positioned: true,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
        self.positioned = true;
    }

    fn next_line(&mut self) {
        let leading = self
            .leading
            .unwrap_or(self.font_size * DEFAULT_LEADING_RATIO);
        self.move_line(0.0, -leading);
    }

    fn span(&mut self, text: String, page_top: f32) -> Span {
        let render = self.text_matrix.then(&self.ctm);
        let continues = !self.positioned;
        self.positioned = false;
        Span {
            text,
            x: render.e,
            y: page_top - render.f,
            font_size: self.font_size * render.vertical_scale(),
            font_name: self.font_name.clone(),
            continues,
        }
    }
}

/// Walk a decoded content stream and return the page's fragments in
/// top-to-bottom, left-to-right order.
///
/// `page_top` is the upper edge of the MediaBox; fragment y positions are
/// distances below it.
pub fn extract_fragments(
    content: &[u8],
    fonts: &PageFonts<'_>,
    page: u32,
    page_top: f32,
) -> Result<Vec<Fragment>> {
    let content = Content::decode(content)
        .map_err(|e| Error::InputUnreadable(format!("Page {}: {}", page, e)))?;

    let mut state = TextState::default();
    let mut spans: Vec<Span> = Vec::new();

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => state.ctm_stack.push(state.ctm),
            "Q" => {
                if let Some(ctm) = state.ctm_stack.pop() {
                    state.ctm = ctm;
                }
                state.positioned = true;
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    state.ctm = m.then(&state.ctm);
                }
                state.positioned = true;
            }
            "BT" => {
                state.in_text = true;
                state.text_matrix = Matrix::IDENTITY;
                state.line_matrix = Matrix::IDENTITY;
                state.positioned = true;
            }
            "ET" => state.in_text = false,
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    state.font_name = fonts.base_font(name);
                    state.font_resource = name.clone();
                }
                if let Some(size) = operands.get(1).and_then(get_number) {
                    state.font_size = size;
                }
            }
            "TL" => state.leading = operands.first().and_then(get_number),
            "Td" | "TD" => {
                let tx = operands.first().and_then(get_number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(get_number).unwrap_or(0.0);
                if op.operator == "TD" {
                    state.leading = Some(-ty);
                }
                state.move_line(tx, ty);
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    state.line_matrix = m;
                    state.text_matrix = m;
                    state.positioned = true;
                }
            }
            "T*" => state.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = fonts.decode(&state.font_resource, bytes);
                    push_span(&mut spans, &mut state, text, page_top);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = decode_tj(items, fonts, &state.font_resource);
                    push_span(&mut spans, &mut state, text, page_top);
                }
            }
            "'" | "\"" => {
                state.next_line();
                let idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(idx) {
                    let text = fonts.decode(&state.font_resource, bytes);
                    push_span(&mut spans, &mut state, text, page_top);
                }
            }
            _ => {}
        }
    }

    let spans = coalesce(spans);
    Ok(reading_order(spans)
        .into_iter()
        .map(|span| span.into_fragment(page))
        .collect())
}

fn push_span(spans: &mut Vec<Span>, state: &mut TextState, text: String, page_top: f32) {
    if !state.in_text || text.is_empty() {
        return;
    }
    spans.push(state.span(text, page_top));
}

/// Decode a TJ array, turning wide negative adjustments into spaces.
fn decode_tj(items: &[Object], fonts: &PageFonts<'_>, resource: &[u8]) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&fonts.decode(resource, bytes)),
            other => {
                let Some(n) = get_number(other) else {
                    continue;
                };
                if -n > SPACE_THRESHOLD
                    && combined
                        .chars()
                        .last()
                        .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c))
                {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

/// Merge spans that follow each other without repositioning in one font.
fn coalesce(spans: Vec<Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(prev)
                if span.continues
                    && prev.font_name == span.font_name
                    && (prev.font_size - span.font_size).abs() < 0.01 =>
            {
                prev.text.push_str(&span.text);
            }
            _ => merged.push(span),
        }
    }
    merged.retain(|s| !s.text.trim().is_empty());
    merged
}

/// Sort spans into rows (top to bottom), each row left to right.
fn reading_order(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

    let mut rows: Vec<Vec<Span>> = Vec::new();
    let mut row_y: Option<f32> = None;
    for span in spans {
        let tolerance = span.font_size * 0.3;
        match (rows.last_mut(), row_y) {
            (Some(row), Some(y)) if (span.y - y).abs() <= tolerance => row.push(span),
            _ => {
                row_y = Some(span.y);
                rows.push(vec![span]);
            }
        }
    }

    rows.into_iter()
        .flat_map(|mut row| {
            row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
            row
        })
        .collect()
}

/// Extract a number from a PDF object.
pub(crate) fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x30FF
        | 0x3000..=0x303F)
}

/// Decoding fallback when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
