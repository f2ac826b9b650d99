//! Benchmarks for pdfmark conversion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfmark::{Converter, Fragment, Page};

/// Creates a minimal PDF with one heading and a few body lines per page.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::new();
    let mut offsets = Vec::new();

    content.push_str("%PDF-1.4\n");

    offsets.push(content.len());
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i * 2 + 4)).collect();
    offsets.push(content.len());
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 3 0 R >> >> >>\nendobj\n",
        kids.join(" "),
        page_count
    ));

    offsets.push(content.len());
    content.push_str(
        "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
    );

    let mut next_obj = 4;
    for i in 0..page_count {
        let page_obj = next_obj;
        let content_obj = next_obj + 1;
        next_obj += 2;

        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        let text = format!(
            "BT /F1 18 Tf 72 720 Td (Section {}) Tj /F1 11 Tf 14 TL 0 -30 Td \
             (Benchmark body text that wraps across) Tj T* (several physical lines of) Tj \
             T* (the same paragraph.) Tj 0 -28 Td (- a list item) Tj ET",
            i + 1
        );
        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj,
            text.len(),
            text
        ));
    }

    let xref_offset = content.len();
    content.push_str(&format!("xref\n0 {}\n", next_obj));
    content.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        content.push_str(&format!("{:010} 00000 n \n", offset));
    }
    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        next_obj, xref_offset
    ));

    content.into_bytes()
}

/// Synthetic fragment pages with a running header and footer.
fn create_test_pages(page_count: u32) -> Vec<Page> {
    (1..=page_count)
        .map(|n| {
            let mut page = Page::new(n);
            page.push(Fragment::new("Benchmark Report", 9.0, n, 30.0));
            page.push(Fragment::new(format!("Chapter {}", n), 18.0, n, 60.0).bold());
            for row in 0..30 {
                let text = if row % 10 == 9 {
                    format!("- point {} of the chapter", row)
                } else {
                    format!("Line {} of body text that continues the para-", row)
                };
                page.push(Fragment::new(text, 11.0, n, 90.0 + row as f32 * 14.0));
            }
            page.push(Fragment::new(format!("Page {}", n), 9.0, n, 780.0));
            page
        })
        .collect()
}

/// Benchmark structure inference on in-memory pages.
fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure");
    let converter = Converter::default();

    for page_count in [1, 10, 50] {
        let pages = create_test_pages(page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| converter.convert_pages(black_box(&pages)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full PDF path.
fn bench_pdf_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_conversion");

    for page_count in [1, 5, 10] {
        let data = create_test_pdf(page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = pdfmark::convert_bytes(black_box(&data));
            });
        });
    }

    group.finish();
}

/// Benchmark PDF header detection.
fn bench_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    c.bench_function("detect_version", |b| {
        b.iter(|| pdfmark::pdf_version_from_bytes(black_box(&pdf_data)).unwrap());
    });
}

criterion_group!(benches, bench_structure, bench_pdf_conversion, bench_detection);
criterion_main!(benches);
