//! Test fixture generator for pdf-to-image.
//!
//! This binary writes small PDF documents for manual and integration
//! testing. The files are assembled directly so no PDF library is needed.

use anyhow::{ensure, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// US Letter in points.
const LETTER: (u32, u32) = (612, 792);
/// A4 in points, rounded.
const A4: (u32, u32) = (595, 842);

fn main() -> Result<()> {
    let output_dir = Path::new("tests/fixtures/output");
    fs::create_dir_all(output_dir)?;

    println!("Generating test fixtures...\n");

    generate_simple_pdf(output_dir)?;
    generate_multipage_pdf(output_dir)?;
    generate_mixed_sizes_pdf(output_dir)?;
    generate_landscape_pdf(output_dir)?;
    generate_large_pdf(output_dir)?;

    // Error test files
    generate_corrupt_pdf(output_dir)?;
    generate_truncated_pdf(output_dir)?;

    println!("\nAll fixtures generated successfully!");
    Ok(())
}

/// One page to be written by [`write_pdf`].
struct PageSpec {
    width: u32,
    height: u32,
    /// Content stream drawn on the page.
    content: String,
}

impl PageSpec {
    /// A page with a grey frame and `index + 1` black squares along the top,
    /// so pages are distinguishable after rendering.
    fn numbered(width: u32, height: u32, index: usize) -> Self {
        let mut content = format!(
            "0.6 g 20 20 {} {} re f 1 g 30 30 {} {} re f 0 g",
            width - 40,
            height - 40,
            width - 60,
            height - 60
        );
        for i in 0..=(index % 20) {
            content.push_str(&format!(" {} {} 16 16 re f", 40 + i as u32 * 24, height - 70));
        }
        Self {
            width,
            height,
            content,
        }
    }
}

/// Serialize pages into a minimal PDF 1.4 file with a correct xref table.
fn write_pdf(path: &Path, pages: &[PageSpec]) -> Result<()> {
    ensure!(!pages.is_empty(), "a PDF needs at least one page");

    let mut objects: Vec<String> = Vec::with_capacity(2 + pages.len() * 2);
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 3 + i * 2))
        .collect();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    for (i, page) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R >>",
            page.width,
            page.height,
            4 + i * 2
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            page.content.len(),
            page.content
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!(
        "xref\n0 {}\n0000000000 65535 f \n",
        objects.len() + 1
    ));
    for offset in offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    fs::write(path, out)?;
    Ok(())
}

/// Generate a single letter-size page.
fn generate_simple_pdf(output_dir: &Path) -> Result<()> {
    let path = output_dir.join("simple.pdf");
    println!("  Creating: {}", path.display());
    write_pdf(&path, &[PageSpec::numbered(LETTER.0, LETTER.1, 0)])
}

/// Generate a ten page document for page range tests.
fn generate_multipage_pdf(output_dir: &Path) -> Result<()> {
    let path = output_dir.join("multipage.pdf");
    println!("  Creating: {}", path.display());
    let pages: Vec<PageSpec> = (0..10)
        .map(|i| PageSpec::numbered(LETTER.0, LETTER.1, i))
        .collect();
    write_pdf(&path, &pages)
}

/// Generate pages of different sizes.
fn generate_mixed_sizes_pdf(output_dir: &Path) -> Result<()> {
    let path = output_dir.join("mixed_sizes.pdf");
    println!("  Creating: {}", path.display());
    write_pdf(
        &path,
        &[
            PageSpec::numbered(LETTER.0, LETTER.1, 0),
            PageSpec::numbered(A4.0, A4.1, 1),
            PageSpec::numbered(144, 216, 2),
        ],
    )
}

/// Generate a landscape page.
fn generate_landscape_pdf(output_dir: &Path) -> Result<()> {
    let path = output_dir.join("landscape.pdf");
    println!("  Creating: {}", path.display());
    write_pdf(&path, &[PageSpec::numbered(LETTER.1, LETTER.0, 0)])
}

/// Generate a document with more than 999 pages to check file name padding.
fn generate_large_pdf(output_dir: &Path) -> Result<()> {
    let path = output_dir.join("large.pdf");
    println!("  Creating: {}", path.display());
    let pages: Vec<PageSpec> = (0..1005)
        .map(|i| PageSpec::numbered(144, 144, i))
        .collect();
    write_pdf(&path, &pages)
}

/// Generate a file that is not a PDF at all.
fn generate_corrupt_pdf(output_dir: &Path) -> Result<()> {
    let path = output_dir.join("corrupt.pdf");
    println!("  Creating: {}", path.display());

    let mut file = File::create(&path)?;
    file.write_all(b"This is not a valid PDF file. It's just garbage data.")?;
    Ok(())
}

/// Generate a PDF header with nothing after it.
fn generate_truncated_pdf(output_dir: &Path) -> Result<()> {
    let path = output_dir.join("truncated.pdf");
    println!("  Creating: {}", path.display());

    let mut file = File::create(&path)?;
    file.write_all(b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog")?;
    Ok(())
}
