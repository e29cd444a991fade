use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tempfile::NamedTempFile;

/// A small single-page PDF document
pub fn sample_pdf() -> Vec<u8> {
    let mut pdf = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");
    pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");
    pdf.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");
    pdf.extend_from_slice(b"3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>\nendobj\n");
    pdf.extend_from_slice(b"trailer\n<< /Root 1 0 R >>\n%%EOF\n");
    pdf
}

pub fn sample_pdf_base64() -> String {
    STANDARD.encode(sample_pdf())
}

/// Write `content` to a fresh temp file that lives as long as the handle.
pub fn temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

pub fn text_file() -> NamedTempFile {
    temp_file(b"<?php\n\nclass User extends Model\n{\n}\n")
}
