//! Object census
//!
//! Counts structural object kinds for operator context. Purely
//! informational; the counts carry no severity implication on their own.

use lazy_static::lazy_static;
use regex::bytes::Regex;
use tracing::instrument;

use crate::report::{Finding, FindingCategory, Severity};
use crate::utils::count_occurrences;

lazy_static! {
    static ref INDIRECT_OBJECT: Regex = Regex::new(r"\b\d+\s+\d+\s+obj\b").unwrap();
    static ref IMAGE_OBJECT: Regex = Regex::new(r"/Subtype\s*/Image\b").unwrap();
    static ref FONT_OBJECT: Regex = Regex::new(r"/Type\s*/Font\b").unwrap();
    // `\b` after `Page` keeps `/Pages` nodes out of the page count.
    static ref PAGE_OBJECT: Regex = Regex::new(r"/Type\s*/Page\b").unwrap();
}

#[instrument(skip(data))]
pub fn scan(data: &[u8]) -> Vec<Finding> {
    let objects = INDIRECT_OBJECT.find_iter(data).count();
    // every `endstream` keyword also contains `stream`
    let streams = count_occurrences(data, b"stream")
        .saturating_sub(count_occurrences(data, b"endstream"));
    let images = IMAGE_OBJECT.find_iter(data).count();
    let fonts = FONT_OBJECT.find_iter(data).count();
    let pages = PAGE_OBJECT.find_iter(data).count();

    vec![Finding::new(
        Severity::Info,
        FindingCategory::Objects,
        "Object census",
        "Structural object counts for context.",
    )
    .with_evidence(vec![
        format!("{} indirect objects", objects),
        format!("{} streams", streams),
        format!("{} image objects", images),
        format!("{} font objects", fonts),
        format!("{} page objects", pages),
    ])]
}
