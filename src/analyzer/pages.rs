//! Page geometry analyzer
//!
//! Enumerates the page tree and compares every page's dimensions against
//! the first page. Legitimate documents are page-dimension-homogeneous;
//! an outlier page is a foreign-page insertion signal.

use std::panic::{catch_unwind, AssertUnwindSafe};

use lopdf::{Document, Object, ObjectId};
use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::report::{Finding, FindingCategory, PageAnalysis, Severity};

#[instrument(skip(data, config), fields(size = data.len()))]
pub fn analyze(
    data: &[u8],
    fallback_page_count: usize,
    config: &EngineConfig,
) -> (PageAnalysis, Vec<Finding>) {
    match catch_unwind(AssertUnwindSafe(|| geometry(data, config))) {
        Ok(Ok((total_pages, inconsistent_pages))) => {
            debug!(total_pages, outliers = inconsistent_pages.len(), "page geometry");
            let mut findings = Vec::new();
            if !inconsistent_pages.is_empty() {
                findings.push(
                    Finding::new(
                        Severity::High,
                        FindingCategory::Pages,
                        "Inconsistent page dimensions",
                        format!(
                            "{} page(s) deviate from the first page's dimensions. \
                             Mixed page sizes suggest pages inserted from another \
                             document.",
                            inconsistent_pages.len()
                        ),
                    )
                    .with_evidence(inconsistent_pages.clone()),
                );
            }
            (
                PageAnalysis {
                    total_pages,
                    inconsistent_pages,
                },
                findings,
            )
        }
        Ok(Err(err)) => degraded(fallback_page_count, err.to_string()),
        Err(_) => degraded(fallback_page_count, "page tree traversal panicked".to_string()),
    }
}

fn degraded(fallback_page_count: usize, reason: String) -> (PageAnalysis, Vec<Finding>) {
    warn!(%reason, "page geometry analysis degraded");
    (
        PageAnalysis {
            total_pages: fallback_page_count,
            inconsistent_pages: Vec::new(),
        },
        vec![Finding::new(
            Severity::Medium,
            FindingCategory::Pages,
            "Page geometry unavailable",
            format!(
                "The page object graph could not be loaded ({}). Falling back to \
                 the extractor's page count.",
                reason
            ),
        )],
    )
}

fn geometry(data: &[u8], config: &EngineConfig) -> lopdf::Result<(usize, Vec<String>)> {
    let doc = Document::load_mem(data)?;
    let pages = doc.get_pages();

    let mut dimensions: Vec<(u32, f64, f64)> = Vec::new();
    for (&number, &id) in &pages {
        if let Some((width, height)) = page_dimensions(&doc, id) {
            dimensions.push((number, width, height));
        }
    }

    let mut inconsistent = Vec::new();
    if let Some(&(_, base_width, base_height)) = dimensions.first() {
        let tolerance = config.page_dimension_tolerance;
        for &(number, width, height) in dimensions.iter().skip(1) {
            if (width - base_width).abs() > tolerance || (height - base_height).abs() > tolerance {
                inconsistent.push(format!(
                    "Page {}: {:.1}x{:.1} differs from baseline {:.1}x{:.1}",
                    number, width, height, base_width, base_height
                ));
            }
        }
    }

    Ok((pages.len(), inconsistent))
}

/// Width and height from the page's `MediaBox`, walking `Parent` links when
/// the box is inherited. Depth-capped against cyclic parent chains.
fn page_dimensions(doc: &Document, id: ObjectId) -> Option<(f64, f64)> {
    let mut current = id;
    for _ in 0..32 {
        let dict = doc.get_object(current).ok()?.as_dict().ok()?;
        if let Ok(rect) = dict.get(b"MediaBox") {
            return rect_dimensions(doc, rect);
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => return None,
        }
    }
    None
}

fn rect_dimensions(doc: &Document, rect: &Object) -> Option<(f64, f64)> {
    let rect = match rect {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let values: Vec<f64> = rect.as_array().ok()?.iter().filter_map(number).collect();
    if values.len() != 4 {
        return None;
    }
    Some(((values[2] - values[0]).abs(), (values[3] - values[1]).abs()))
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(*value as f64),
        _ => None,
    }
}
