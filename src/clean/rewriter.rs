//! Whole-document pass: classify every page, drop the blanks, write the rest.

use std::path::Path;

use log::{debug, info, warn};
use lopdf::Document;

use crate::error::CleanError;

use super::classifier::{ConservativePolicy, PageClass, PageClassifier};
use super::signals::PageSignals;

/// Aggregate result of one cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    pub total: usize,
    pub removed: usize,
    pub remaining: usize,
}

/// Clean with the default conservative policy.
pub fn clean_pdf(input: &Path, output: &Path) -> Result<CleanStats, CleanError> {
    clean_pdf_with(input, output, &ConservativePolicy::default())
}

/// Read the document at `input`, drop every page the policy classifies as
/// blank, and write the remainder to `output` in original order. The input
/// file is never touched.
///
/// If the policy would drop every page of a non-empty document, all
/// decisions are discarded and the document is rewritten unchanged, so the
/// output is never an empty document unless the input was.
pub fn clean_pdf_with(
    input: &Path,
    output: &Path,
    policy: &impl PageClassifier,
) -> Result<CleanStats, CleanError> {
    let mut doc = Document::load(input).map_err(CleanError::Parse)?;

    let pages = doc.get_pages();
    let total = pages.len();

    let mut drop_list: Vec<u32> = Vec::new();
    for (&number, &page_id) in &pages {
        let signals = PageSignals::collect(&doc, number, page_id);
        if policy.classify(&signals) == PageClass::ProbablyBlank {
            debug!(
                "page {number}: no text, no XObjects, {} content bytes; dropping",
                signals.trimmed_content_len()
            );
            drop_list.push(number);
        }
    }

    // Failsafe: a heuristic that condemns every page is wrong by
    // definition; keep the document intact instead.
    if !drop_list.is_empty() && drop_list.len() == total {
        warn!("all {total} pages classified blank; keeping the document intact");
        drop_list.clear();
    }

    let removed = drop_list.len();
    if removed > 0 {
        doc.delete_pages(&drop_list);
        doc.prune_objects();
    }
    doc.save(output).map_err(CleanError::Write)?;

    let stats = CleanStats {
        total,
        removed,
        remaining: total - removed,
    };
    info!(
        "cleaned {}: {} pages, {} removed",
        input.display(),
        stats.total,
        stats.removed
    );
    Ok(stats)
}
