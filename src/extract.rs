//! Heuristic price extraction from uncontrolled HTML.
//!
//! The quote pages this service reads are not ours: their markup changes
//! without notice, row order is not guaranteed, and the same product can
//! appear more than once. Extraction is therefore a best-effort, two-phase
//! scan driven by a [`SourceProfile`] describing what to look for, and it
//! either produces a positive price or an explicit not-found outcome.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Static description of how to locate and read a price on one page.
#[derive(Debug, Clone)]
pub struct SourceProfile {
    /// Short human name, used in log lines and error payloads.
    pub name: &'static str,
    /// Full URL of the quote page.
    pub url: String,
    /// Lower-cased phrases identifying the target row. Any phrase matches;
    /// the first one doubles as the anchor for the free-text fallback.
    pub match_phrases: Vec<&'static str>,
    /// Rows with fewer cells than this are ignored.
    pub min_cell_count: usize,
    /// Zero-based index of the cell holding the buy price.
    pub price_column: usize,
    /// Count `<th>` cells too; some pages style the product-name cell as a
    /// header.
    pub include_header_cells: bool,
    pub unit_rule: UnitRule,
}

/// Correction for sources quoting in a smaller denomination than the rest
/// of the system expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRule {
    None,
    /// Multiply a candidate below `threshold` by `factor`.
    ScaleIfBelow { threshold: u64, factor: u64 },
}

/// Outcome of one extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// A positive price in full currency units.
    Found(u64),
    /// The page was read but no usable price was located. Malformed
    /// numeric tokens end up here too, never as an error.
    NotFound,
    /// The page could not be fetched at all.
    FetchError(String),
}

/// Extract a single buy price from `html` according to `profile`.
///
/// Pure function of its inputs: no I/O, no shared state, safe to call
/// concurrently. Phase 1 scans table rows; only when it yields a zero
/// candidate does phase 2 scan free-standing text. Among multiple matches
/// the last one in document order wins.
///
/// A price cell that parses to literal zero leaves the candidate at zero
/// and therefore also triggers the fallback; a genuinely-zero quote is
/// indistinguishable from "not found" (see DESIGN.md).
pub fn extract(html: &str, profile: &SourceProfile) -> ExtractionResult {
    let doc = Html::parse_document(html);

    let mut candidate = scan_rows(&doc, profile);
    if candidate == 0 {
        candidate = scan_free_text(&doc, profile);
    }

    let price = apply_unit_rule(candidate, profile.unit_rule);
    if price > 0 {
        ExtractionResult::Found(price)
    } else {
        ExtractionResult::NotFound
    }
}

/// Phase 1: fold over every table row in document order. Each step either
/// keeps the accumulator or replaces it with the row's candidate, so the
/// last matching row wins.
fn scan_rows(doc: &Html, profile: &SourceProfile) -> u64 {
    let rows = Selector::parse("tr").unwrap();
    let cells = if profile.include_header_cells {
        Selector::parse("td, th").unwrap()
    } else {
        Selector::parse("td").unwrap()
    };

    doc.select(&rows)
        .fold(0, |acc, row| row_candidate(row, &cells, profile).unwrap_or(acc))
}

/// Candidate price from one row, or `None` if the row contributes nothing
/// (no phrase match, too few cells, or a digit-less price cell).
fn row_candidate(
    row: ElementRef<'_>,
    cell_selector: &Selector,
    profile: &SourceProfile,
) -> Option<u64> {
    let row_text = element_text(row).to_lowercase();
    if !profile
        .match_phrases
        .iter()
        .any(|phrase| row_text.contains(phrase))
    {
        return None;
    }

    let cells: Vec<ElementRef<'_>> = row.select(cell_selector).collect();
    if cells.len() < profile.min_cell_count {
        return None;
    }

    let digits = digits_only(&element_text(*cells.get(profile.price_column)?));
    if digits.is_empty() {
        return None;
    }

    let price = digits.parse().ok()?;
    debug!(source = profile.name, %digits, price, "Matched price row");
    Some(price)
}

/// Phase 2: some layouts drop the table entirely and put the quote in
/// running text. Look for short elements naming the product and pull the
/// first dot-grouped number (e.g. `1.234.567`) out of the parent's text.
/// Same last-wins fold as phase 1.
fn scan_free_text(doc: &Html, profile: &SourceProfile) -> u64 {
    let Some(&phrase) = profile.match_phrases.first() else {
        return 0;
    };
    let blocks = Selector::parse("div, span, p").unwrap();
    let grouped_number = Regex::new(r"[0-9]{1,3}(\.[0-9]{3})+").unwrap();

    doc.select(&blocks).fold(0, |acc, el| {
        let text = element_text(el);
        // The length guard keeps whole-page containers from matching.
        if text.chars().count() >= 100 || !text.to_lowercase().contains(phrase) {
            return acc;
        }
        match grouped_number.find(&parent_text(el)) {
            Some(m) => m.as_str().replace('.', "").parse().unwrap_or(acc),
            None => acc,
        }
    })
}

fn apply_unit_rule(candidate: u64, rule: UnitRule) -> u64 {
    match rule {
        UnitRule::ScaleIfBelow { threshold, factor }
            if candidate > 0 && candidate < threshold =>
        {
            candidate * factor
        }
        _ => candidate,
    }
}

/// Full text content of an element, descendants included.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Full text of the element's parent, or empty when the parent is not an
/// element.
fn parent_text(el: ElementRef<'_>) -> String {
    el.parent()
        .and_then(ElementRef::wrap)
        .map(element_text)
        .unwrap_or_default()
}

fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
