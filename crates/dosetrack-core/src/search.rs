//! Search and filtering over the medicine catalog.
//!
//! Two matching modes plus a fuzzy fallback:
//! - prefix matching with barcode routing (a query starting with a digit
//!   searches barcodes, anything else searches names),
//! - plain substring filtering over names and barcodes,
//! - fuzzy name suggestions for typeahead when the exact filters miss.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::{Medicine, Resident};

/// Anything a catalog query can match against.
pub trait Searchable {
    fn search_name(&self) -> String;
    fn search_barcode(&self) -> Option<&str>;
}

impl Searchable for Medicine {
    fn search_name(&self) -> String {
        self.drug.clone()
    }

    fn search_barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }
}

impl Searchable for Resident {
    fn search_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn search_barcode(&self) -> Option<&str> {
        None
    }
}

/// Whether a single record matches a prefix query.
///
/// A query starting with an ASCII digit is treated as a barcode prefix;
/// anything else as a name prefix. Both are case-insensitive. The empty
/// query matches everything.
pub fn matches_query<S: Searchable>(query: &str, record: &S) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    if query.starts_with(|c: char| c.is_ascii_digit()) {
        record
            .search_barcode()
            .map(|barcode| barcode.to_lowercase().starts_with(&query))
            .unwrap_or(false)
    } else {
        record.search_name().to_lowercase().starts_with(&query)
    }
}

/// Prefix-filter a list, preserving order.
pub fn filter_by_query<'a, S: Searchable>(query: &str, records: &'a [S]) -> Vec<&'a S> {
    records
        .iter()
        .filter(|record| matches_query(query, *record))
        .collect()
}

/// Substring-filter a list: a record matches when its name or barcode
/// contains the query anywhere, case-insensitive.
pub fn filter_by_substring<'a, S: Searchable>(query: &str, records: &'a [S]) -> Vec<&'a S> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.search_name().to_lowercase().contains(&query)
                || record
                    .search_barcode()
                    .map(|barcode| barcode.to_lowercase().contains(&query))
                    .unwrap_or(false)
        })
        .collect()
}

/// Minimum similarity for a fuzzy suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.55;

/// Compute fuzzy string similarity using combined metrics.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    // Combine Jaro-Winkler (good for typos) and Levenshtein (good for overall similarity)
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);

    // Weight Jaro-Winkler more heavily as it's better for prefix matching
    jw * 0.6 + lev * 0.4
}

/// Fuzzy name suggestions for typeahead, best matches first.
///
/// Scores every candidate against the lowercased query and keeps up to
/// `limit` names above the similarity threshold. Ties break toward the
/// earlier candidate.
pub fn suggest_names<'a>(query: &str, names: &[&'a str], limit: usize) -> Vec<&'a str> {
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }
    let query = query.to_lowercase();

    let mut scored: Vec<(f64, usize, &str)> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| (fuzzy_match(&query, &name.to_lowercase()), idx, *name))
        .filter(|(score, _, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(&b.1)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, _, name)| name).collect()
}
