//! Raw record → canonical index entry.
//!
//! Field derivation here must stay bit-compatible with the entries already
//! persisted in the site index, so the rules are deliberately literal:
//! digits concatenated for `number`, first 220 characters for the summary,
//! first 4 / first 10 characters of the metadata date for `year` / `date`.
//! The function is total: every field has a fallback and nothing fails.

use crate::models::{IndexEntry, RawMetadata, RawRecord};

/// Category constants for merged Q&A entries. Fixed on purpose: the site's
/// category filters predate this source and must keep ignoring it.
pub const CATEGORY: &str = "other";
pub const CATEGORY_HE: &str = "שאלות ותשובות";
pub const CATEGORY_EN: &str = "Q&A";

/// Source name recorded when the metadata carries none.
pub const DEFAULT_SOURCE: &str = "Mi Yodeya";

/// Longest summary, in characters, before truncation kicks in.
const SUMMARY_MAX_CHARS: usize = 220;
const ELLIPSIS: char = '…';

/// Build the canonical index entry for one accepted record.
///
/// `processing_year` is passed in rather than read from the clock so the
/// derivation stays pure; callers use the current UTC year.
pub fn to_index_entry(record: &RawRecord, src_relpath: &str, processing_year: i32) -> IndexEntry {
    let qid = record.id_str();
    let meta = record.metadata.clone().unwrap_or_default();

    let year = year_from_date(meta.date.as_deref(), processing_year);
    let date = date_from_meta(&meta, year);

    let title = match record.title.as_deref() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => format!("Q&A {qid}"),
    };
    let summary = summary_from_content(record.content.as_deref().unwrap_or(""));

    IndexEntry {
        number: number_from_id(&qid),
        title_he: title.clone(),
        title_en: title,
        summary_he: summary.clone(),
        summary_en: summary,
        category: CATEGORY.to_string(),
        category_he: CATEGORY_HE.to_string(),
        category_en: CATEGORY_EN.to_string(),
        date,
        year,
        file: format!("qa.html?id={qid}&src={src_relpath}"),
        kind: "html".to_string(),
        source: meta.source.clone().unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        source_url: meta.url.clone(),
        tags: meta.tags.clone().unwrap_or_default(),
        source_id: qid,
        src: src_relpath.to_string(),
    }
}

/// Concatenate the decimal digits of an identifier, in order, and parse them
/// as one integer. An id without digits maps to 0, as does a digit run too
/// long for i64, so `number` is NOT unique across entries and nothing may
/// rely on it being so.
pub fn number_from_id(id: &str) -> i64 {
    let digits: String = id.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

/// First 220 characters of the content with newlines collapsed to spaces,
/// plus an ellipsis when the content was longer. Counts characters, not
/// bytes, so multi-byte content never splits mid-character.
pub fn summary_from_content(content: &str) -> String {
    let collapsed = content.replace('\n', " ");
    let collapsed = collapsed.trim();

    let mut chars = collapsed.chars();
    let mut head: String = chars.by_ref().take(SUMMARY_MAX_CHARS).collect();
    if chars.next().is_some() {
        head.push(ELLIPSIS);
    }
    head
}

/// Year from the leading 4 characters of an ISO-ish date string; the
/// processing year when the date is absent, empty, or unparsable.
pub fn year_from_date(meta_date: Option<&str>, processing_year: i32) -> i32 {
    let Some(date) = meta_date.filter(|d| !d.is_empty()) else {
        return processing_year;
    };
    let head: String = date.chars().take(4).collect();
    head.parse().unwrap_or(processing_year)
}

fn date_from_meta(meta: &RawMetadata, year: i32) -> String {
    match meta.date.as_deref() {
        Some(d) if !d.is_empty() => d.chars().take(10).collect(),
        _ => format!("{year}-01-01"),
    }
}
