//! HTML metadata extraction for the document index.
//!
//! A lenient single-pass event scan over the markup. The title is the text
//! of the first `<h1>`; the `<title>` element is the same site-wide string
//! on every page and is never used. The summary is the first fifty words of
//! visible text, with script and style content excluded. Real-world pages
//! are not well-formed XML, so end-tag checking is off and any parser error
//! simply ends the scan with whatever was collected up to that point.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Number of leading words kept for the summary.
const SUMMARY_WORDS: usize = 50;

/// Title and summary extracted from one HTML document.
#[derive(Debug, Default, PartialEq)]
pub struct HtmlMeta {
    /// Text of the first `<h1>`, if the page has a non-empty one.
    pub title: Option<String>,
    /// First fifty words of visible text, `"..."`-suffixed when longer.
    pub summary: String,
}

pub fn extract_html_metadata(html: &str) -> HtmlMeta {
    let mut reader = Reader::from_str(html);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;

    let mut title: Option<String> = None;
    let mut words: Vec<String> = Vec::new();
    let mut more_words = false;
    let mut in_h1 = false;
    let mut h1_text = String::new();
    let mut skip_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                if name == b"script" || name == b"style" {
                    skip_depth += 1;
                } else if name == b"h1" && title.is_none() {
                    in_h1 = true;
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                if name == b"script" || name == b"style" {
                    skip_depth = skip_depth.saturating_sub(1);
                } else if name == b"h1" && in_h1 {
                    let text = h1_text.trim();
                    if !text.is_empty() {
                        title = Some(text.to_string());
                    }
                    in_h1 = false;
                }
            }
            Ok(Event::Text(t)) => {
                if skip_depth > 0 {
                    continue;
                }
                let text = match t.unescape() {
                    Ok(cow) => cow.into_owned(),
                    Err(_) => String::from_utf8_lossy(&t).into_owned(),
                };
                if in_h1 {
                    if !h1_text.is_empty() {
                        h1_text.push(' ');
                    }
                    h1_text.push_str(text.trim());
                }
                for word in text.split_whitespace() {
                    if words.len() < SUMMARY_WORDS {
                        words.push(word.to_string());
                    } else {
                        more_words = true;
                        break;
                    }
                }
                // Once the title is fixed and the summary is full there is
                // nothing left to collect.
                if title.is_some() && more_words {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            // Malformed markup: keep what we have.
            Err(_) => break,
            _ => {}
        }
    }

    let mut summary = words.join(" ");
    if more_words {
        summary.push_str("...");
    }

    HtmlMeta { title, summary }
}
