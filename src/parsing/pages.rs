use std::collections::HashSet;
use std::path::Path;

use crate::core::page::Page;
use crate::parsing::ParseError;
use crate::utils::validation::{check_page_limit, MAX_PAGES};

/// Page separator written by `pdftotext`
pub const PAGE_SEPARATOR: char = '\x0c';

/// Parse a page-text file: `.json` as a page array, anything else as
/// form-feed separated text
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_pages_file(path: &Path) -> Result<Vec<Page>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        parse_pages_json(&content)
    } else {
        parse_pages_text(&content)
    }
}

/// Split form-feed separated text into pages numbered from 0.
///
/// A single empty segment after the final separator is not a page. Blank
/// input yields no pages.
///
/// # Errors
///
/// Returns `ParseError::TooManyPages` if the page limit is exceeded.
pub fn parse_pages_text(text: &str) -> Result<Vec<Page>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut segments: Vec<&str> = text.split(PAGE_SEPARATOR).collect();
    if segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    let mut pages = Vec::with_capacity(segments.len());
    for (index, segment) in segments.into_iter().enumerate() {
        if check_page_limit(pages.len()).is_some() {
            return Err(ParseError::TooManyPages(pages.len()));
        }
        pages.push(Page::new(index, segment));
    }
    Ok(pages)
}

/// Parse a JSON array of `{ "index": n, "text": "..." }` objects
///
/// # Errors
///
/// Returns `ParseError::Json` on malformed JSON, `ParseError::TooManyPages`
/// if the page limit is exceeded, or `ParseError::InvalidFormat` if two
/// pages share an index.
pub fn parse_pages_json(json: &str) -> Result<Vec<Page>, ParseError> {
    let pages: Vec<Page> = serde_json::from_str(json)?;

    if pages.len() > MAX_PAGES {
        return Err(ParseError::TooManyPages(pages.len()));
    }

    let mut seen = HashSet::with_capacity(pages.len());
    for page in &pages {
        if !seen.insert(page.index) {
            return Err(ParseError::InvalidFormat(format!(
                "duplicate page index {}",
                page.index
            )));
        }
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_feed_text() {
        let text = "TRK# 8878 9864 4283\n\x0cWAYBILL 63 3270 4114\n\x0c";
        let pages = parse_pages_text(text).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].index, 0);
        assert_eq!(pages[1].text, "WAYBILL 63 3270 4114\n");
    }

    #[test]
    fn test_empty_middle_page_kept() {
        let pages = parse_pages_text("a\x0c\x0cb").unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].text, "");
    }

    #[test]
    fn test_blank_text_has_no_pages() {
        assert!(parse_pages_text("").unwrap().is_empty());
        assert!(parse_pages_text("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[{"index": 1, "text": "b"}, {"index": 0, "text": "a"}]"#;
        let pages = parse_pages_json(json).unwrap();
        assert_eq!(pages, vec![Page::new(1, "b"), Page::new(0, "a")]);
    }

    #[test]
    fn test_parse_json_duplicate_index() {
        let json = r#"[{"index": 0, "text": "a"}, {"index": 0, "text": "b"}]"#;
        assert!(matches!(
            parse_pages_json(json),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_pages_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("pages.json");
        std::fs::write(&json_path, r#"[{"index": 0, "text": "WAYBILL 63 3270 4114"}]"#).unwrap();
        assert_eq!(parse_pages_file(&json_path).unwrap().len(), 1);

        let txt_path = dir.path().join("pages.txt");
        std::fs::write(&txt_path, "one\x0ctwo\x0cthree").unwrap();
        assert_eq!(parse_pages_file(&txt_path).unwrap().len(), 3);
    }
}
