// src/extractors/journal.rs

// --- Imports ---
use crate::utils::error::LoadError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

// --- Regex Patterns (Lazy Static) ---
// MM/DD/YYYY with lexical month (01-12) and day (01-31) ranges only; 02/30 still matches.
// Word boundaries keep "112/01/2024" from yielding "12/01/2024".
static JOURNAL_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:0[1-9]|1[0-2])/(?:0[1-9]|[12][0-9]|3[01])/[0-9]{4}\b")
        .expect("Failed to compile JOURNAL_DATE_RE")
});

// No trailing boundary: "AZMAR-0001" yields "AZMAR-000".
static SECRET_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"AZMAR-[0-9]{3}").expect("Failed to compile SECRET_CODE_RE")
});

/// Dates and codes pulled from one journal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JournalFindings {
    pub dates: Vec<String>,
    pub codes: Vec<String>,
}

impl JournalFindings {
    pub fn scan(journal_text: &str) -> Self {
        Self {
            dates: extract_journal_dates(journal_text),
            codes: extract_secret_codes(journal_text),
        }
    }
}

/// Reads the whole journal as UTF-8.
pub fn read_journal<P: AsRef<Path>>(journal_filepath: P) -> Result<String, LoadError> {
    let path = journal_filepath.as_ref();
    tracing::info!("Reading journal from {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| LoadError::from_io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        LoadError::MalformedInput(format!("{} is not valid UTF-8: {}", path.display(), e))
    })?;

    tracing::debug!("Journal is {} bytes", text.len());
    Ok(text)
}

/// All `MM/DD/YYYY` dates in order of appearance, non-overlapping, leftmost first.
pub fn extract_journal_dates(journal_text: &str) -> Vec<String> {
    let dates: Vec<String> = JOURNAL_DATE_RE
        .find_iter(journal_text)
        .map(|m| m.as_str().to_string())
        .collect();
    tracing::debug!("Extracted {} journal dates", dates.len());
    dates
}

/// All `AZMAR-XXX` codes in order of appearance, non-overlapping, leftmost first.
pub fn extract_secret_codes(journal_text: &str) -> Vec<String> {
    let codes: Vec<String> = SECRET_CODE_RE
        .find_iter(journal_text)
        .map(|m| m.as_str().to_string())
        .collect();
    tracing::debug!("Extracted {} secret codes", codes.len());
    codes
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JOURNAL: &str = "\
03/14/2024 - Entered the antechamber. The door bore the mark AZMAR-101.
Found a second seal (AZMAR-202) on 03/15/2024; porters refused to go on.
Notes from 1999 mention 12/31/1999 as the last visit. Code AZMAR-1x was smudged.
";

    #[test]
    fn extracts_dates_in_order() {
        assert_eq!(
            extract_journal_dates("Visited 01/15/2024 and again 12/31/1999."),
            vec!["01/15/2024", "12/31/1999"]
        );
    }

    #[test]
    fn out_of_range_month_or_day_is_rejected() {
        assert!(extract_journal_dates("13/01/2024 and 01/32/2024").is_empty());
        assert!(extract_journal_dates("00/10/2024 and 10/00/2024").is_empty());
    }

    #[test]
    fn dates_are_not_calendar_checked() {
        assert_eq!(extract_journal_dates("on 02/30/2024"), vec!["02/30/2024"]);
    }

    #[test]
    fn dates_need_word_boundaries() {
        assert!(extract_journal_dates("112/01/2024").is_empty());
        assert!(extract_journal_dates("01/15/20245").is_empty());
        assert!(extract_journal_dates("x01/15/2024").is_empty());
        assert_eq!(extract_journal_dates("(01/15/2024)"), vec!["01/15/2024"]);
    }

    #[test]
    fn single_digit_parts_do_not_match() {
        assert!(extract_journal_dates("1/15/2024 and 01/5/2024 and 01/15/24").is_empty());
    }

    #[test]
    fn extracts_codes_without_trailing_boundary() {
        assert_eq!(
            extract_secret_codes("Found AZMAR-007 near AZMAR-123B."),
            vec!["AZMAR-007", "AZMAR-123"]
        );
    }

    #[test]
    fn four_digit_code_yields_first_three_digits() {
        assert_eq!(extract_secret_codes("AZMAR-0001"), vec!["AZMAR-000"]);
    }

    #[test]
    fn codes_are_case_sensitive_and_need_three_digits() {
        assert!(extract_secret_codes("azmar-123 AZMAR-12 AZMAR 123").is_empty());
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract_journal_dates("").is_empty());
        assert!(extract_secret_codes("").is_empty());
    }

    #[test]
    fn scan_collects_both_lists() {
        let findings = JournalFindings::scan(JOURNAL);
        assert_eq!(findings.dates, vec!["03/14/2024", "03/15/2024", "12/31/1999"]);
        assert_eq!(findings.codes, vec!["AZMAR-101", "AZMAR-202"]);
        assert_eq!(findings, JournalFindings::scan(JOURNAL));
    }

    #[test]
    fn reads_journal_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(JOURNAL.as_bytes()).unwrap();
        assert_eq!(read_journal(file.path()).unwrap(), JOURNAL);
    }

    #[test]
    fn invalid_utf8_journal_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0x6f, 0xff, 0xfe]).unwrap();
        let err = read_journal(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput(_)));
    }

    #[test]
    fn missing_journal_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_journal(dir.path().join("journal.txt")).unwrap_err();
        assert!(err.is_not_found());
    }
}
