// src/extractors/mod.rs
pub mod journal;

// Re-export key extraction functions for convenience
pub use journal::{
    extract_journal_dates,
    extract_secret_codes,
    read_journal,
    JournalFindings,
};
