//! Checks a driver transcript against a reference expansion of pi.
//!
//! The reference file holds pi as `3.14159...` on its last line. The device
//! reports the leading `3` on its own and then nine digits per line, so the
//! reference digit string is padded with eight spaces and cut into nine
//! character chunks; transcript line `i` must equal chunk `i` as a number.
use std::io::BufRead;
use std::path::Path;

use crate::core::errors::TranscriptError;
use crate::core::output::DIGIT_FIELD_WIDTH;

/// Padding that lines the lone leading digit up with the first chunk
const LEAD_PADDING: usize = DIGIT_FIELD_WIDTH - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Zero-based transcript line
    pub line: usize,
    pub transcript: String,
    /// Reference chunk, empty when the transcript runs past the reference
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub lines: usize,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Digits of the reference, without the decimal point, taken from the last line
pub fn reference_digits(text: &str) -> String {
    let Some(line) = text.lines().rev().map(str::trim_end).find(|l| !l.is_empty()) else {
        return String::new();
    };
    let mut chars = line.chars();
    let mut digits: String = chars.next().into_iter().collect();
    digits.extend(chars.skip(1));
    digits
}

/// Read a reference file
pub fn load_reference(path: &Path) -> Result<String, TranscriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| TranscriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let digits = reference_digits(&text);
    if digits.is_empty() {
        return Err(TranscriptError::EmptyReference {
            path: path.to_path_buf(),
        });
    }
    Ok(digits)
}

fn chunk(padded: &str, line: usize) -> &str {
    let start = line * DIGIT_FIELD_WIDTH;
    let end = (start + DIGIT_FIELD_WIDTH).min(padded.len());
    padded.get(start..end).unwrap_or("")
}

fn same_value(transcript: &str, reference: &str) -> bool {
    match (transcript.trim().parse::<u64>(), reference.trim().parse::<u64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Compare every transcript line against the reference digits
pub fn compare_transcript<R: BufRead>(digits: &str, transcript: R) -> std::io::Result<VerifyReport> {
    let padded = format!("{}{}", " ".repeat(LEAD_PADDING), digits);
    let mut report = VerifyReport::default();

    for (index, line) in transcript.lines().enumerate() {
        let line = line?;
        let reference = chunk(&padded, index);
        if !same_value(&line, reference) {
            report.mismatches.push(Mismatch {
                line: index,
                transcript: line.trim_end().to_string(),
                reference: reference.to_string(),
            });
        }
        report.lines += 1;
    }
    Ok(report)
}
