// GuildView - core/parser.rs
//
// Line-oriented parsing of guild listings.
// Core layer: accepts text already read by the app layer, never touches the
// filesystem directly.
//
// Format: NAME - MEMBER_COUNT - ID - OWNER, split on the literal " - ".
// A name or owner that itself contains " - " splits into too many fields and
// the line is rejected; there is no quoting or escaping.

use crate::core::model::{GuildRecord, MemberCountPolicy, RejectedLine};
use crate::util::constants::{
    DEBUG_MAX_LINE_PREVIEW, FIELD_COUNT, FIELD_SEPARATOR, MAX_LOGGED_REJECTS, THOUSANDS_SEPARATOR,
};
use crate::util::error::ParseFieldError;
use crate::util::logging::preview;

/// Result of parsing one input file.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Successfully parsed records, in input order.
    pub records: Vec<GuildRecord>,
    /// Lines that did not split into exactly four fields, in input order.
    pub rejected: Vec<RejectedLine>,
    /// Total lines processed.
    pub lines_processed: usize,
}

/// Parse whole-file content. Line terminators (`\n` or `\r\n`) are removed;
/// a trailing newline does not produce an extra empty line.
pub fn parse_content(
    content: &str,
    policy: MemberCountPolicy,
) -> Result<ParseResult, ParseFieldError> {
    parse_lines(content.lines(), policy)
}

/// Parse a sequence of lines into records and rejected lines.
///
/// Returns `Err` only under `MemberCountPolicy::Abort` when a four-field line
/// carries a member count that is not a non-negative integer.
pub fn parse_lines<'a, I>(
    lines: I,
    policy: MemberCountPolicy,
) -> Result<ParseResult, ParseFieldError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = ParseResult::default();

    for (line_idx, line) in lines.into_iter().enumerate() {
        result.lines_processed += 1;
        let line_number = line_idx + 1;

        match parse_line(line, line_number) {
            LineOutcome::Record(record) => result.records.push(record),
            LineOutcome::WrongFieldCount => result.rejected.push(RejectedLine {
                line_number,
                text: line.to_string(),
            }),
            LineOutcome::BadMemberCount(err) => match policy {
                MemberCountPolicy::Abort => {
                    tracing::warn!(
                        line = line_number,
                        error = %err,
                        "Aborting load on invalid member count"
                    );
                    return Err(err);
                }
                MemberCountPolicy::Reject => {
                    tracing::debug!(
                        line = line_number,
                        error = %err,
                        "Rejecting line with invalid member count"
                    );
                    result.rejected.push(RejectedLine {
                        line_number,
                        text: line.to_string(),
                    });
                }
            },
        }
    }

    if !result.rejected.is_empty() {
        log_rejects(&result);
    }

    tracing::debug!(
        records = result.records.len(),
        rejected = result.rejected.len(),
        lines = result.lines_processed,
        "Parsing complete"
    );

    Ok(result)
}

enum LineOutcome {
    Record(GuildRecord),
    WrongFieldCount,
    BadMemberCount(ParseFieldError),
}

fn parse_line(line: &str, line_number: usize) -> LineOutcome {
    let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if parts.len() != FIELD_COUNT {
        return LineOutcome::WrongFieldCount;
    }

    let raw_count = parts[1].trim();
    let digits: String = raw_count
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();
    let member_count = match digits.trim().parse::<u64>() {
        Ok(n) => n,
        Err(source) => {
            return LineOutcome::BadMemberCount(ParseFieldError::MemberCount {
                line_number,
                raw_value: raw_count.to_string(),
                line: line.to_string(),
                source,
            })
        }
    };

    LineOutcome::Record(GuildRecord {
        name: parts[0].trim().to_string(),
        member_count,
        id: parts[2].trim().to_string(),
        owner: parts[3].trim().to_string(),
        line_number,
    })
}

fn log_rejects(result: &ParseResult) {
    tracing::warn!(
        rejected = result.rejected.len(),
        lines = result.lines_processed,
        "Some lines did not match NAME - MEMBER_COUNT - ID - OWNER"
    );
    for rejected in result.rejected.iter().take(MAX_LOGGED_REJECTS) {
        tracing::warn!(
            line = rejected.line_number,
            text = %preview(&rejected.text, DEBUG_MAX_LINE_PREVIEW),
            "Rejected line"
        );
    }
    if result.rejected.len() > MAX_LOGGED_REJECTS {
        tracing::warn!(
            suppressed = result.rejected.len() - MAX_LOGGED_REJECTS,
            "Further rejected lines not logged"
        );
    }
}
