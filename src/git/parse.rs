//! git::parse
//!
//! Conversion of raw git output into typed records.
//!
//! Everything here is pure: no I/O, no caching. The commit grammar is the
//! one produced by [`COMMIT_FORMAT`] together with `-z --date=raw`:
//!
//! ```text
//! <hash>\n
//! <parent> <parent> ...\n
//! <author name>\n<author email>\n<unix seconds> <+hhmm>\n
//! <committer name>\n<committer email>\n<unix seconds> <+hhmm>\n
//! <raw message>\0
//! ```

use chrono::{DateTime, FixedOffset};

use super::errors::GitError;
use crate::core::commit::{Commit, Reference, Signature};
use crate::core::types::Sha1;

/// `--format` argument matching [`parse_commits`].
pub const COMMIT_FORMAT: &str = "--format=%H%n%P%n%an%n%ae%n%ad%n%cn%n%ce%n%cd%n%B";

/// Number of header lines preceding the message in one record.
const HEADER_LINES: usize = 8;

/// Escape a path argument for use after `--`.
///
/// A leading `:` would be read by git as pathspec magic, so it is
/// prefixed with a backslash. Every other input passes through.
///
/// # Example
///
/// ```
/// use gitrev::git::parse::escape_path;
///
/// assert_eq!(escape_path(""), "");
/// assert_eq!(escape_path("normal"), "normal");
/// assert_eq!(escape_path(":normal"), "\\:normal");
/// ```
pub fn escape_path(path: &str) -> String {
    if path.starts_with(':') {
        format!("\\{path}")
    } else {
        path.to_string()
    }
}

/// Parse NUL-separated commit records.
///
/// # Errors
///
/// [`GitError::MalformedOutput`] if the output is not UTF-8, or a record
/// is missing header lines, has an invalid hash, or has an unparsable
/// timestamp.
pub fn parse_commits(output: &[u8]) -> Result<Vec<Commit>, GitError> {
    let text = utf8(output)?;
    let records: Vec<&str> = text
        .split('\0')
        .map(|r| r.strip_prefix('\n').unwrap_or(r))
        .filter(|r| !r.is_empty())
        .collect();

    let mut commits = Vec::with_capacity(records.len());
    for record in records {
        commits.push(parse_commit_record(record)?);
    }
    Ok(commits)
}

fn parse_commit_record(record: &str) -> Result<Commit, GitError> {
    let mut fields = record.splitn(HEADER_LINES + 1, '\n');
    let mut next = |name: &str| {
        fields.next().ok_or_else(|| GitError::MalformedOutput {
            message: format!("commit record is missing the {name} line"),
        })
    };

    let id = parse_id(next("hash")?)?;
    let parents = next("parents")?
        .split_whitespace()
        .map(parse_id)
        .collect::<Result<Vec<_>, _>>()?;
    let author = Signature {
        name: next("author name")?.to_string(),
        email: next("author email")?.to_string(),
        when: parse_raw_time(next("author date")?)?,
    };
    let committer = Signature {
        name: next("committer name")?.to_string(),
        email: next("committer email")?.to_string(),
        when: parse_raw_time(next("committer date")?)?,
    };
    // A commit with an empty message has nothing after the last header.
    let message = fields.next().unwrap_or("").to_string();

    Ok(Commit {
        id,
        parents,
        author,
        committer,
        message,
    })
}

fn parse_id(text: &str) -> Result<Sha1, GitError> {
    Sha1::parse(text.trim()).map_err(|e| GitError::MalformedOutput {
        message: e.to_string(),
    })
}

pub(crate) fn utf8(output: &[u8]) -> Result<&str, GitError> {
    std::str::from_utf8(output).map_err(|e| GitError::MalformedOutput {
        message: format!("git output is not valid UTF-8: {e}"),
    })
}

/// Parse newline-separated identities, preserving order.
///
/// Blank lines are ignored.
///
/// # Errors
///
/// [`GitError::MalformedOutput`] if any non-blank line is not a full hash.
pub fn parse_ids(output: &[u8]) -> Result<Vec<Sha1>, GitError> {
    let text = String::from_utf8_lossy(output);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut ids = Vec::with_capacity(lines.len());
    for line in lines {
        ids.push(parse_id(line)?);
    }
    Ok(ids)
}

/// Parse NUL-separated paths (`diff --name-only -z`), preserving order and
/// duplicates.
///
/// Names are taken verbatim, so tabs, quotes and newlines survive.
///
/// # Errors
///
/// [`GitError::MalformedOutput`] if a name is not valid UTF-8.
pub fn parse_names(output: &[u8]) -> Result<Vec<String>, GitError> {
    Ok(utf8(output)?
        .split('\0')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}

/// Parse the single integer printed by `rev-list --count`.
pub fn parse_count(output: &[u8]) -> Result<u64, GitError> {
    let text = String::from_utf8_lossy(output);
    text.trim()
        .parse()
        .map_err(|_| GitError::MalformedOutput {
            message: format!("expected a count, got '{}'", text.trim()),
        })
}

/// Parse `<hash> <refspec>` lines as printed by `ls-remote` or `show-ref`.
///
/// Lines with fewer than two fields or an invalid hash are skipped.
pub fn parse_references(output: &[u8]) -> Vec<Reference> {
    let text = String::from_utf8_lossy(output);
    let lines: Vec<&str> = text.lines().collect();

    let mut refs = Vec::with_capacity(lines.len());
    for line in lines {
        let mut fields = line.split_whitespace();
        let (Some(id), Some(refspec)) = (fields.next(), fields.next()) else {
            continue;
        };
        if let Ok(id) = Sha1::parse(id) {
            refs.push(Reference {
                id,
                refspec: refspec.to_string(),
            });
        }
    }
    refs
}

/// Parse a `--date=raw` value such as `1581250680 +0800`.
///
/// # Errors
///
/// [`GitError::MalformedOutput`] if the seconds are not numeric or the
/// offset is not `±hhmm`.
pub fn parse_raw_time(text: &str) -> Result<DateTime<FixedOffset>, GitError> {
    let malformed = |why: &str| GitError::MalformedOutput {
        message: format!("invalid raw date '{text}': {why}"),
    };

    let mut parts = text.split_whitespace();
    let seconds: i64 = parts
        .next()
        .ok_or_else(|| malformed("missing timestamp"))?
        .parse()
        .map_err(|_| malformed("timestamp is not numeric"))?;
    let offset = match parts.next() {
        Some(tz) => parse_offset(tz).ok_or_else(|| malformed("bad timezone"))?,
        None => FixedOffset::east_opt(0).ok_or_else(|| malformed("bad timezone"))?,
    };

    DateTime::from_timestamp(seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| malformed("timestamp out of range"))
}

fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let (sign, digits) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse a strict ISO-8601 date (`%(committerdate:iso-strict)`).
pub fn parse_iso_time(text: &str) -> Result<DateTime<FixedOffset>, GitError> {
    DateTime::parse_from_rfc3339(text.trim()).map_err(|e| GitError::MalformedOutput {
        message: format!("invalid date '{}': {}", text.trim(), e),
    })
}
