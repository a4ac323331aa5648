use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @module: SRT cue model, parsing and serialization

// @const: SRT timestamp line regex, lenient about the millisecond separator
static TIMESTAMP_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})$")
        .unwrap()
});

/// A single SRT timestamp, kept in its component fields.
///
/// Minutes and seconds are bounded to [0,59] and milliseconds to [0,999];
/// hours have no upper bound (SRT imposes none). Ordering is by total
/// millisecond offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrtTimestamp {
    /// Hours, unbounded
    pub hours: u32,
    /// Minutes in [0,59]
    pub minutes: u32,
    /// Seconds in [0,59]
    pub seconds: u32,
    /// Milliseconds in [0,999]
    pub millis: u32,
}

impl SrtTimestamp {
    /// Create a new timestamp from its components
    pub fn new(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Self {
        SrtTimestamp { hours, minutes, seconds, millis }
    }

    /// Build a timestamp from a flat millisecond offset
    pub fn from_millis(ms: u64) -> Self {
        SrtTimestamp {
            hours: (ms / 3_600_000) as u32,
            minutes: ((ms % 3_600_000) / 60_000) as u32,
            seconds: ((ms % 60_000) / 1_000) as u32,
            millis: (ms % 1_000) as u32,
        }
    }

    /// Total milliseconds since zero; defines the ordering of timestamps
    pub fn total_millis(&self) -> u64 {
        (u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds))
            * 1000
            + u64::from(self.millis)
    }

    /// Check the declared field ranges
    pub fn fields_in_range(&self) -> bool {
        self.minutes < 60 && self.seconds < 60 && self.millis < 1000
    }
}

impl fmt::Display for SrtTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

impl PartialOrd for SrtTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SrtTimestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.total_millis().cmp(&other.total_millis())
    }
}

/// Single subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    /// Sequence number; positional, re-derived on serialize
    pub seq_num: usize,

    /// Display start time
    pub start: SrtTimestamp,

    /// Display end time
    pub end: SrtTimestamp,

    /// Cue text, may contain embedded newlines
    pub text: String,
}

impl SubtitleEntry {
    /// Create a new subtitle entry
    pub fn new(seq_num: usize, start: SrtTimestamp, end: SrtTimestamp, text: String) -> Self {
        SubtitleEntry { seq_num, start, end, text }
    }

    /// Check the cue invariants: timestamp field ranges and start <= end
    pub fn validate(&self) -> Result<(), SubtitleError> {
        if !self.start.fields_in_range() {
            return Err(SubtitleError::InvalidTimestamp {
                entry: self.seq_num,
                reason: format!("start time {} has out-of-range fields", self.start),
            });
        }
        if !self.end.fields_in_range() {
            return Err(SubtitleError::InvalidTimestamp {
                entry: self.seq_num,
                reason: format!("end time {} has out-of-range fields", self.end),
            });
        }
        if self.start > self.end {
            return Err(SubtitleError::InvalidTimestamp {
                entry: self.seq_num,
                reason: format!("start time {} is after end time {}", self.start, self.end),
            });
        }
        Ok(())
    }
}

/// An ordered subtitle document.
///
/// Entry order is display order as it appeared in the source; the codec never
/// re-sorts by timestamp. An empty document is valid and distinct from no
/// document at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleDocument {
    /// Cues in display order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleDocument {
    /// Create an empty document
    pub fn new() -> Self {
        SubtitleDocument { entries: Vec::new() }
    }

    /// Number of cues
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no cues
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total translatable characters, counted as Unicode scalar values
    pub fn char_count(&self) -> u64 {
        self.entries.iter().map(|e| e.text.chars().count() as u64).sum()
    }

    /// Cue texts in document order
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }

    /// Parse raw SRT text into a document.
    ///
    /// Blocks are separated by one or more blank lines; each block is an index
    /// line, a timestamp line, and the cue text lines. Index values from the
    /// input are validated to be positive integers but addressing is
    /// positional. Tolerates CRLF input and trailing blank lines.
    pub fn parse(raw: &str) -> Result<SubtitleDocument, SubtitleError> {
        let lines: Vec<&str> = raw.lines().collect();
        let mut entries: Vec<SubtitleEntry> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }

            // Index line
            let index_line = i + 1;
            let index_text = lines[i].trim();
            let index: u64 = index_text.parse().map_err(|_| SubtitleError::Malformed {
                line: index_line,
                reason: format!("expected a cue index, found {:?}", index_text),
            })?;
            if index == 0 {
                return Err(SubtitleError::Malformed {
                    line: index_line,
                    reason: "cue index must be a positive integer".to_string(),
                });
            }
            i += 1;

            // Timestamp line
            if i >= lines.len() || lines[i].trim().is_empty() {
                return Err(SubtitleError::Malformed {
                    line: index_line,
                    reason: format!("cue {} is missing its timestamp line", index),
                });
            }
            let ts_line = i + 1;
            let ts_text = lines[i].trim();
            if !ts_text.contains("-->") {
                return Err(SubtitleError::Malformed {
                    line: ts_line,
                    reason: format!("cue {} is missing its timestamp line", index),
                });
            }
            let caps = TIMESTAMP_LINE_REGEX.captures(ts_text).ok_or_else(|| {
                SubtitleError::Malformed {
                    line: ts_line,
                    reason: "timestamp line cannot be split into start and end times".to_string(),
                }
            })?;
            let seq_num = entries.len() + 1;
            let start = Self::timestamp_from_captures(&caps, 1, seq_num)?;
            let end = Self::timestamp_from_captures(&caps, 5, seq_num)?;
            i += 1;

            // Text lines until the next blank line
            let mut text_lines: Vec<&str> = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() {
                text_lines.push(lines[i]);
                i += 1;
            }

            let entry = SubtitleEntry::new(seq_num, start, end, text_lines.join("\n"));
            entry.validate()?;
            entries.push(entry);
        }

        Ok(SubtitleDocument { entries })
    }

    /// Serialize the document to SRT text.
    ///
    /// Indices are re-numbered 1..N in document order and every block is
    /// followed by a blank line. Fails only if an entry violates the cue
    /// invariants, which a well-behaved session never lets through.
    pub fn to_srt_string(&self) -> Result<String, SubtitleError> {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            entry.validate()?;
            out.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                i + 1,
                entry.start,
                entry.end,
                entry.text
            ));
        }
        Ok(out)
    }

    /// Pull one timestamp out of a matched timestamp line
    fn timestamp_from_captures(
        caps: &regex::Captures<'_>,
        start_idx: usize,
        entry: usize,
    ) -> Result<SrtTimestamp, SubtitleError> {
        let mut fields = [0u32; 4];
        for (offset, field) in fields.iter_mut().enumerate() {
            let digits = caps
                .get(start_idx + offset)
                .map(|m| m.as_str())
                .unwrap_or_default();
            *field = digits.parse().map_err(|_| SubtitleError::InvalidTimestamp {
                entry,
                reason: format!("timestamp field {:?} is out of range", digits),
            })?;
        }
        Ok(SrtTimestamp::new(fields[0], fields[1], fields[2], fields[3]))
    }
}
