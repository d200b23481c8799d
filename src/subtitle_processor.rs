use std::fmt;
use std::fs;
use std::path::Path;
use anyhow::{Result, anyhow, Context};
use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

// @module: SRT parsing, serialization and plain-text projection

// @const: Strict SRT time-range line, e.g. "00:01:02,345 --> 00:01:04,000".
// Anything looser (wrong digit counts, missing spaces around the arrow)
// routes the whole block to the raw pass-through path.
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// A subtitle timestamp with millisecond precision.
///
/// The wire form is fixed-width `HH:MM:SS,mmm`, so a value parsed from a
/// matching line formats back byte-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from a raw millisecond value
    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    /// Total milliseconds since 00:00:00,000
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Parse a strict `HH:MM:SS,mmm` timestamp
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split(&[':', ','][..]).collect();
        if parts.len() != 4 || !parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
            return Err(anyhow!("Invalid timestamp format: {}", text));
        }
        if parts[0].len() != 2 || parts[1].len() != 2 || parts[2].len() != 2 || parts[3].len() != 3 {
            return Err(anyhow!("Invalid timestamp format: {}", text));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        Ok(Timestamp(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ms = self.0;
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;
        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

/// A single subtitle cue: index line, time range and text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    /// The cue's index line, kept opaque. It is copied through verbatim and
    /// never parsed into an integer, so non-contiguous or non-numeric
    /// indices survive a round trip untouched.
    pub index: String,

    /// Cue start time
    pub start: Timestamp,

    /// Cue end time
    pub end: Timestamp,

    /// Text lines, trimmed. Zero lines is a valid empty cue.
    pub lines: Vec<String>,
}

impl SubtitleCue {
    /// Create a new cue
    pub fn new(index: impl Into<String>, start: Timestamp, end: Timestamp, lines: Vec<String>) -> Self {
        SubtitleCue {
            index: index.into(),
            start,
            end,
            lines,
        }
    }

    /// Join the cue's text lines into one string, skipping empty lines.
    ///
    /// This is the unit handed to translation: one string per cue gives the
    /// provider sentence-level context that per-line fragments would not.
    pub fn joined_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the cue's time range is ordered (start <= end).
    ///
    /// The parser passes malformed ranges through; callers that care about
    /// correctness check here before handing the document downstream.
    pub fn has_ordered_times(&self) -> bool {
        self.start <= self.end
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// A block that failed to parse as a cue, preserved verbatim.
///
/// Upstream SRT producers occasionally emit non-standard blocks; failing the
/// whole document on one bad block is unacceptable, so these are carried
/// through untouched and re-emitted at their original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// The block's lines, exactly as read
    pub lines: Vec<String>,
}

/// One entry of a subtitle document: a parsed cue or an opaque raw block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEntry {
    /// A well-formed subtitle cue
    Cue(SubtitleCue),
    /// An unparseable block passed through verbatim
    Raw(RawBlock),
}

/// An ordered sequence of subtitle entries with a declared source language.
///
/// A document is built once per parse call and never mutated in place;
/// transforms such as translation construct a new document.
#[derive(Debug, Clone)]
pub struct SubtitleDocument {
    /// Entries in original file order
    pub entries: Vec<BlockEntry>,

    /// Declared language of the cue text (ISO 639-1 short code)
    pub source_language: String,
}

// Parser states for the line-oriented state machine.
enum ParseState {
    /// Between blocks, waiting for an index line
    ExpectIndexOrBlank,
    /// Saw the index line, next line decides cue vs raw block
    ExpectTimeRange { index: String },
    /// Inside a well-formed cue, accumulating text lines
    CollectingText { cue: SubtitleCue },
    /// Inside a malformed block, copying lines through
    CollectingRaw { lines: Vec<String> },
}

impl SubtitleDocument {
    /// Create an empty document
    pub fn new(source_language: impl Into<String>) -> Self {
        SubtitleDocument {
            entries: Vec::new(),
            source_language: source_language.into(),
        }
    }

    /// Parse raw SRT text into a document.
    ///
    /// Blocks are separated by one or more blank lines; a trailing block
    /// without a final blank line is still flushed. A block whose second
    /// line is not a strict time range becomes a [`RawBlock`]. Parsing never
    /// fails: empty input yields an empty document.
    pub fn parse(content: &str, source_language: &str) -> Self {
        let mut document = SubtitleDocument::new(source_language);
        let mut state = ParseState::ExpectIndexOrBlank;

        for line in content.lines() {
            let blank = line.trim().is_empty();

            state = match state {
                ParseState::ExpectIndexOrBlank => {
                    if blank {
                        ParseState::ExpectIndexOrBlank
                    } else {
                        ParseState::ExpectTimeRange { index: line.to_string() }
                    }
                }
                ParseState::ExpectTimeRange { index } => {
                    if blank {
                        // Single-line block: no time range, so it is raw
                        document.entries.push(BlockEntry::Raw(RawBlock { lines: vec![index] }));
                        ParseState::ExpectIndexOrBlank
                    } else if let Some(caps) = TIME_RANGE_REGEX.captures(line.trim()) {
                        let start = Self::timestamp_from_captures(&caps, 1);
                        let end = Self::timestamp_from_captures(&caps, 5);
                        ParseState::CollectingText {
                            cue: SubtitleCue::new(index, start, end, Vec::new()),
                        }
                    } else {
                        ParseState::CollectingRaw { lines: vec![index, line.to_string()] }
                    }
                }
                ParseState::CollectingText { mut cue } => {
                    if blank {
                        document.entries.push(BlockEntry::Cue(cue));
                        ParseState::ExpectIndexOrBlank
                    } else {
                        cue.lines.push(line.trim().to_string());
                        ParseState::CollectingText { cue }
                    }
                }
                ParseState::CollectingRaw { mut lines } => {
                    if blank {
                        document.entries.push(BlockEntry::Raw(RawBlock { lines }));
                        ParseState::ExpectIndexOrBlank
                    } else {
                        lines.push(line.to_string());
                        ParseState::CollectingRaw { lines }
                    }
                }
            };
        }

        // Flush a trailing block not followed by a blank line
        match state {
            ParseState::ExpectIndexOrBlank => {}
            ParseState::ExpectTimeRange { index } => {
                document.entries.push(BlockEntry::Raw(RawBlock { lines: vec![index] }));
            }
            ParseState::CollectingText { cue } => {
                document.entries.push(BlockEntry::Cue(cue));
            }
            ParseState::CollectingRaw { lines } => {
                document.entries.push(BlockEntry::Raw(RawBlock { lines }));
            }
        }

        debug!(
            "Parsed {} entries ({} cues, {} raw blocks)",
            document.entries.len(),
            document.cue_count(),
            document.entries.len() - document.cue_count()
        );

        document
    }

    /// Parse raw bytes as SRT, replacing invalid UTF-8 sequences.
    ///
    /// Subtitle files come in whatever encoding the producer felt like;
    /// decoding is lossy-tolerant rather than fatal.
    pub fn parse_bytes(bytes: &[u8], source_language: &str) -> Self {
        let content = String::from_utf8_lossy(bytes);
        Self::parse(&content, source_language)
    }

    /// Read and parse an SRT file from disk
    pub fn read_from_file<P: AsRef<Path>>(path: P, source_language: &str) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        Ok(Self::parse_bytes(&bytes, source_language))
    }

    /// Serialize the document back to SRT text.
    ///
    /// Cues emit index line, time range, each text line, then one blank line;
    /// raw blocks emit their stored lines verbatim, then one blank line.
    /// Zero entries yields an empty string.
    pub fn to_srt_string(&self) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            match entry {
                BlockEntry::Cue(cue) => {
                    output.push_str(&cue.index);
                    output.push('\n');
                    output.push_str(&cue.start.to_string());
                    output.push_str(" --> ");
                    output.push_str(&cue.end.to_string());
                    output.push('\n');
                    for line in &cue.lines {
                        output.push_str(line);
                        output.push('\n');
                    }
                    output.push('\n');
                }
                BlockEntry::Raw(raw) => {
                    for line in &raw.lines {
                        output.push_str(line);
                        output.push('\n');
                    }
                    output.push('\n');
                }
            }
        }
        output
    }

    /// Write the document to an SRT file, creating parent directories
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, self.to_srt_string())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))
    }

    /// Iterate over the parsed cues, skipping raw blocks
    pub fn cues(&self) -> impl Iterator<Item = &SubtitleCue> {
        self.entries.iter().filter_map(|e| match e {
            BlockEntry::Cue(cue) => Some(cue),
            BlockEntry::Raw(_) => None,
        })
    }

    /// Number of parsed cues (raw blocks excluded)
    pub fn cue_count(&self) -> usize {
        self.cues().count()
    }

    /// Whether the document has no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count cues whose end time precedes their start time.
    ///
    /// The parser deliberately passes these through; callers that feed the
    /// document to a renderer may want to warn first.
    pub fn unordered_cue_count(&self) -> usize {
        self.cues().filter(|c| !c.has_ordered_times()).count()
    }

    fn timestamp_from_captures(caps: &regex::Captures, start_idx: usize) -> Timestamp {
        let field = |idx: usize| -> u64 {
            caps.get(idx).map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };
        let hours = field(start_idx);
        let minutes = field(start_idx + 1);
        let seconds = field(start_idx + 2);
        let millis = field(start_idx + 3);
        Timestamp((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Document")?;
        writeln!(f, "Language: {}", self.source_language)?;
        writeln!(f, "Entries: {} ({} cues)", self.entries.len(), self.cue_count())?;
        Ok(())
    }
}

/// Project raw SRT text to a plain transcript with no indices or timings.
///
/// Each cue's text lines are joined with single spaces into one paragraph;
/// paragraphs are separated by a blank line. This works over the raw text
/// rather than a parsed document on purpose: it filters numeric and
/// time-range lines itself, so already-broken files still project to
/// something readable. Lossy and one-way.
pub fn srt_to_plain_text(content: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !block.is_empty() {
                paragraphs.push(block.join(" "));
                block.clear();
            }
            continue;
        }
        if is_numeric_line(trimmed) || TIME_RANGE_REGEX.is_match(trimmed) {
            continue;
        }
        block.push(trimmed);
    }
    if !block.is_empty() {
        paragraphs.push(block.join(" "));
    }

    paragraphs.join("\n\n").trim().to_string()
}

fn is_numeric_line(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}
