//! Line-level normalization shared by the validator and the parser.
//!
//! Lines are split on `\n` as raw bytes, stripped of the line terminator
//! and decoded as UTF-8. Invalid sequences are replaced with U+FFFD so that
//! nothing downstream has to deal with undecodable text.

use std::borrow::Cow;
use std::io::{self, BufRead, Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;

/// UTF-8 byte order mark.
pub const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

const COMMENT_OPEN: &str = "(*";
const COMMENT_CLOSE: &str = "*)";

static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_comment_regex() -> &'static Regex {
    COMMENT_REGEX
        .get_or_init(|| Regex::new(r"\(\*.*?\*\)").expect("Failed to compile comment regex"))
}

/// Consume a leading BOM if there is one.
///
/// Returns the reader to continue from and whether a BOM was found. When the
/// first bytes are not a BOM they are put back in front of the stream.
pub fn take_bom(mut reader: Box<dyn BufRead>) -> io::Result<(Box<dyn BufRead>, bool)> {
    let mut head = Vec::with_capacity(BOM.len());
    reader.by_ref().take(BOM.len() as u64).read_to_end(&mut head)?;

    if head == BOM {
        return Ok((reader, true));
    }

    Ok((Box::new(Cursor::new(head).chain(reader)), false))
}

/// One physical line after terminator removal and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based physical line number.
    pub number: usize,
    pub text: String,
    /// The bytes were not valid UTF-8 and have been scrubbed.
    pub invalid_utf8: bool,
    /// The line ended with `\r\n`.
    pub crlf: bool,
}

/// Strip one trailing `\n`, then one trailing `\r`, and decode as UTF-8.
///
/// The flag is set when the bytes had to be scrubbed.
pub fn sanitize_line(raw: &[u8]) -> (String, bool) {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

    match std::str::from_utf8(raw) {
        Ok(text) => (text.to_string(), false),
        Err(_) => (String::from_utf8_lossy(raw).into_owned(), true),
    }
}

/// Iterator over the physical lines of a reader.
pub struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            number: 0,
        }
    }

    /// Number of the last line returned, 0 before the first.
    pub fn line_number(&self) -> usize {
        self.number
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.number += 1;
                let crlf = self.buf.ends_with(b"\r\n");
                let (text, invalid_utf8) = sanitize_line(&self.buf);
                Some(Ok(RawLine {
                    number: self.number,
                    text,
                    invalid_utf8,
                    crlf,
                }))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Remove every `(* ... *)` span. The first `*)` closes the nearest `(*`.
///
/// Removal repeats until nothing matches, so markers joined by an inner
/// removal (`((* x *)* y *)`) are stripped as well.
pub fn strip_inline_comments(line: &str) -> Cow<'_, str> {
    let regex = get_comment_regex();
    let mut stripped = match regex.replace_all(line, "") {
        Cow::Borrowed(_) => return Cow::Borrowed(line),
        Cow::Owned(text) => text,
    };
    loop {
        let next = match regex.replace_all(&stripped, "") {
            Cow::Borrowed(_) => break,
            Cow::Owned(text) => text,
        };
        stripped = next;
    }
    Cow::Owned(stripped)
}

/// Trim ASCII whitespace and NUL, leaving other Unicode spaces in place.
pub fn trim_line(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0')
}

/// Whether the line has as many `(*` as `*)` markers.
pub fn comments_balanced(line: &str) -> bool {
    line.matches(COMMENT_OPEN).count() == line.matches(COMMENT_CLOSE).count()
}

/// Comment-stripped, trimmed content of a line. Empty for lines that are
/// not effective.
pub fn effective_content(line: &str) -> String {
    trim_line(&strip_inline_comments(line)).to_string()
}
