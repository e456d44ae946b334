//! Splitting of FORMAT and element lines.
//!
//! Both functions are pure and perform no semantic checks.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::stream::trim_line;

static FORMAT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_format_regex() -> &'static Regex {
    FORMAT_REGEX.get_or_init(|| {
        Regex::new(r"^FORMAT:([^;]+);([^;]+);$").expect("Failed to compile FORMAT regex")
    })
}

/// List type and version from a `FORMAT:<Listentyp>;<Version>;` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatHeader {
    pub list_type: String,
    pub version: String,
}

/// An element line split into its name and positional attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<String>,
}

impl Element {
    /// 1-based attribute access. Missing positions read as empty.
    pub fn attr(&self, index: usize) -> &str {
        index
            .checked_sub(1)
            .and_then(|i| self.attrs.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Parse an exact `FORMAT:<A>;<B>;` line.
pub fn parse_format(line: &str) -> Option<FormatHeader> {
    let caps = get_format_regex().captures(line)?;
    Some(FormatHeader {
        list_type: caps[1].to_string(),
        version: caps[2].to_string(),
    })
}

/// Split `NAME:a;b;c;` into name and attributes.
///
/// Interior empty fields are kept; the single empty field produced by the
/// trailing semicolon is dropped.
pub fn parse_element(content: &str) -> Option<Element> {
    let (name, rest) = content.split_once(':')?;
    let mut attrs: Vec<String> = rest.split(';').map(str::to_string).collect();
    if attrs.last().is_some_and(|last| last.is_empty()) {
        attrs.pop();
    }
    Some(Element {
        name: trim_line(name).to_string(),
        attrs,
    })
}
