//! Lazy event parser.
//!
//! [`Events`] pulls one line at a time from its input and yields a `Format`
//! event for the header, one `Element` event per element line and a final
//! `End` event. Everything after `DATEIENDE` is never read. Header
//! violations are returned as the first item, after which the iterator is
//! exhausted.
//!
//! ```no_run
//! use dsv7::parser::{self, ParseEvent};
//!
//! let content = "FORMAT:Vereinsmeldeliste;7;\nVEREIN:SV Hansa;1234;17;GER;\nDATEIENDE\n";
//! for event in parser::parse_vereinsmeldeliste(content)? {
//!     if let ParseEvent::Element { element, line } = event? {
//!         println!("{line}: {}", element.name);
//!     }
//! }
//! # Ok::<(), dsv7::Dsv7Error>(())
//! ```

use std::io::BufRead;
use std::iter::FusedIterator;

use serde::Serialize;
use tracing::debug;

use crate::error::{Dsv7Error, Result};
use crate::input::Input;
use crate::lex::{Element, FormatHeader, parse_element, parse_format};
use crate::list_type::ListType;
use crate::stream::{self, Lines};

/// A structural event with the 1-based line it was observed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ParseEvent {
    Format {
        #[serde(flatten)]
        header: FormatHeader,
        line: usize,
    },
    Element {
        #[serde(flatten)]
        element: Element,
        line: usize,
    },
    End {
        line: usize,
    },
}

impl ParseEvent {
    pub fn line(&self) -> usize {
        match self {
            ParseEvent::Format { line, .. }
            | ParseEvent::Element { line, .. }
            | ParseEvent::End { line } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingFormat,
    InBody,
    Done,
}

/// Iterator over the events of one input.
pub struct Events {
    // None once the source is no longer needed
    lines: Option<Lines<Box<dyn BufRead>>>,
    expected: Option<ListType>,
    state: State,
    last_line: usize,
}

impl Events {
    fn new(input: Input, expected: Option<ListType>) -> Result<Self> {
        let source = input.open()?;
        // BOMs are tolerated here
        let (reader, _) = stream::take_bom(source.reader)?;
        Ok(Self {
            lines: Some(Lines::new(reader)),
            expected,
            state: State::AwaitingFormat,
            last_line: 0,
        })
    }

    /// Release the source and emit the closing event.
    fn end(&mut self, line: usize) -> Option<Result<ParseEvent>> {
        self.lines = None;
        self.state = State::Done;
        Some(Ok(ParseEvent::End { line }))
    }

    fn fail(&mut self, error: Dsv7Error) -> Option<Result<ParseEvent>> {
        self.lines = None;
        self.state = State::Done;
        Some(Err(error))
    }

    fn read_header(&self, content: &str, line: usize) -> Result<ParseEvent> {
        let header = parse_format(content).ok_or(Dsv7Error::MalformedHeader { line })?;

        match self.expected {
            Some(expected) if header.list_type != expected.as_str() => {
                return Err(Dsv7Error::UnexpectedListType {
                    list_type: header.list_type,
                    parser: expected.short_name(),
                });
            }
            Some(_) => {}
            None => {
                header.list_type.parse::<ListType>()?;
            }
        }

        if header.version != "7" {
            return Err(Dsv7Error::UnsupportedVersion {
                version: header.version,
            });
        }

        debug!("Parsing {} from line {}", header.list_type, line);
        Ok(ParseEvent::Format { header, line })
    }
}

impl Iterator for Events {
    type Item = Result<ParseEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == State::Done {
                return None;
            }

            let next_line = self.lines.as_mut().and_then(Iterator::next);
            let raw = match next_line {
                None => return self.end(self.last_line),
                Some(Err(e)) => return self.fail(e.into()),
                Some(Ok(raw)) => raw,
            };

            let content = stream::effective_content(&raw.text);
            if content.is_empty() {
                continue;
            }
            self.last_line = raw.number;

            if self.state == State::AwaitingFormat {
                return match self.read_header(&content, raw.number) {
                    Ok(event) => {
                        self.state = State::InBody;
                        Some(Ok(event))
                    }
                    Err(e) => self.fail(e),
                };
            }

            if content == "DATEIENDE" {
                return self.end(raw.number);
            }

            if let Some(element) = parse_element(&content) {
                return Some(Ok(ParseEvent::Element {
                    element,
                    line: raw.number,
                }));
            }
        }
    }
}

impl FusedIterator for Events {}

/// Parse any of the four list types.
pub fn parse(input: impl Into<Input>) -> Result<Events> {
    Events::new(input.into(), None)
}

/// Parse, requiring the FORMAT line to declare `list_type`.
pub fn parse_list(input: impl Into<Input>, list_type: ListType) -> Result<Events> {
    Events::new(input.into(), Some(list_type))
}

pub fn parse_wettkampfdefinitionsliste(input: impl Into<Input>) -> Result<Events> {
    parse_list(input, ListType::Wettkampfdefinitionsliste)
}

pub fn parse_vereinsmeldeliste(input: impl Into<Input>) -> Result<Events> {
    parse_list(input, ListType::Vereinsmeldeliste)
}

pub fn parse_wettkampfergebnisliste(input: impl Into<Input>) -> Result<Events> {
    parse_list(input, ListType::Wettkampfergebnisliste)
}

pub fn parse_vereinsergebnisliste(input: impl Into<Input>) -> Result<Events> {
    parse_list(input, ListType::Vereinsergebnisliste)
}
