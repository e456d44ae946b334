//! The four DSV7 list types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Dsv7Error;

/// Record kind declared in the `FORMAT` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListType {
    Wettkampfdefinitionsliste,
    Vereinsmeldeliste,
    Wettkampfergebnisliste,
    Vereinsergebnisliste,
}

impl ListType {
    pub const ALL: [ListType; 4] = [
        ListType::Wettkampfdefinitionsliste,
        ListType::Vereinsmeldeliste,
        ListType::Wettkampfergebnisliste,
        ListType::Vereinsergebnisliste,
    ];

    /// Name as written in the `FORMAT` line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Wettkampfdefinitionsliste => "Wettkampfdefinitionsliste",
            ListType::Vereinsmeldeliste => "Vereinsmeldeliste",
            ListType::Wettkampfergebnisliste => "Wettkampfergebnisliste",
            ListType::Vereinsergebnisliste => "Vereinsergebnisliste",
        }
    }

    /// Abbreviation used in parser diagnostics.
    pub fn short_name(&self) -> &'static str {
        match self {
            ListType::Wettkampfdefinitionsliste => "WKDL",
            ListType::Vereinsmeldeliste => "VML",
            ListType::Wettkampfergebnisliste => "ERG",
            ListType::Vereinsergebnisliste => "VRL",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListType {
    type Err = Dsv7Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListType::ALL
            .into_iter()
            .find(|lt| lt.as_str() == s)
            .ok_or_else(|| Dsv7Error::UnknownListType {
                list_type: s.to_string(),
            })
    }
}
