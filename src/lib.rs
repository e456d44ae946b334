//! # dsv7 Library
//!
//! Validation and streaming parsing of DSV7 files, the line-oriented
//! exchange format of the German swimming federation. Four list types are
//! supported: Wettkampfdefinitionsliste, Vereinsmeldeliste,
//! Wettkampfergebnisliste and Vereinsergebnisliste.
//!
//! [`validate`] collects every problem of an input into a
//! [`ValidationResult`]; the [`parser`] functions yield [`ParseEvent`]s
//! lazily without validating content.

pub mod cardinality;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_discovery;
pub mod input;
pub mod lex;
pub mod list_type;
pub mod output;
pub mod parser;
pub mod result;
pub mod runner;
pub mod schema;
mod schema_tables;
pub mod stream;
pub mod types;
pub mod validator;

pub use config::{Config, ConfigError, ConfigManager};
pub use error::{Dsv7Error, Result};
pub use input::Input;
pub use lex::{Element, FormatHeader};
pub use list_type::ListType;
pub use parser::{
    Events, ParseEvent, parse, parse_list, parse_vereinsergebnisliste, parse_vereinsmeldeliste,
    parse_wettkampfdefinitionsliste, parse_wettkampfergebnisliste,
};
pub use result::ValidationResult;
pub use runner::{FileValidationResult, Runner, ValidationResults, ValidationStatus};
pub use validator::{Validator, validate};
