//! Schema-driven attribute validation.
//!
//! A [`SchemaTable`] maps element names of one list type to their ordered
//! attribute specs. All tables are interpreted by the same routine,
//! [`SchemaTable::validate_element`]. Elements without an entry are ignored
//! so that list types can share a superset vocabulary.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::lex::Element;
use crate::list_type::ListType;
use crate::schema_tables;
use crate::types::AttrType;

/// Type and presence requirement of one attribute position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    pub ty: AttrType,
    pub required: bool,
}

/// Required attribute.
pub const fn req(ty: AttrType) -> AttrSpec {
    AttrSpec { ty, required: true }
}

/// Optional attribute.
pub const fn opt(ty: AttrType) -> AttrSpec {
    AttrSpec {
        ty,
        required: false,
    }
}

/// A rule looking at several attributes of one element line.
pub type CrossRule = fn(&Element, usize) -> Option<String>;

#[derive(Debug)]
pub struct SchemaTable {
    list_type: ListType,
    elements: HashMap<&'static str, &'static [AttrSpec]>,
    cross_rule: Option<CrossRule>,
}

impl SchemaTable {
    pub(crate) fn new(
        list_type: ListType,
        entries: &[(&'static str, &'static [AttrSpec])],
        cross_rule: Option<CrossRule>,
    ) -> Self {
        Self {
            list_type,
            elements: entries.iter().copied().collect(),
            cross_rule,
        }
    }

    pub fn list_type(&self) -> ListType {
        self.list_type
    }

    pub fn get(&self, name: &str) -> Option<&'static [AttrSpec]> {
        self.elements.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// Check one element line, appending diagnostics to `errors`.
    pub fn validate_element(&self, element: &Element, line: usize, errors: &mut Vec<String>) {
        let Some(specs) = self.get(&element.name) else {
            return;
        };
        let name = element.name.as_str();

        if element.attrs.len() != specs.len() {
            errors.push(format!(
                "Element {name}: expected {} attributes, got {} (line {line})",
                specs.len(),
                element.attrs.len()
            ));
        }

        for (i, spec) in specs.iter().enumerate() {
            let index = i + 1;
            let value = element.attr(index);
            if value.is_empty() {
                if spec.required {
                    errors.push(format!(
                        "Element {name}: missing required attribute {index} (line {line})"
                    ));
                }
                continue;
            }
            if let Some(message) = spec.ty.check(name, index, value, line) {
                errors.push(message);
            }
        }

        if let Some(rule) = self.cross_rule
            && let Some(message) = rule(element, line)
        {
            errors.push(message);
        }
    }
}

static SCHEMAS: OnceLock<HashMap<ListType, SchemaTable>> = OnceLock::new();

/// The process-wide schema table of a list type.
pub fn schema_for(list_type: ListType) -> &'static SchemaTable {
    let tables = SCHEMAS.get_or_init(|| {
        ListType::ALL
            .into_iter()
            .map(|lt| (lt, schema_tables::build(lt)))
            .collect()
    });
    // every list type gets a table above
    &tables[&list_type]
}
