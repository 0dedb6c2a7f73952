//! Entry resolver: turns classified lines into typed entries.

use sieve_core::{
    entity::{AttributeEntry, ElementRecord, NamedEntity},
    namespace::NamespaceId,
};

use crate::{
    classify::{Classification, Line},
    error::{Diagnostic, ErrorCode, Result},
};

/// A resolved source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Entry {
    /// Switch the current target to the global attribute set.
    StartGlobalSection,
    /// A new element; it becomes the current target.
    Element(ElementRecord),
    /// An attribute allowed on the current target.
    Attribute(AttributeEntry),
    /// An attribute removed from the current target.
    RemoveAttribute(AttributeEntry),
}

/// Where a namespace keyword appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Element,
    Attribute,
}

impl Position {
    fn accepts(self, namespace: NamespaceId) -> bool {
        match self {
            Position::Element => namespace.qualifies_elements(),
            Position::Attribute => namespace.qualifies_attributes(),
        }
    }

    fn help(self) -> &'static str {
        match self {
            Position::Element => "elements can be qualified with `svg` or `math`",
            Position::Attribute => "attributes can be qualified with `xlink`, `xml` or `xmlns`",
        }
    }
}

/// Resolve a classified line into an [`Entry`].
///
/// Returns `Ok(None)` for lines that carry nothing.
///
/// # Errors
///
/// Returns an `E101` diagnostic when a namespace keyword is unknown or not
/// valid in its position.
pub(crate) fn resolve(line: &Line<'_>, classification: Classification<'_>) -> Result<Option<Entry>> {
    let entry = match classification {
        Classification::Skip => return Ok(None),
        Classification::GlobalSectionStart => Entry::StartGlobalSection,
        Classification::AttributeEntry { name } => {
            Entry::Attribute(NamedEntity::unqualified(name))
        }
        Classification::NamespacedAttributeEntry { prefix, name } => {
            let namespace = namespace(line, prefix, Position::Attribute)?;
            Entry::Attribute(NamedEntity::qualified(name, namespace))
        }
        Classification::RemoveAttributeEntry { prefix, name } => {
            let namespace = prefix
                .map(|prefix| namespace(line, prefix, Position::Attribute))
                .transpose()?;
            Entry::RemoveAttribute(NamedEntity::new(name, namespace))
        }
        Classification::ElementEntry { prefix, name } => {
            let namespace = match prefix {
                Some(prefix) => namespace(line, prefix, Position::Element)?,
                None => NamespaceId::Default,
            };
            Entry::Element(ElementRecord::new(NamedEntity::qualified(name, namespace)))
        }
    };
    Ok(Some(entry))
}

/// Look up a namespace keyword for the given position.
fn namespace(line: &Line<'_>, prefix: &str, position: Position) -> Result<NamespaceId> {
    NamespaceId::from_keyword(prefix)
        .ok()
        .filter(|ns| position.accepts(*ns))
        .ok_or_else(|| {
            Diagnostic::error(format!(
                "line {}: unknown namespace prefix `{prefix}`",
                line.number()
            ))
            .with_code(ErrorCode::E101)
            .with_label(line.span_of(prefix), "not a namespace keyword here")
            .with_secondary_label(line.span(), "in this entry")
            .with_help(position.help())
        })
}
