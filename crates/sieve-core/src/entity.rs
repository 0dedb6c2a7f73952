//! Named elements and attributes.
//!
//! A [`NamedEntity`] is a name qualified by an optional [`NamespaceId`]. Its
//! identity is the `(namespace, name)` pair compared byte for byte; this is
//! what deduplication and global-set membership test against.

use std::{cmp::Ordering, fmt};

use crate::namespace::NamespaceId;

/// A name with an optional namespace.
///
/// `namespace == None` means the entity applies as given, regardless of
/// namespace. This is how plain attribute names are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedEntity {
    name: String,
    namespace: Option<NamespaceId>,
}

impl NamedEntity {
    /// Creates an entity with the given namespace.
    pub fn new(name: impl Into<String>, namespace: Option<NamespaceId>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Creates a namespace-agnostic entity.
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Creates an entity in the given namespace.
    pub fn qualified(name: impl Into<String>, namespace: NamespaceId) -> Self {
        Self::new(name, Some(namespace))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<NamespaceId> {
        self.namespace
    }
}

impl PartialOrd for NamedEntity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical order: agnostic entities first, then by namespace URI, then by name.
impl Ord for NamedEntity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace
            .cmp(&other.namespace)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for NamedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            Some(ns) => write!(f, "{}{}", ns.prefix(), self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// An attribute allowed globally or on one element.
pub type AttributeEntry = NamedEntity;

/// An allowed element together with the attributes it owns.
///
/// `attributes` and `remove_attributes` are plain sequences; the parser appends
/// positionally and normalization turns them into duplicate-free sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRecord {
    entity: NamedEntity,
    attributes: Vec<AttributeEntry>,
    remove_attributes: Vec<AttributeEntry>,
}

impl ElementRecord {
    /// Creates a record with no attributes.
    pub fn new(entity: NamedEntity) -> Self {
        Self {
            entity,
            attributes: Vec::new(),
            remove_attributes: Vec::new(),
        }
    }

    /// Creates a record with the given attribute and removal sequences.
    pub fn with_attributes(
        entity: NamedEntity,
        attributes: Vec<AttributeEntry>,
        remove_attributes: Vec<AttributeEntry>,
    ) -> Self {
        Self {
            entity,
            attributes,
            remove_attributes,
        }
    }

    pub fn entity(&self) -> &NamedEntity {
        &self.entity
    }

    /// Attributes allowed on this element only.
    pub fn attributes(&self) -> &[AttributeEntry] {
        &self.attributes
    }

    /// Attributes this element asks to have removed.
    pub fn remove_attributes(&self) -> &[AttributeEntry] {
        &self.remove_attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Vec<AttributeEntry> {
        &mut self.attributes
    }

    pub fn remove_attributes_mut(&mut self) -> &mut Vec<AttributeEntry> {
        &mut self.remove_attributes
    }

    /// Whether the record reduces to its bare name: an HTML element with no
    /// local attributes and no removal directives.
    pub fn is_compactable(&self) -> bool {
        self.entity.namespace() == Some(NamespaceId::Default)
            && self.attributes.is_empty()
            && self.remove_attributes.is_empty()
    }

    /// Splits the record into its parts.
    pub fn into_parts(self) -> (NamedEntity, Vec<AttributeEntry>, Vec<AttributeEntry>) {
        (self.entity, self.attributes, self.remove_attributes)
    }
}
