//! The policy document assembled from a source list.

use serde::Deserialize;

use crate::entity::{AttributeEntry, ElementRecord};

/// Boolean switches carried verbatim into the emitted policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentFlags {
    /// Whether comments are allowed.
    pub comments: bool,
    /// Whether `data-*` attributes are allowed.
    pub data_attributes: bool,
}

/// An allow-list policy.
///
/// Right after parsing a document may hold duplicates and attributes that are
/// both global and local. After normalization no identity appears twice in any
/// collection and no element-local attribute is also global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<ElementRecord>,
    global_attributes: Vec<AttributeEntry>,
    remove_attributes: Vec<AttributeEntry>,
    flags: DocumentFlags,
}

impl Document {
    /// Creates an empty document with the given flags.
    pub fn new(flags: DocumentFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    /// Creates a document from its parts.
    pub fn from_parts(
        elements: Vec<ElementRecord>,
        global_attributes: Vec<AttributeEntry>,
        remove_attributes: Vec<AttributeEntry>,
        flags: DocumentFlags,
    ) -> Self {
        Self {
            elements,
            global_attributes,
            remove_attributes,
            flags,
        }
    }

    pub fn elements(&self) -> &[ElementRecord] {
        &self.elements
    }

    /// Attributes allowed on every element.
    pub fn global_attributes(&self) -> &[AttributeEntry] {
        &self.global_attributes
    }

    /// Attributes removed from every element.
    pub fn remove_attributes(&self) -> &[AttributeEntry] {
        &self.remove_attributes
    }

    pub fn flags(&self) -> DocumentFlags {
        self.flags
    }

    pub fn elements_mut(&mut self) -> &mut Vec<ElementRecord> {
        &mut self.elements
    }

    pub fn global_attributes_mut(&mut self) -> &mut Vec<AttributeEntry> {
        &mut self.global_attributes
    }

    pub fn remove_attributes_mut(&mut self) -> &mut Vec<AttributeEntry> {
        &mut self.remove_attributes
    }

    /// Splits the document into its parts.
    pub fn into_parts(
        self,
    ) -> (
        Vec<ElementRecord>,
        Vec<AttributeEntry>,
        Vec<AttributeEntry>,
        DocumentFlags,
    ) {
        (
            self.elements,
            self.global_attributes,
            self.remove_attributes,
            self.flags,
        )
    }
}
