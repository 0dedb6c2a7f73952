//! Markup namespaces known to Sieve.
//!
//! Every [`NamespaceId`] has three spellings:
//!
//! - a canonical URI, used as the namespace identity in emitted policy documents;
//! - a short list prefix such as `svg:`, used in human-readable reference lists;
//! - a DSL keyword such as `svg`, used to qualify entries in source lists.
//!
//! The table is fixed. Anything outside it is rejected with [`UnknownNamespace`].

use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

/// Error returned when a URI, prefix, or keyword does not name a known namespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown namespace `{0}`")]
pub struct UnknownNamespace(pub String);

/// A markup vocabulary an element or attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamespaceId {
    /// The HTML namespace.
    #[default]
    Default,
    Svg,
    MathMl,
    XLink,
    Xml,
    Xmlns,
}

impl NamespaceId {
    /// All namespaces, in declaration order.
    pub const ALL: [NamespaceId; 6] = [
        NamespaceId::Default,
        NamespaceId::Svg,
        NamespaceId::MathMl,
        NamespaceId::XLink,
        NamespaceId::Xml,
        NamespaceId::Xmlns,
    ];

    /// Returns the canonical namespace URI.
    pub fn uri(self) -> &'static str {
        match self {
            NamespaceId::Default => "http://www.w3.org/1999/xhtml",
            NamespaceId::Svg => "http://www.w3.org/2000/svg",
            NamespaceId::MathMl => "http://www.w3.org/1998/Math/MathML",
            NamespaceId::XLink => "http://www.w3.org/1999/xlink",
            NamespaceId::Xml => "http://www.w3.org/XML/1998/namespace",
            NamespaceId::Xmlns => "http://www.w3.org/2000/xmlns/",
        }
    }

    /// Returns the prefix used in joined reference lists (empty for HTML).
    pub fn prefix(self) -> &'static str {
        match self {
            NamespaceId::Default => "",
            NamespaceId::Svg => "svg:",
            NamespaceId::MathMl => "mathml:",
            NamespaceId::XLink => "xlink:",
            NamespaceId::Xml => "xml:",
            NamespaceId::Xmlns => "xmlns:",
        }
    }

    /// Returns the keyword that qualifies an entry in a source list.
    ///
    /// The HTML namespace is implied by a bare name and has no keyword.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            NamespaceId::Default => None,
            NamespaceId::Svg => Some("svg"),
            NamespaceId::MathMl => Some("math"),
            NamespaceId::XLink => Some("xlink"),
            NamespaceId::Xml => Some("xml"),
            NamespaceId::Xmlns => Some("xmlns"),
        }
    }

    /// Whether this namespace may qualify an element line.
    pub fn qualifies_elements(self) -> bool {
        matches!(self, NamespaceId::Svg | NamespaceId::MathMl)
    }

    /// Whether this namespace may qualify an attribute line.
    pub fn qualifies_attributes(self) -> bool {
        matches!(
            self,
            NamespaceId::XLink | NamespaceId::Xml | NamespaceId::Xmlns
        )
    }

    /// Looks up a namespace by URI. The empty string is the HTML namespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_core::namespace::NamespaceId;
    ///
    /// assert_eq!(NamespaceId::from_uri(""), Ok(NamespaceId::Default));
    /// assert_eq!(
    ///     NamespaceId::from_uri("http://www.w3.org/2000/svg"),
    ///     Ok(NamespaceId::Svg)
    /// );
    /// assert!(NamespaceId::from_uri("urn:nope").is_err());
    /// ```
    pub fn from_uri(uri: &str) -> Result<Self, UnknownNamespace> {
        if uri.is_empty() {
            return Ok(NamespaceId::Default);
        }
        Self::ALL
            .into_iter()
            .find(|ns| ns.uri() == uri)
            .ok_or_else(|| UnknownNamespace(uri.to_string()))
    }

    /// Looks up a namespace by its source-list keyword.
    pub fn from_keyword(keyword: &str) -> Result<Self, UnknownNamespace> {
        Self::ALL
            .into_iter()
            .find(|ns| ns.keyword() == Some(keyword))
            .ok_or_else(|| UnknownNamespace(keyword.to_string()))
    }
}

/// Parses a URI or a keyword.
impl FromStr for NamespaceId {
    type Err = UnknownNamespace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uri(s).or_else(|_| Self::from_keyword(s))
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

impl PartialOrd for NamespaceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical order compares namespace URIs.
impl Ord for NamespaceId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uri().cmp(other.uri())
    }
}
