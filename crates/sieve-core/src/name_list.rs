//! Plain name lists tagged with a single namespace.

use crate::namespace::NamespaceId;

/// A sequence of names that all belong to one namespace.
///
/// Name lists feed the joined reference lists and the auxiliary removal list.
/// Unlike source lists, the namespace is fixed for the whole list rather than
/// given per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameList {
    namespace: NamespaceId,
    names: Vec<String>,
}

impl NameList {
    pub fn new(namespace: NamespaceId, names: Vec<String>) -> Self {
        Self { namespace, names }
    }

    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns every name with the namespace's list prefix prepended.
    ///
    /// ```
    /// use sieve_core::{name_list::NameList, namespace::NamespaceId};
    ///
    /// let list = NameList::new(NamespaceId::Svg, vec!["circle".to_string()]);
    /// assert_eq!(list.prefixed().collect::<Vec<_>>(), vec!["svg:circle"]);
    /// ```
    pub fn prefixed(&self) -> impl Iterator<Item = String> + '_ {
        let prefix = self.namespace.prefix();
        self.names.iter().map(move |name| format!("{prefix}{name}"))
    }
}

impl<'a> IntoIterator for &'a NameList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
