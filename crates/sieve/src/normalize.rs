//! Normalization of parsed documents.
//!
//! Source lists are edited by many hands, so a freshly parsed [`Document`]
//! routinely repeats elements, repeats attributes, and lists an attribute on
//! an element that is already allowed globally. [`normalize`] removes all of
//! that so the emitted policy is minimal and deterministic:
//!
//! 1. Deduplicate every collection by `(namespace, name)`. Repeated element
//!    records are merged into the first one. Without `sorted` the first-seen
//!    order is kept; with it, every collection is put in canonical order.
//! 2. Drop element-local attributes that are also global.
//!
//! The remaining two options, [`NormalizeOptions::strip_empty_attribute_lists`]
//! and [`NormalizeOptions::compact_single_elements`], only change how the
//! document is written out and are applied by the emitter.

use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::Deserialize;

use sieve_core::{
    document::Document,
    entity::{AttributeEntry, ElementRecord, NamedEntity},
};

/// Options controlling normalization and the shape of the emitted policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Sort every collection into canonical order instead of first-seen order.
    pub sorted: bool,
    /// Write attribute-less HTML elements and namespace-agnostic attributes
    /// as bare names.
    pub compact_single_elements: bool,
    /// Omit `attributes` fields that are empty.
    pub strip_empty_attribute_lists: bool,
}

/// Normalize a document.
///
/// Normalizing an already normalized document returns it unchanged.
///
/// # Examples
///
/// ```
/// use sieve::normalize::{normalize, NormalizeOptions};
/// use sieve_core::document::DocumentFlags;
///
/// let source = "[Global]\n- id\np\n- id\n- class\np\n";
/// let document = sieve_parser::parse(source, DocumentFlags::default()).unwrap();
/// let document = normalize(document, &NormalizeOptions::default());
///
/// assert_eq!(document.elements().len(), 1);
/// assert_eq!(document.elements()[0].attributes().len(), 1);
/// ```
pub fn normalize(document: Document, options: &NormalizeOptions) -> Document {
    let (elements, global_attributes, remove_attributes, flags) = document.into_parts();
    let element_count = elements.len();

    let global_attributes = canonical(global_attributes, options.sorted);
    let remove_attributes = canonical(remove_attributes, options.sorted);

    let mut merged: IndexMap<NamedEntity, (Vec<AttributeEntry>, Vec<AttributeEntry>)> =
        IndexMap::with_capacity(elements.len());
    for record in elements {
        let (entity, attributes, removals) = record.into_parts();
        let slot = merged.entry(entity).or_default();
        slot.0.extend(attributes);
        slot.1.extend(removals);
    }
    if options.sorted {
        merged.sort_keys();
    }

    let global: IndexSet<&AttributeEntry> = global_attributes.iter().collect();
    let elements: Vec<_> = merged
        .into_iter()
        .map(|(entity, (attributes, removals))| {
            let attributes = canonical(attributes, options.sorted)
                .into_iter()
                .filter(|attribute| !global.contains(attribute))
                .collect();
            ElementRecord::with_attributes(entity, attributes, canonical(removals, options.sorted))
        })
        .collect();

    debug!(
        elements_before = element_count,
        elements_after = elements.len(),
        sorted = options.sorted;
        "Document normalized"
    );

    Document::from_parts(elements, global_attributes, remove_attributes, flags)
}

/// Deduplicate entries, keeping first-seen order or sorting them.
fn canonical(entries: Vec<NamedEntity>, sorted: bool) -> Vec<NamedEntity> {
    let mut set: IndexSet<NamedEntity> = entries.into_iter().collect();
    if sorted {
        set.sort();
    }
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use sieve_core::{document::DocumentFlags, namespace::NamespaceId};

    use super::*;

    fn parse(source: &str) -> Document {
        sieve_parser::parse(source, DocumentFlags::default()).expect("valid source")
    }

    fn names(entries: &[NamedEntity]) -> Vec<String> {
        entries.iter().map(ToString::to_string).collect()
    }

    fn element_names(document: &Document) -> Vec<String> {
        document
            .elements()
            .iter()
            .map(|e| e.entity().to_string())
            .collect()
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let document = normalize(
            parse("b\na\nb\nc\na\n[Global]\n- z\n- y\n- z\n"),
            &NormalizeOptions::default(),
        );
        assert_eq!(element_names(&document), vec!["b", "a", "c"]);
        assert_eq!(names(document.global_attributes()), vec!["z", "y"]);
    }

    #[test]
    fn test_sorted_mode_uses_canonical_order() {
        let options = NormalizeOptions {
            sorted: true,
            ..Default::default()
        };
        let document = normalize(parse("svg circle\nb\nmath mi\na\nb\n"), &options);
        assert_eq!(
            element_names(&document),
            vec!["mathml:mi", "a", "b", "svg:circle"]
        );
    }

    #[test]
    fn test_sorted_mode_is_input_order_independent() {
        let options = NormalizeOptions {
            sorted: true,
            ..Default::default()
        };
        let one = normalize(parse("a\n- y\n- x\nb\n[Global]\n- q\n- p\n"), &options);
        let two = normalize(parse("[Global]\n- p\n- q\nb\na\n- x\n- y\n"), &options);
        assert_eq!(one, two);
    }

    #[test]
    fn test_duplicate_elements_merge_attributes() {
        let document = normalize(
            parse("a\n- href\nb\na\n- rel\n- href\n"),
            &NormalizeOptions::default(),
        );
        assert_eq!(element_names(&document), vec!["a", "b"]);
        assert_eq!(
            names(document.elements()[0].attributes()),
            vec!["href", "rel"]
        );
    }

    #[test]
    fn test_global_attributes_removed_from_elements() {
        let document = normalize(
            parse("[Global]\n- baz\nsvg foo\n- bar\n- baz\n"),
            &NormalizeOptions::default(),
        );
        let element = &document.elements()[0];
        assert_eq!(
            element.entity(),
            &NamedEntity::qualified("foo", NamespaceId::Svg)
        );
        assert_eq!(names(element.attributes()), vec!["bar"]);
        assert_eq!(names(document.global_attributes()), vec!["baz"]);
    }

    #[test]
    fn test_global_subtraction_respects_namespace() {
        let document = normalize(
            parse("[Global]\n- lang\np\n- xml lang\n- lang\n"),
            &NormalizeOptions::default(),
        );
        assert_eq!(
            document.elements()[0].attributes(),
            [NamedEntity::qualified("lang", NamespaceId::Xml)]
        );
    }

    #[test]
    fn test_removals_deduplicated() {
        let document = normalize(
            parse("img\n! onerror\n! onerror\n[Global]\n! onclick\n! onclick\n"),
            &NormalizeOptions::default(),
        );
        assert_eq!(names(document.elements()[0].remove_attributes()), vec!["onerror"]);
        assert_eq!(names(document.remove_attributes()), vec!["onclick"]);
    }

    fn source_strategy() -> impl Strategy<Value = String> {
        let line = prop_oneof![
            "[a-d]".prop_map(|name| name),
            "[a-d]".prop_map(|name| format!("svg {name}")),
            "[p-s]".prop_map(|name| format!("- {name}")),
            "[p-s]".prop_map(|name| format!("- xlink {name}")),
            Just("[Global]".to_string()),
        ];
        proptest::collection::vec(line, 0..40).prop_map(|lines| format!("a\n{}", lines.join("\n")))
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(source in source_strategy(), sorted in any::<bool>()) {
            let options = NormalizeOptions { sorted, ..Default::default() };
            let once = normalize(parse(&source), &options);
            let twice = normalize(once.clone(), &options);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_no_duplicates_and_no_global_overlap(source in source_strategy()) {
            let document = normalize(parse(&source), &NormalizeOptions::default());

            let elements: IndexSet<_> = document.elements().iter().map(|e| e.entity()).collect();
            prop_assert_eq!(elements.len(), document.elements().len());

            let global: IndexSet<_> = document.global_attributes().iter().collect();
            prop_assert_eq!(global.len(), document.global_attributes().len());

            for element in document.elements() {
                let local: IndexSet<_> = element.attributes().iter().collect();
                prop_assert_eq!(local.len(), element.attributes().len());
                prop_assert!(local.iter().all(|a| !global.contains(a)));
            }
        }

        #[test]
        fn prop_every_input_entry_survives(source in source_strategy()) {
            let parsed = parse(&source);
            let document = normalize(parsed.clone(), &NormalizeOptions::default());
            for element in parsed.elements() {
                prop_assert!(document.elements().iter().any(|e| e.entity() == element.entity()));
            }
        }
    }
}
