//! Unit tests for line classification and entry resolution.

use sieve_core::{
    document::DocumentFlags,
    entity::NamedEntity,
    namespace::NamespaceId,
};

use crate::{
    classify::{self, Classification},
    error::ErrorCode,
    parse,
    resolve::{self, Entry},
    span::Span,
};

/// Helper to classify a single line of source.
fn classify_line(source: &str) -> Result<Classification<'_>, ErrorCode> {
    let line = classify::lines(source).next().expect("at least one line");
    classify::classify(&line).map_err(|d| d.code().expect("diagnostic has a code"))
}

/// Helper to classify and resolve a single line of source.
fn resolve_line(source: &str) -> Result<Option<Entry>, ErrorCode> {
    let line = classify::lines(source).next().expect("at least one line");
    classify::classify(&line)
        .and_then(|c| resolve::resolve(&line, c))
        .map_err(|d| d.code().expect("diagnostic has a code"))
}

#[test]
fn test_blank_and_comment_lines_skip() {
    assert_eq!(classify_line(""), Ok(Classification::Skip));
    assert_eq!(classify_line("   \t "), Ok(Classification::Skip));
    assert_eq!(classify_line("// a comment"), Ok(Classification::Skip));
    assert_eq!(classify_line("   // indented comment"), Ok(Classification::Skip));
}

#[test]
fn test_global_section_marker() {
    assert_eq!(
        classify_line("[HTML Global]"),
        Ok(Classification::GlobalSectionStart)
    );
    assert_eq!(
        classify_line("  [Global]  // attributes for everything"),
        Ok(Classification::GlobalSectionStart)
    );
    assert_eq!(classify_line("[HTML]"), Err(ErrorCode::E100));
}

#[test]
fn test_attribute_entries() {
    assert_eq!(
        classify_line("- title"),
        Ok(Classification::AttributeEntry { name: "title" })
    );
    assert_eq!(
        classify_line("-\ttitle"),
        Ok(Classification::AttributeEntry { name: "title" })
    );
    assert_eq!(
        classify_line("- xml lang"),
        Ok(Classification::NamespacedAttributeEntry {
            prefix: "xml",
            name: "lang"
        })
    );
}

#[test]
fn test_remove_entries() {
    assert_eq!(
        classify_line("! style"),
        Ok(Classification::RemoveAttributeEntry {
            prefix: None,
            name: "style"
        })
    );
    assert_eq!(
        classify_line("! xlink href"),
        Ok(Classification::RemoveAttributeEntry {
            prefix: Some("xlink"),
            name: "href"
        })
    );
}

#[test]
fn test_element_entries() {
    assert_eq!(
        classify_line("div"),
        Ok(Classification::ElementEntry {
            prefix: None,
            name: "div"
        })
    );
    assert_eq!(
        classify_line("svg foreignObject"),
        Ok(Classification::ElementEntry {
            prefix: Some("svg"),
            name: "foreignObject"
        })
    );
    // A bare `svg` is the HTML-embedded svg element, not a prefix.
    assert_eq!(
        classify_line("svg"),
        Ok(Classification::ElementEntry {
            prefix: None,
            name: "svg"
        })
    );
    // Without the marker's trailing space this is an element name.
    assert_eq!(
        classify_line("-moz-thing"),
        Ok(Classification::ElementEntry {
            prefix: None,
            name: "-moz-thing"
        })
    );
}

#[test]
fn test_inline_comment_stripped_before_prefix_matching() {
    assert_eq!(
        classify_line("math mi // identifier"),
        Ok(Classification::ElementEntry {
            prefix: Some("math"),
            name: "mi"
        })
    );
    assert_eq!(
        classify_line("- href// link target"),
        Ok(Classification::AttributeEntry { name: "href" })
    );
    assert_eq!(
        classify_line("[SVG Global] // svg attributes"),
        Ok(Classification::GlobalSectionStart)
    );
}

#[test]
fn test_malformed_entries() {
    assert_eq!(classify_line("-"), Err(ErrorCode::E100));
    assert_eq!(classify_line("- // nothing"), Err(ErrorCode::E100));
    assert_eq!(classify_line("!"), Err(ErrorCode::E100));
    assert_eq!(classify_line("svg foo bar"), Err(ErrorCode::E100));
    assert_eq!(classify_line("- xml lang extra"), Err(ErrorCode::E100));
}

#[test]
fn test_resolve_namespaces() {
    assert_eq!(
        resolve_line("math mi"),
        Ok(Some(Entry::Element(sieve_core::entity::ElementRecord::new(
            NamedEntity::qualified("mi", NamespaceId::MathMl)
        ))))
    );
    assert_eq!(
        resolve_line("- xml lang"),
        Ok(Some(Entry::Attribute(NamedEntity::qualified(
            "lang",
            NamespaceId::Xml
        ))))
    );
    assert_eq!(
        resolve_line("- lang"),
        Ok(Some(Entry::Attribute(NamedEntity::unqualified("lang"))))
    );
    assert_eq!(resolve_line("// x"), Ok(None));
}

#[test]
fn test_unknown_namespace_prefixes() {
    assert_eq!(resolve_line("html div"), Err(ErrorCode::E101));
    assert_eq!(resolve_line("mathml mi"), Err(ErrorCode::E101));
    // Keywords are only valid in their own position.
    assert_eq!(resolve_line("xml lang"), Err(ErrorCode::E101));
    assert_eq!(resolve_line("- svg width"), Err(ErrorCode::E101));
    assert_eq!(resolve_line("! math display"), Err(ErrorCode::E101));
}

#[test]
fn test_line_spans() {
    let source = "div\n  - title  // tooltip\n";
    let lines: Vec<_> = classify::lines(source).collect();
    assert_eq!(lines[1].number(), 2);
    assert_eq!(lines[1].text(), "- title");
    assert_eq!(lines[1].span(), Span::new(6..13));
}

#[test]
fn test_crlf_line_endings() {
    let document = parse("p\r\n- class\r\n", DocumentFlags::default()).unwrap();
    assert_eq!(document.elements()[0].entity().name(), "p");
    assert_eq!(document.elements()[0].attributes()[0].name(), "class");
}

#[test]
fn test_unknown_prefix_diagnostic_points_at_prefix() {
    let err = parse("a\nfoo bar\n", DocumentFlags::default()).unwrap_err();
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.message(), "line 2: unknown namespace prefix `foo`");
    assert_eq!(diag.labels()[0].span(), Span::new(2..5));
    assert!(diag.labels()[1].is_secondary());
}

#[test]
fn test_namespace_resolution_example() {
    let source = "\
[Global]
- baz

svg foo
- bar
- baz
";
    let document = parse(source, DocumentFlags::default()).unwrap();
    let element = &document.elements()[0];
    assert_eq!(
        element.entity(),
        &NamedEntity::qualified("foo", NamespaceId::Svg)
    );
    let names: Vec<_> = element.attributes().iter().map(|a| a.name()).collect();
    // Global subtraction happens during normalization, not here.
    assert_eq!(names, vec!["bar", "baz"]);
    assert_eq!(
        document.global_attributes(),
        [NamedEntity::unqualified("baz")]
    );
}

mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_parse_never_panics(source in "[a-z\\[\\]!/ \\-\\n]{0,200}") {
            let _ = parse(&source, DocumentFlags::default());
        }

        #[test]
        fn prop_diagnostics_point_inside_source(source in "[a-z\\[\\]!/ \\-\\n]{0,200}") {
            if let Err(err) = parse(&source, DocumentFlags::default()) {
                for diag in err.diagnostics() {
                    for label in diag.labels() {
                        prop_assert!(label.span().end() <= source.len());
                    }
                }
            }
        }

        #[test]
        fn prop_every_element_line_is_recorded(names in proptest::collection::vec("[a-z]{1,8}", 1..20)) {
            let source = names.join("\n");
            let document = parse(&source, DocumentFlags::default()).unwrap();
            prop_assert_eq!(document.elements().len(), names.len());
        }
    }
}
