//! Loader for plain, namespace-tagged name lists.
//!
//! ```text
//! # namespace: http://www.w3.org/2000/svg
//! # comment
//! circle
//! rect
//! ```
//!
//! The header may name the namespace by URI or by keyword. Blank lines and
//! lines starting with `#` or `//` are skipped; every other line is one name.

use std::str::FromStr;

use log::debug;

use sieve_core::{name_list::NameList, namespace::NamespaceId};

use crate::{
    classify::COMMENT_MARKER,
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

const NAMESPACE_HEADER: &str = "# namespace:";
const HASH_COMMENT: &str = "#";

/// Load a name list.
///
/// `namespace` is used unless the list carries its own header; with neither,
/// names are in the HTML namespace.
///
/// # Errors
///
/// Returns an `E102` diagnostic when a header names an unknown namespace.
pub fn parse_name_list(
    source: &str,
    namespace: Option<NamespaceId>,
) -> Result<NameList, ParseError> {
    let mut namespace = namespace.unwrap_or_default();
    let mut names = Vec::new();
    let mut offset = 0;

    for (idx, raw) in source.split('\n').enumerate() {
        let line_start = offset;
        offset += raw.len() + 1;
        let line = raw.trim();

        if let Some(value) = line.strip_prefix(NAMESPACE_HEADER) {
            let value = value.trim();
            namespace = NamespaceId::from_str(value).map_err(|err| {
                let start = line_start + (raw.len() - raw.trim_start().len());
                Diagnostic::error(format!("line {}: {err}", idx + 1))
                    .with_code(ErrorCode::E102)
                    .with_label(Span::new(start..start + line.len()), "unknown namespace")
                    .with_help("use a namespace URI or one of `svg`, `math`, `xlink`, `xml`, `xmlns`")
            })?;
        } else if line.is_empty()
            || line.starts_with(HASH_COMMENT)
            || line.starts_with(COMMENT_MARKER)
        {
            continue;
        } else {
            names.push(line.to_string());
        }
    }

    debug!(namespace:% = namespace, names = names.len(); "Name list loaded");
    Ok(NameList::new(namespace, names))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_sets_namespace() {
        let list = parse_name_list(
            "# namespace: http://www.w3.org/2000/svg\ncircle\n\n# shapes\nrect\n",
            None,
        )
        .unwrap();
        assert_eq!(list.namespace(), NamespaceId::Svg);
        assert_eq!(list.names(), ["circle", "rect"]);
    }

    #[test]
    fn test_header_accepts_keyword_and_empty_uri() {
        let list = parse_name_list("# namespace: math\nmi\n", None).unwrap();
        assert_eq!(list.namespace(), NamespaceId::MathMl);

        let list = parse_name_list("# namespace:\np\n", Some(NamespaceId::Svg)).unwrap();
        assert_eq!(list.namespace(), NamespaceId::Default);
    }

    #[test]
    fn test_caller_namespace_is_default() {
        let list = parse_name_list("href\n", Some(NamespaceId::XLink)).unwrap();
        assert_eq!(list.namespace(), NamespaceId::XLink);

        let list = parse_name_list("div\n", None).unwrap();
        assert_eq!(list.namespace(), NamespaceId::Default);
    }

    #[test]
    fn test_slash_comments_and_blank_lines_skipped() {
        let list = parse_name_list("// event handlers\nonclick\n\n  onload  \n", None).unwrap();
        assert_eq!(list.names(), ["onclick", "onload"]);
    }

    #[test]
    fn test_unknown_namespace_header() {
        let err = parse_name_list("x\n# namespace: urn:example\n", None).unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E102));
        assert!(diag.message().starts_with("line 2:"));
        assert_eq!(diag.labels()[0].span(), Span::new(2..26));
    }
}
