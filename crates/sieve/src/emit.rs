//! Policy document emission.
//!
//! This module turns a normalized [`Document`] into the JSON policy artifact
//! and back. The emitted object has a fixed schema:
//!
//! ```json
//! {
//!   "attributes": ["id", {"name": "lang", "namespace": "http://www.w3.org/XML/1998/namespace"}],
//!   "comments": false,
//!   "dataAttributes": false,
//!   "elements": ["p", {"name": "circle", "namespace": "http://www.w3.org/2000/svg", "attributes": ["r"]}],
//!   "removeAttributes": ["onclick"]
//! }
//! ```
//!
//! plus any keys of a caller-supplied base object, copied verbatim.
//! Computed keys win over base keys of the same name, except that
//! `removeAttributes` extends the base's list instead of replacing it.
//!
//! [`name_list_config`] builds the simpler default configuration straight
//! from two name lists, without a source list.

mod format;

pub use format::to_canonical_string;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sieve_core::{
    document::{Document, DocumentFlags},
    entity::{AttributeEntry, ElementRecord, NamedEntity},
    name_list::NameList,
    namespace::NamespaceId,
};

use crate::{error::SieveError, normalize::NormalizeOptions};

const REMOVE_ATTRIBUTES: &str = "removeAttributes";
const ALLOW_ELEMENTS: &str = "allowElements";
const ALLOW_ATTRIBUTES: &str = "allowAttributes";

/// Attribute value meaning "allowed on every element".
const ANY_ELEMENT: &str = "*";

/// JSON shape of an element or attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum EntityRepr {
    Bare(String),
    Full {
        name: String,
        namespace: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attributes: Option<Vec<EntityRepr>>,
        #[serde(
            default,
            rename = "removeAttributes",
            skip_serializing_if = "Option::is_none"
        )]
        remove_attributes: Option<Vec<EntityRepr>>,
    },
}

/// JSON shape of the computed part of a policy.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRepr {
    #[serde(default)]
    elements: Vec<EntityRepr>,
    #[serde(default)]
    attributes: Vec<EntityRepr>,
    #[serde(default)]
    comments: bool,
    #[serde(default)]
    data_attributes: bool,
    #[serde(default, skip_serializing)]
    remove_attributes: Vec<EntityRepr>,
}

/// Builder for the policy JSON object.
///
/// # Examples
///
/// ```
/// use sieve::{emit::Emitter, normalize::NormalizeOptions};
/// use sieve_core::document::DocumentFlags;
///
/// let document = sieve_parser::parse("p\n", DocumentFlags::default()).unwrap();
/// let value = Emitter::new(NormalizeOptions::default())
///     .emit(&document)
///     .unwrap();
///
/// assert_eq!(value["comments"], false);
/// assert_eq!(value["elements"][0]["name"], "p");
/// ```
#[derive(Debug, Clone)]
pub struct Emitter<'a> {
    options: NormalizeOptions,
    base: Option<&'a Map<String, Value>>,
    removals: Option<&'a NameList>,
}

impl<'a> Emitter<'a> {
    /// Create an emitter using the compaction options in `options`.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            base: None,
            removals: None,
        }
    }

    /// Copy the keys of `base` into the output.
    pub fn with_base(mut self, base: &'a Map<String, Value>) -> Self {
        self.base = Some(base);
        self
    }

    /// Append the names in `removals` to the output's `removeAttributes`.
    pub fn with_removals(mut self, removals: &'a NameList) -> Self {
        self.removals = Some(removals);
        self
    }

    /// Build the policy object for a normalized document.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Base`] if the base object has a
    /// `removeAttributes` key that is not an array.
    pub fn emit(&self, document: &Document) -> Result<Value, SieveError> {
        let mut root = self.base.cloned().unwrap_or_default();

        let mut removals = match root.remove(REMOVE_ATTRIBUTES) {
            None => Vec::new(),
            Some(Value::Array(values)) => values,
            Some(other) => {
                return Err(SieveError::Base(format!(
                    "`{REMOVE_ATTRIBUTES}` must be an array, found {other}"
                )));
            }
        };

        for attribute in document.remove_attributes() {
            push_unique(&mut removals, removal_value(attribute)?);
        }
        if let Some(list) = self.removals {
            let namespace = match list.namespace() {
                NamespaceId::Default => None,
                other => Some(other),
            };
            for name in list {
                push_unique(
                    &mut removals,
                    removal_value(&NamedEntity::new(name.as_str(), namespace))?,
                );
            }
        }

        let repr = DocumentRepr {
            elements: document
                .elements()
                .iter()
                .map(|element| self.element_repr(element))
                .collect(),
            attributes: document
                .global_attributes()
                .iter()
                .map(|attribute| self.attribute_repr(attribute))
                .collect(),
            comments: document.flags().comments,
            data_attributes: document.flags().data_attributes,
            remove_attributes: Vec::new(),
        };

        if let Value::Object(computed) = serde_json::to_value(repr)? {
            root.extend(computed);
        }
        if !removals.is_empty() {
            root.insert(REMOVE_ATTRIBUTES.to_string(), Value::Array(removals));
        }

        debug!(keys = root.len(); "Policy object emitted");
        Ok(Value::Object(root))
    }

    fn element_repr(&self, element: &ElementRecord) -> EntityRepr {
        let entity = element.entity();
        if self.options.compact_single_elements && element.is_compactable() {
            return EntityRepr::Bare(entity.name().to_string());
        }

        let strip = self.options.strip_empty_attribute_lists;
        let attributes = (!(strip && element.attributes().is_empty())).then(|| {
            element
                .attributes()
                .iter()
                .map(|attribute| self.attribute_repr(attribute))
                .collect()
        });
        let remove_attributes = (!element.remove_attributes().is_empty()).then(|| {
            element
                .remove_attributes()
                .iter()
                .map(|attribute| self.attribute_repr(attribute))
                .collect()
        });

        EntityRepr::Full {
            name: entity.name().to_string(),
            namespace: entity.namespace().map(|ns| ns.uri().to_string()),
            attributes,
            remove_attributes,
        }
    }

    fn attribute_repr(&self, attribute: &AttributeEntry) -> EntityRepr {
        match attribute.namespace() {
            None if self.options.compact_single_elements => {
                EntityRepr::Bare(attribute.name().to_string())
            }
            namespace => EntityRepr::Full {
                name: attribute.name().to_string(),
                namespace: namespace.map(|ns| ns.uri().to_string()),
                attributes: None,
                remove_attributes: None,
            },
        }
    }
}

/// Removal entries are written as bare names unless they carry a namespace.
fn removal_value(attribute: &AttributeEntry) -> Result<Value, SieveError> {
    let repr = match attribute.namespace() {
        None => EntityRepr::Bare(attribute.name().to_string()),
        Some(ns) => EntityRepr::Full {
            name: attribute.name().to_string(),
            namespace: Some(ns.uri().to_string()),
            attributes: None,
            remove_attributes: None,
        },
    };
    Ok(serde_json::to_value(repr)?)
}

fn push_unique(values: &mut Vec<Value>, value: Value) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Build a default configuration from an element list and an attribute list.
///
/// The result is `base` with `allowElements` set to the element names and
/// `allowAttributes` mapping each attribute name to `["*"]`. Names carry
/// their list prefix, so lists without a namespace header are written
/// verbatim. Repeated names are written once.
///
/// # Examples
///
/// ```
/// use sieve::emit::name_list_config;
/// use sieve_core::{name_list::NameList, namespace::NamespaceId};
///
/// let elements = NameList::new(NamespaceId::Default, vec!["p".into(), "em".into()]);
/// let attributes = NameList::new(NamespaceId::Default, vec!["title".into()]);
/// let value = name_list_config(None, &elements, &attributes);
///
/// assert_eq!(value["allowElements"], serde_json::json!(["p", "em"]));
/// assert_eq!(value["allowAttributes"]["title"], serde_json::json!(["*"]));
/// ```
pub fn name_list_config(
    base: Option<&Map<String, Value>>,
    elements: &NameList,
    attributes: &NameList,
) -> Value {
    let mut root = base.cloned().unwrap_or_default();

    let mut allowed = Vec::new();
    for name in elements.prefixed() {
        push_unique(&mut allowed, Value::String(name));
    }
    let everywhere = Value::Array(vec![Value::String(ANY_ELEMENT.to_string())]);
    let per_attribute: Map<String, Value> = attributes
        .prefixed()
        .map(|name| (name, everywhere.clone()))
        .collect();

    debug!(
        elements = allowed.len(),
        attributes = per_attribute.len();
        "Default configuration emitted"
    );
    root.insert(ALLOW_ELEMENTS.to_string(), Value::Array(allowed));
    root.insert(ALLOW_ATTRIBUTES.to_string(), Value::Object(per_attribute));
    Value::Object(root)
}

/// Parse a base configuration object from JSON text.
///
/// # Errors
///
/// Returns [`SieveError::Json`] for invalid JSON and [`SieveError::Base`]
/// if the top-level value is not an object.
pub fn parse_base(source: &str) -> Result<Map<String, Value>, SieveError> {
    match serde_json::from_str(source)? {
        Value::Object(map) => Ok(map),
        other => Err(SieveError::Base(format!(
            "expected a JSON object, found {other}"
        ))),
    }
}

/// Rebuild a document from an emitted policy object.
///
/// Keys outside the policy schema are ignored. Bare element names are HTML
/// elements; bare attribute names are namespace-agnostic. The top-level
/// `removeAttributes` list becomes the document's removal set.
///
/// # Errors
///
/// Returns [`SieveError::Document`] for unknown namespace URIs and
/// [`SieveError::Json`] when the value does not have the policy shape.
pub fn from_json(value: &Value) -> Result<Document, SieveError> {
    let repr = DocumentRepr::deserialize(value)?;

    let elements = repr
        .elements
        .into_iter()
        .map(element_from_repr)
        .collect::<Result<_, _>>()?;
    let global_attributes = attributes_from_repr(repr.attributes)?;
    let remove_attributes = attributes_from_repr(repr.remove_attributes)?;
    let flags = DocumentFlags {
        comments: repr.comments,
        data_attributes: repr.data_attributes,
    };

    Ok(Document::from_parts(
        elements,
        global_attributes,
        remove_attributes,
        flags,
    ))
}

fn element_from_repr(repr: EntityRepr) -> Result<ElementRecord, SieveError> {
    match repr {
        EntityRepr::Bare(name) => Ok(ElementRecord::new(NamedEntity::qualified(
            name,
            NamespaceId::Default,
        ))),
        EntityRepr::Full {
            name,
            namespace,
            attributes,
            remove_attributes,
        } => Ok(ElementRecord::with_attributes(
            NamedEntity::new(name, namespace_from_repr(namespace.as_deref())?),
            attributes_from_repr(attributes.unwrap_or_default())?,
            attributes_from_repr(remove_attributes.unwrap_or_default())?,
        )),
    }
}

fn attributes_from_repr(reprs: Vec<EntityRepr>) -> Result<Vec<AttributeEntry>, SieveError> {
    reprs
        .into_iter()
        .map(|repr| match repr {
            EntityRepr::Bare(name) => Ok(NamedEntity::unqualified(name)),
            EntityRepr::Full {
                name, namespace, ..
            } => Ok(NamedEntity::new(
                name,
                namespace_from_repr(namespace.as_deref())?,
            )),
        })
        .collect()
}

fn namespace_from_repr(uri: Option<&str>) -> Result<Option<NamespaceId>, SieveError> {
    uri.map(|uri| NamespaceId::from_uri(uri).map_err(|err| SieveError::Document(err.to_string())))
        .transpose()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalize::normalize;

    fn compile(source: &str, options: NormalizeOptions) -> Document {
        let document =
            sieve_parser::parse(source, DocumentFlags::default()).expect("valid source");
        normalize(document, &options)
    }

    fn compact() -> NormalizeOptions {
        NormalizeOptions {
            sorted: true,
            compact_single_elements: true,
            strip_empty_attribute_lists: true,
        }
    }

    #[test]
    fn test_full_shape() {
        let document = compile(
            "[Global]\n- id\np\nsvg circle\n- r\n",
            NormalizeOptions::default(),
        );
        let value = Emitter::new(NormalizeOptions::default())
            .emit(&document)
            .unwrap();
        assert_eq!(
            value,
            json!({
                "attributes": [{"name": "id", "namespace": null}],
                "comments": false,
                "dataAttributes": false,
                "elements": [
                    {"name": "p", "namespace": "http://www.w3.org/1999/xhtml", "attributes": []},
                    {
                        "name": "circle",
                        "namespace": "http://www.w3.org/2000/svg",
                        "attributes": [{"name": "r", "namespace": null}]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_compact_shape() {
        let document = compile(
            "[Global]\n- id\n- xml lang\np\nsvg circle\na\n- href\n",
            compact(),
        );
        let value = Emitter::new(compact()).emit(&document).unwrap();
        assert_eq!(
            value["elements"],
            json!([
                {"name": "a", "namespace": "http://www.w3.org/1999/xhtml", "attributes": ["href"]},
                "p",
                {"name": "circle", "namespace": "http://www.w3.org/2000/svg"}
            ])
        );
        assert_eq!(
            value["attributes"],
            json!(["id", {"name": "lang", "namespace": "http://www.w3.org/XML/1998/namespace"}])
        );
    }

    #[test]
    fn test_empty_attribute_list_stripped() {
        let options = NormalizeOptions {
            strip_empty_attribute_lists: true,
            ..Default::default()
        };
        let document = compile("[Global]\n- title\nabbr\n- title\n", options);
        let value = Emitter::new(options).emit(&document).unwrap();
        let element = value["elements"][0].as_object().unwrap();
        assert!(!element.contains_key("attributes"));
    }

    #[test]
    fn test_element_with_removal_is_not_compacted() {
        let document = compile("img\n! onerror\n", compact());
        let value = Emitter::new(compact()).emit(&document).unwrap();
        assert_eq!(
            value["elements"][0],
            json!({
                "name": "img",
                "namespace": "http://www.w3.org/1999/xhtml",
                "removeAttributes": ["onerror"]
            })
        );
    }

    #[test]
    fn test_base_keys_preserved_and_overridden() {
        let base = parse_base(r#"{"allowCustomElements": true, "comments": true}"#).unwrap();
        let document = compile("p\n", NormalizeOptions::default());
        let value = Emitter::new(NormalizeOptions::default())
            .with_base(&base)
            .emit(&document)
            .unwrap();
        assert_eq!(value["allowCustomElements"], true);
        assert_eq!(value["comments"], false);
    }

    #[test]
    fn test_removal_list_merged() {
        let base = parse_base(r#"{"removeAttributes": ["onclick"]}"#).unwrap();
        let events = NameList::new(
            NamespaceId::Default,
            vec!["onload".to_string(), "onclick".to_string()],
        );
        let xlink = NameList::new(NamespaceId::XLink, vec!["href".to_string()]);
        let document = compile("p\n[Global]\n! ping\n", NormalizeOptions::default());

        let value = Emitter::new(NormalizeOptions::default())
            .with_base(&base)
            .with_removals(&events)
            .emit(&document)
            .unwrap();
        assert_eq!(
            value["removeAttributes"],
            json!(["onclick", "ping", "onload"])
        );

        let value = Emitter::new(NormalizeOptions::default())
            .with_removals(&xlink)
            .emit(&document)
            .unwrap();
        assert_eq!(
            value["removeAttributes"],
            json!(["ping", {"name": "href", "namespace": "http://www.w3.org/1999/xlink"}])
        );
    }

    #[test]
    fn test_no_removals_no_key() {
        let document = compile("p\n", NormalizeOptions::default());
        let value = Emitter::new(NormalizeOptions::default())
            .emit(&document)
            .unwrap();
        assert!(value.get("removeAttributes").is_none());
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(parse_base("[1, 2]"), Err(SieveError::Base(_))));
        assert!(matches!(parse_base("{"), Err(SieveError::Json(_))));

        let base = parse_base(r#"{"removeAttributes": "onclick"}"#).unwrap();
        let document = compile("p\n", NormalizeOptions::default());
        let result = Emitter::new(NormalizeOptions::default())
            .with_base(&base)
            .emit(&document);
        assert!(matches!(result, Err(SieveError::Base(_))));
    }

    #[test]
    fn test_from_json_round_trips_both_shapes() {
        let source = "[Global]\n- id\n- xml lang\n! onclick\np\na\n- href\n! ping\nmath mi\n- mathvariant\n";
        for options in [NormalizeOptions::default(), compact()] {
            let document = compile(source, options);
            let value = Emitter::new(options).emit(&document).unwrap();
            let rebuilt = normalize(from_json(&value).unwrap(), &options);
            assert_eq!(rebuilt, document);
        }
    }

    #[test]
    fn test_name_list_config() {
        let base = parse_base(r#"{"allowCustomElements": false, "allowElements": ["x"]}"#)
            .unwrap();
        let elements = NameList::new(
            NamespaceId::Default,
            vec!["p".to_string(), "a".to_string(), "p".to_string()],
        );
        let attributes = NameList::new(
            NamespaceId::Default,
            vec!["title".to_string(), "dir".to_string()],
        );

        let value = name_list_config(Some(&base), &elements, &attributes);
        assert_eq!(
            value,
            json!({
                "allowAttributes": {"dir": ["*"], "title": ["*"]},
                "allowCustomElements": false,
                "allowElements": ["p", "a"]
            })
        );
    }

    #[test]
    fn test_name_list_config_prefixes_foreign_names() {
        let elements = NameList::new(NamespaceId::Svg, vec!["circle".to_string()]);
        let attributes = NameList::new(NamespaceId::XLink, vec!["href".to_string()]);

        let value = name_list_config(None, &elements, &attributes);
        assert_eq!(value["allowElements"], json!(["svg:circle"]));
        assert_eq!(value["allowAttributes"], json!({"xlink:href": ["*"]}));
    }

    #[test]
    fn test_from_json_rejects_unknown_namespace() {
        let value = json!({"elements": [{"name": "x", "namespace": "urn:x"}]});
        assert!(matches!(from_json(&value), Err(SieveError::Document(_))));
    }
}
