//! Sieve - compiles element and attribute lists into sanitizer policies.
//!
//! A source list names the HTML, SVG and MathML elements a sanitizer should
//! keep, the attributes allowed on each, and the attributes allowed
//! everywhere. Sieve parses such lists, normalizes them, and writes the
//! result as a deterministic JSON allow-list policy. It also joins plain
//! name lists into one wrapped reference list.

pub mod config;
pub mod emit;
pub mod join;
pub mod normalize;

mod error;
mod files;

pub use sieve_core::{document, entity, name_list, namespace};

pub use error::SieveError;
pub use files::{read_source, write_artifact};

use log::{debug, info, trace, warn};
use serde_json::{Map, Value};

use config::AppConfig;
use document::Document;
use emit::Emitter;
use name_list::NameList;
use namespace::NamespaceId;

/// Builder for compiling source lists into policies.
///
/// # Examples
///
/// ```rust
/// use sieve::{PolicyBuilder, config::AppConfig};
///
/// let source = "[Global]\n- id\np\n- class\n";
///
/// let builder = PolicyBuilder::new(AppConfig::default());
///
/// // Parse and normalize the source list
/// let document = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Write it as a policy
/// let json = builder.render_json(&document, None, None)
///     .expect("Failed to render");
///
/// assert!(json.contains("\"class\""));
/// ```
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    config: AppConfig,
}

impl PolicyBuilder {
    /// Create a new policy builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and normalize a source list.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Parse`] carrying every diagnostic found in the
    /// source.
    pub fn parse(&self, source: &str) -> Result<Document, SieveError> {
        info!("Parsing source list");

        let document = sieve_parser::parse(source, *self.config.document())
            .map_err(|err| SieveError::new_parse_error(err, source))?;
        let document = normalize::normalize(document, self.config.normalize());

        debug!(
            elements = document.elements().len(),
            global_attributes = document.global_attributes().len();
            "Source list compiled"
        );
        trace!(document:?; "Normalized document");

        Ok(document)
    }

    /// Render a normalized document as policy JSON text.
    ///
    /// `base` supplies extra top-level keys and `removals` extra names for
    /// `removeAttributes`.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Base`] for an unusable base object.
    pub fn render_json(
        &self,
        document: &Document,
        base: Option<&Map<String, Value>>,
        removals: Option<&NameList>,
    ) -> Result<String, SieveError> {
        let mut emitter = Emitter::new(*self.config.normalize());
        if let Some(base) = base {
            emitter = emitter.with_base(base);
        }
        if let Some(removals) = removals {
            emitter = emitter.with_removals(removals);
        }

        let value = emitter.emit(document)?;
        let json = emit::to_canonical_string(&value)?;
        info!(bytes = json.len(); "Policy rendered");
        Ok(json)
    }

    /// Load a name list, defaulting its namespace to `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Parse`] when the list header names an unknown
    /// namespace.
    pub fn load_name_list(
        &self,
        source: &str,
        namespace: Option<NamespaceId>,
    ) -> Result<NameList, SieveError> {
        sieve_parser::parse_name_list(source, namespace)
            .map_err(|err| SieveError::new_parse_error(err, source))
    }

    /// Render a default configuration built from an element name list and an
    /// attribute name list, on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Json`] if the object cannot be serialized.
    pub fn render_name_list_config(
        &self,
        base: Option<&Map<String, Value>>,
        elements: &NameList,
        attributes: &NameList,
    ) -> Result<String, SieveError> {
        if elements.is_empty() {
            warn!("Element list is empty; the configuration allows no elements");
        }

        let value = emit::name_list_config(base, elements, attributes);
        let json = emit::to_canonical_string(&value)?;
        info!(bytes = json.len(); "Default configuration rendered");
        Ok(json)
    }

    /// Join name lists into wrapped text using the configured width.
    pub fn join(&self, lists: &[NameList]) -> String {
        join::write_lists(lists, self.config.join().width())
    }
}
