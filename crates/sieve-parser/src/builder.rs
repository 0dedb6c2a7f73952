//! List builder: folds resolved entries into an unnormalized [`Document`].
//!
//! The entry that receives attribute lines is tracked by a [`Target`] value
//! carried through the fold. Entries are appended positionally; duplicates and
//! global/local overlap are left for normalization.

use log::{debug, trace};

use sieve_core::{
    document::{Document, DocumentFlags},
    entity::AttributeEntry,
};

use crate::{
    classify::{self, Line},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    resolve::{self, Entry},
};

/// The collection attribute lines currently append to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Nothing yet: no element line or global marker has been seen.
    Detached,
    /// The document's global attribute set.
    Global,
    /// The local set of the element at this index.
    Element(usize),
}

/// Apply one entry to the document.
///
/// Returns the target for the next entry, or hands the attribute back when
/// the target is [`Target::Detached`].
pub(crate) fn apply(
    document: &mut Document,
    target: Target,
    entry: Entry,
) -> Result<Target, AttributeEntry> {
    match entry {
        Entry::StartGlobalSection => Ok(Target::Global),
        Entry::Element(record) => {
            document.elements_mut().push(record);
            Ok(Target::Element(document.elements().len() - 1))
        }
        Entry::Attribute(attribute) => match target {
            Target::Detached => Err(attribute),
            Target::Global => {
                document.global_attributes_mut().push(attribute);
                Ok(target)
            }
            Target::Element(idx) => {
                document.elements_mut()[idx].attributes_mut().push(attribute);
                Ok(target)
            }
        },
        Entry::RemoveAttribute(attribute) => match target {
            Target::Detached => Err(attribute),
            Target::Global => {
                document.remove_attributes_mut().push(attribute);
                Ok(target)
            }
            Target::Element(idx) => {
                document.elements_mut()[idx]
                    .remove_attributes_mut()
                    .push(attribute);
                Ok(target)
            }
        },
    }
}

/// Accumulator threaded through the fold over source lines.
struct Fold {
    document: Document,
    target: Target,
    collector: DiagnosticCollector,
}

impl Fold {
    fn new(flags: DocumentFlags) -> Self {
        Self {
            document: Document::new(flags),
            target: Target::Detached,
            collector: DiagnosticCollector::new(),
        }
    }

    fn step(mut self, line: Line<'_>) -> Self {
        let entry = classify::classify(&line).and_then(|c| resolve::resolve(&line, c));

        match entry {
            Ok(Some(entry)) => {
                trace!(line = line.number(), entry:? = entry; "Resolved entry");
                match apply(&mut self.document, self.target, entry) {
                    Ok(target) => self.target = target,
                    Err(attribute) => self.collector.emit(
                        Diagnostic::warning(format!(
                            "line {}: attribute `{attribute}` is not inside an element or global section",
                            line.number()
                        ))
                        .with_code(ErrorCode::E200)
                        .with_label(line.span(), "ignored")
                        .with_help("move the line below the element it belongs to"),
                    ),
                }
            }
            Ok(None) => {}
            Err(diagnostic) => self.collector.emit(diagnostic),
        }

        self
    }

    fn finish(self) -> Result<Document, ParseError> {
        self.collector.finish()?;
        Ok(self.document)
    }
}

/// Build an unnormalized document from source list text.
pub(crate) fn build(source: &str, flags: DocumentFlags) -> Result<Document, ParseError> {
    let document = classify::lines(source)
        .fold(Fold::new(flags), Fold::step)
        .finish()?;

    debug!(
        elements = document.elements().len(),
        global_attributes = document.global_attributes().len();
        "Source list built"
    );

    Ok(document)
}
