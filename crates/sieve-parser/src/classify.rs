//! Line classifier for source lists.
//!
//! A source list is read one line at a time. Each line is first reduced to its
//! content (inline `//` comment removed, whitespace trimmed) and only then
//! matched against the line shapes:
//!
//! ```text
//! // comment               -> skipped
//! [HTML Global]            -> global section marker
//! - title                  -> attribute of the current target
//! - xml lang               -> namespace-qualified attribute
//! ! style                  -> attribute removal for the current target
//! svg circle               -> namespace-qualified element
//! div                      -> HTML element
//! ```
//!
//! Namespace keywords are kept as raw text here; [`resolve`](crate::resolve)
//! maps them onto the namespace table.

use winnow::{
    Parser as _,
    ascii::space1,
    combinator::{alt, eof, separated_pair, terminated},
    error::{ContextError, ErrMode},
    token::{rest, take_till, take_until},
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

/// Marker that starts a comment, anywhere in a line.
pub(crate) const COMMENT_MARKER: &str = "//";
/// Marker that starts an attribute line.
const ATTRIBUTE_MARKER: &str = "-";
/// Marker that starts an attribute-removal line.
const REMOVE_MARKER: &str = "!";
/// Suffix that identifies a global section marker.
const GLOBAL_SUFFIX: &str = "Global]";

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// The meaningful content of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'src> {
    /// 1-based line number.
    number: usize,
    /// Content with comment and surrounding whitespace removed.
    text: &'src str,
    /// Location of `text` in the source.
    span: Span,
}

impl<'src> Line<'src> {
    pub(crate) fn number(&self) -> usize {
        self.number
    }

    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    pub(crate) fn span(&self) -> Span {
        self.span
    }

    /// Span of `part`, which must be a subslice of this line's text.
    pub(crate) fn span_of(&self, part: &str) -> Span {
        let offset = part.as_ptr() as usize - self.text.as_ptr() as usize;
        let start = self.span.start() + offset;
        Span::new(start..start + part.len())
    }
}

/// The shape of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification<'src> {
    /// Blank or comment-only line.
    Skip,
    /// A `[... Global]` marker.
    GlobalSectionStart,
    /// `- name`
    AttributeEntry { name: &'src str },
    /// `- keyword name`
    NamespacedAttributeEntry { prefix: &'src str, name: &'src str },
    /// `! name` or `! keyword name`
    RemoveAttributeEntry {
        prefix: Option<&'src str>,
        name: &'src str,
    },
    /// `name` or `keyword name`
    ElementEntry {
        prefix: Option<&'src str>,
        name: &'src str,
    },
}

/// An entry body: an optional namespace keyword followed by a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Body<'src> {
    prefix: Option<&'src str>,
    name: &'src str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Attribute,
    Remove,
}

/// Splits `source` into [`Line`]s with comments stripped.
pub(crate) fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    source.split('\n').enumerate().map(move |(idx, raw)| {
        let line_start = offset;
        offset += raw.len() + 1;

        let content = strip_comment(raw);
        let text = content.trim();
        let leading = content.len() - content.trim_start().len();
        let start = line_start + leading;

        Line {
            number: idx + 1,
            text,
            span: Span::new(start..start + text.len()),
        }
    })
}

/// Removes everything from the first comment marker on.
fn strip_comment(raw: &str) -> &str {
    let mut input = raw;
    let content: IResult<&str> = alt((take_until(0.., COMMENT_MARKER), rest)).parse_next(&mut input);
    content.unwrap_or(raw)
}

/// Parse one non-whitespace word.
fn word<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_till(1.., |c: char| c.is_whitespace()).parse_next(input)
}

/// Parse `name` or `keyword name`. The name is whatever follows the keyword.
fn body<'src>(input: &mut Input<'src>) -> IResult<Body<'src>> {
    alt((
        terminated(word, eof).map(|name| Body { prefix: None, name }),
        separated_pair(word, space1, rest).map(|(prefix, name)| Body {
            prefix: Some(prefix),
            name,
        }),
    ))
    .parse_next(input)
}

/// Parse a list-item marker followed by whitespace or the end of the line.
fn marker<'src>(input: &mut Input<'src>) -> IResult<Marker> {
    terminated(
        alt((
            ATTRIBUTE_MARKER.value(Marker::Attribute),
            REMOVE_MARKER.value(Marker::Remove),
        )),
        alt((space1.void(), eof.void())),
    )
    .parse_next(input)
}

/// Classify one line.
///
/// # Errors
///
/// Returns an `E100` diagnostic for entries with no name, names containing
/// whitespace, and bracketed lines that are not global section markers.
pub(crate) fn classify<'src>(line: &Line<'src>) -> Result<Classification<'src>> {
    let text = line.text();

    if text.is_empty() {
        return Ok(Classification::Skip);
    }

    if text.starts_with('[') {
        if text.ends_with(GLOBAL_SUFFIX) {
            return Ok(Classification::GlobalSectionStart);
        }
        return Err(malformed(line, line.span(), "unrecognised section marker")
            .with_help(format!("global sections are written `[... {GLOBAL_SUFFIX}`")));
    }

    let mut input = text;
    let item: IResult<Marker> = marker.parse_next(&mut input);

    let Ok(item) = item else {
        let body = parse_body(line, text)?;
        return Ok(Classification::ElementEntry {
            prefix: body.prefix,
            name: body.name,
        });
    };

    let body = parse_body(line, input)?;
    Ok(match (item, body.prefix) {
        (Marker::Attribute, None) => Classification::AttributeEntry { name: body.name },
        (Marker::Attribute, Some(prefix)) => Classification::NamespacedAttributeEntry {
            prefix,
            name: body.name,
        },
        (Marker::Remove, prefix) => Classification::RemoveAttributeEntry {
            prefix,
            name: body.name,
        },
    })
}

/// Parse an entry body, checking that the name is a single word.
fn parse_body<'src>(line: &Line<'src>, text: &'src str) -> Result<Body<'src>> {
    let mut input = text;
    let parsed: IResult<Body<'src>> = body.parse_next(&mut input);

    let Ok(parsed) = parsed else {
        return Err(malformed(line, line.span(), "entry has no name")
            .with_help("write the name after the marker, e.g. `- title`"));
    };

    if parsed.name.contains(char::is_whitespace) {
        return Err(malformed(
            line,
            line.span_of(parsed.name),
            "name contains whitespace",
        )
        .with_help("each line holds exactly one name, optionally preceded by a namespace keyword"));
    }

    Ok(parsed)
}

fn malformed(line: &Line<'_>, span: Span, what: &str) -> Diagnostic {
    Diagnostic::error(format!("line {}: {what}", line.number()))
        .with_code(ErrorCode::E100)
        .with_label(span, what.to_string())
}
