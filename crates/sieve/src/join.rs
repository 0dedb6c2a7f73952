//! Joining name lists into one reference list.
//!
//! Every name is written with its namespace's list prefix (`svg:`,
//! `mathml:`, ...), the union is sorted, and the result is written as one
//! comma-separated run of text, word-wrapped at a fixed width.

use log::debug;

use sieve_core::name_list::NameList;

/// Line width used when none is configured.
pub const DEFAULT_WIDTH: usize = 70;

const SEPARATOR: &str = ",";

/// Merge `lists` into one sorted sequence of prefixed names.
///
/// Sorting compares the prefixed strings, so `svg:` names sort among the
/// unprefixed HTML names by their `s`. Duplicates are kept.
///
/// # Examples
///
/// ```
/// use sieve::join::join_lists;
/// use sieve_core::{name_list::NameList, namespace::NamespaceId};
///
/// let html = NameList::new(NamespaceId::Default, vec!["a".into(), "c".into()]);
/// let svg = NameList::new(NamespaceId::Svg, vec!["b".into()]);
///
/// assert_eq!(join_lists(&[html, svg]), vec!["a", "c", "svg:b"]);
/// ```
pub fn join_lists(lists: &[NameList]) -> Vec<String> {
    let mut names: Vec<String> = lists.iter().flat_map(NameList::prefixed).collect();
    names.sort();
    names
}

/// Join `lists` into `a, b, svg:c` text wrapped to `width` columns.
///
/// Lines break only between names. The returned text ends with a newline
/// unless there are no names at all.
pub fn write_lists(lists: &[NameList], width: usize) -> String {
    let names = join_lists(lists);
    debug!(lists = lists.len(), names = names.len(), width = width; "Joining name lists");

    let last = names.len().saturating_sub(1);
    let words: Vec<String> = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx < last {
                format!("{name}{SEPARATOR}")
            } else {
                name
            }
        })
        .collect();
    wrap(&words, width)
}

/// Greedy word wrap on single spaces. Words longer than `width` are split
/// across lines.
fn wrap(words: &[String], width: usize) -> String {
    let width = width.max(1);
    let mut out = String::new();
    let mut line_len = 0;

    for word in words {
        let mut word = word.as_str();
        let word_len = word.chars().count();

        if line_len > 0 && line_len + 1 + word_len <= width {
            out.push(' ');
            out.push_str(word);
            line_len += 1 + word_len;
            continue;
        }
        if line_len > 0 {
            out.push('\n');
            line_len = 0;
        }

        while word.chars().count() > width {
            let split = word
                .char_indices()
                .nth(width)
                .map_or(word.len(), |(idx, _)| idx);
            out.push_str(&word[..split]);
            out.push('\n');
            word = &word[split..];
        }
        out.push_str(word);
        line_len = word.chars().count();
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out
}
