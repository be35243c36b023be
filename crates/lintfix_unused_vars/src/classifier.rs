//! Heuristic safety check deciding between deleting a declaration and renaming it.
//!
//! Only the physical line the linter pointed at is inspected. A declaration spanning
//! several lines is judged by its first line alone.

use log::trace;
use regex::Regex;
use std::sync::OnceLock;

/// Substrings marking asynchronous work on a line
const ASYNC_MARKERS: &[&str] = &["async", "await", ".then", ".catch"];

const SPREAD_MARKER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsafeReason {
    AlreadyPrefixed,
    FrameworkHook,
    MultiParamFunction,
    AsyncOperation,
    Spread,
    MultipleDeclarators,
    UnrecognizedShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Safety {
    SafeToRemove,
    Unsafe(UnsafeReason),
}

fn hook_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(on[A-Z]\w*|mounted|unmounted|created|destroyed|setup|watch|computed)\s*[:(]")
            .expect("Invalid framework hook regex pattern")
    })
}

fn multi_param_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            \([^()]*,[^()]*\)\s*(?::\s*[^=]+)?=>   # (a, b) => or (a, b): T =>
            |
            \bfunction\b[^(]*\([^)]*,               # function name(a, b
        ",
        )
        .expect("Invalid multi-parameter function regex pattern")
    })
}

/// `const|let|var <name> [: Type] = <initializer>` at the start of the line.
pub(crate) fn standalone_declaration_re(name: &str) -> Option<Regex> {
    Regex::new(&format!(
        r"^\s*(?:const|let|var)\s+{}\s*(?::[^=]+)?=\s*.+$",
        regex::escape(name)
    ))
    .ok()
}

fn has_declaration_shape(line: &str, name: &str) -> bool {
    !line.contains('{')
        && !line.contains('}')
        && standalone_declaration_re(name).is_some_and(|re| re.is_match(line))
}

/// Whether `text` has a comma outside any brackets or string literal.
fn has_top_level_comma(text: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in text.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// A line declaring more than one variable, like `let a = 1, b = 2`.
fn declares_several(line: &str) -> bool {
    // Type annotations never contain `=`, so the first one starts the initializer
    line.split_once('=').is_some_and(|(_, init)| has_top_level_comma(init))
}

/// A declaration of `name` alone; deleting the line removes nothing else.
pub(crate) fn is_standalone_declaration(line: &str, name: &str) -> bool {
    has_declaration_shape(line, name) && !declares_several(line)
}

pub(crate) fn is_destructuring(line: &str) -> bool {
    line.contains('{')
        && line.contains('}')
        && line.contains('=')
        && !(line.contains('(') && line.contains(')'))
}

/// Classify `line` for the unused identifier `name`. Rules apply in order, first match wins.
pub fn classify(line: &str, name: &str) -> Safety {
    let verdict = if name.starts_with('_') {
        Safety::Unsafe(UnsafeReason::AlreadyPrefixed)
    } else if hook_re().is_match(line) {
        Safety::Unsafe(UnsafeReason::FrameworkHook)
    } else if multi_param_re().is_match(line) {
        Safety::Unsafe(UnsafeReason::MultiParamFunction)
    } else if ASYNC_MARKERS.iter().any(|m| line.contains(m)) {
        Safety::Unsafe(UnsafeReason::AsyncOperation)
    } else if line.contains(SPREAD_MARKER) {
        Safety::Unsafe(UnsafeReason::Spread)
    } else if has_declaration_shape(line, name) && declares_several(line) {
        Safety::Unsafe(UnsafeReason::MultipleDeclarators)
    } else if is_standalone_declaration(line, name) || is_destructuring(line) {
        Safety::SafeToRemove
    } else {
        Safety::Unsafe(UnsafeReason::UnrecognizedShape)
    };
    trace!("Classified '{}' on `{}` as {:?}", name, line.trim(), verdict);
    verdict
}

pub fn is_safe_to_remove(line: &str, name: &str) -> bool {
    classify(line, name) == Safety::SafeToRemove
}
