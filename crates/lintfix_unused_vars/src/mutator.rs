use log::trace;
use regex::Regex;
use std::sync::OnceLock;

use lintfix_core::SourceFile;

use crate::classifier::{is_destructuring, is_standalone_declaration};

/// How a declaration was removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The whole physical line was deleted
    DeletedLine,
    /// One element was cut out of a destructuring pattern
    RemovedElement,
}

fn double_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*,").expect("Invalid double comma regex pattern"))
}

fn open_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\s*,").expect("Invalid open comma regex pattern"))
}

fn comma_close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*\}").expect("Invalid comma close regex pattern"))
}

fn empty_braces_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\s*\}").expect("Invalid empty braces regex pattern"))
}

/// One element of an object pattern binding `name`: `name`, `key: name`, or either with a
/// `= default`, together with the delimiter before and after it.
fn element_re(name: &str) -> Option<Regex> {
    Regex::new(&format!(
        r"(?P<pre>[{{,])(?P<lead>\s*)(?:[A-Za-z_$][\w$]*\s*:\s*)?{}(?:\s*=\s*[^,{{}}]+?)?(?P<tail>\s*)(?P<post>[,}}])(?P<after>[ \t]*)",
        regex::escape(name)
    ))
    .ok()
}

/// Cut the element bound to `name` out of the first `{ ... }` pattern on `line`.
///
/// Returns `None` when no such element exists, or when removing it would leave an empty
/// pattern.
pub fn strip_destructured(line: &str, name: &str) -> Option<String> {
    let caps = element_re(name)?.captures(line)?;
    let whole = caps.get(0)?;

    let replacement = match (&caps["pre"], &caps["post"]) {
        ("{", "}") => {
            trace!("Removing '{}' would empty the pattern in `{}`", name, line.trim());
            return None;
        }
        ("{", _) => format!("{{{}", &caps["lead"]),
        (_, ",") => format!(",{}", &caps["after"]),
        _ => format!("{}}}{}", &caps["tail"], &caps["after"]),
    };

    let updated = format!("{}{}{}", &line[..whole.start()], replacement, &line[whole.end()..]);
    let updated = double_comma_re().replace_all(&updated, ",");
    let updated = open_comma_re().replace_all(&updated, "{ ");
    let updated = comma_close_re().replace_all(&updated, " }").into_owned();

    let emptied = empty_braces_re().is_match(&updated) && !empty_braces_re().is_match(line);
    if updated == line || emptied {
        return None;
    }
    Some(updated)
}

/// Remove the declaration of `name` on 1-based `line`, in memory.
pub fn remove_declaration(file: &mut SourceFile, line: usize, name: &str) -> Option<Removal> {
    let target = file.line(line)?;

    if is_standalone_declaration(target, name) {
        file.remove_line(line)?;
        return Some(Removal::DeletedLine);
    }

    if is_destructuring(target) {
        let updated = strip_destructured(target, name)?;
        if file.replace_line(line, &updated) {
            return Some(Removal::RemovedElement);
        }
    }

    None
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// The innermost bracket opened and not yet closed in `prefix`.
fn enclosing_opener(prefix: &str) -> Option<char> {
    let mut depth = 0usize;
    for c in prefix.chars().rev() {
        match c {
            '}' | ']' | ')' => depth += 1,
            '{' | '[' | '(' => {
                if depth == 0 {
                    return Some(c);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

enum Occurrence {
    /// A plain binding or reference: rename in place
    Plain,
    /// `{ name }` shorthand in an object pattern or import list
    Shorthand,
    /// `{ name: ... }` key or `{ name as ... }` import source; not the binding itself
    Key,
}

fn occurrence_kind(line: &str, start: usize, end: usize) -> Occurrence {
    let before = line[..start].trim_end();
    let after = line[end..].trim_start();
    let in_braces = enclosing_opener(&line[..start]) == Some('{');

    if in_braces && (after.starts_with(':') || after.starts_with("as ")) {
        return Occurrence::Key;
    }

    let opens = before.ends_with('{') || before.ends_with(',');
    let closes = after.starts_with(',')
        || after.starts_with('}')
        || (after.starts_with('=') && !after.starts_with("==") && !after.starts_with("=>"));

    if in_braces && opens && closes { Occurrence::Shorthand } else { Occurrence::Plain }
}

/// Rename the first whole-identifier occurrence of `name` on `line` to `_name`.
///
/// Shorthand bindings are expanded so they keep referring to the same property or export:
/// `{ name }` becomes `{ name: _name }` and `import { name }` becomes `import { name as _name }`.
pub fn prefix_in_line(line: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    for (start, _) in line.match_indices(name) {
        let end = start + name.len();
        let bounded_left = line[..start].chars().next_back().is_none_or(|c| !is_ident_char(c));
        let bounded_right = line[end..].chars().next().is_none_or(|c| !is_ident_char(c));
        if !bounded_left || !bounded_right {
            continue;
        }

        let renamed = match occurrence_kind(line, start, end) {
            Occurrence::Key => continue,
            Occurrence::Plain => format!("_{name}"),
            Occurrence::Shorthand if line.trim_start().starts_with("import") => {
                format!("{name} as _{name}")
            }
            Occurrence::Shorthand => format!("{name}: _{name}"),
        };
        return Some(format!("{}{}{}", &line[..start], renamed, &line[end..]));
    }

    None
}

/// Prefix `name` with an underscore on 1-based `line`, in memory.
pub fn prefix_identifier(file: &mut SourceFile, line: usize, name: &str) -> bool {
    let Some(updated) = file.line(line).and_then(|target| prefix_in_line(target, name)) else {
        return false;
    };
    file.replace_line(line, &updated)
}
