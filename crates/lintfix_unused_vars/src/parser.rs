use log::{debug, trace};
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use lintfix_core::{SOURCE_EXTENSIONS, normalize_path};

use crate::types::Diagnostic;

/// Phrases identifying an unused-variable report, in message text or rule id
const UNUSED_MARKERS: &[&str] =
    &["is defined but never used", "is assigned a value but never used", "no-unused-vars"];

fn warning_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*(\d+):(\d+)\s+warning\s+['"]([^'"]+)['"]"#)
            .expect("Invalid warning line regex pattern")
    })
}

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid ANSI escape regex pattern"))
}

fn drive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]:[\\/]").expect("Invalid drive prefix regex pattern"))
}

/// Streaming parser for the linter's "stylish" output.
///
/// File paths appear on their own unindented header line; the diagnostics below it
/// belong to that file until the next header.
pub struct DiagnosticParser {
    root: PathBuf,
    current_file: Option<PathBuf>,
}

impl DiagnosticParser {
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf(), current_file: None }
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Feed one line of output, returning the diagnostic it carries, if any.
    pub fn parse_line(&mut self, raw: &str) -> Option<Diagnostic> {
        let line = ansi_re().replace_all(raw, "");

        if let Some(header) = header_path(&line) {
            let file = normalize_path(&self.root, header);
            trace!("Diagnostics now refer to {}", file.display());
            self.current_file = Some(file);
            return None;
        }

        let caps = warning_re().captures(&line)?;
        let rest = &line[caps.get(0)?.end()..];
        if !UNUSED_MARKERS.iter().any(|m| rest.contains(m)) {
            trace!("Ignoring warning for another rule: {}", line.trim());
            return None;
        }

        let Some(file) = &self.current_file else {
            trace!("Ignoring warning before any file header: {}", line.trim());
            return None;
        };

        let line_num = caps[1].parse().ok()?;
        let column = caps[2].parse().ok()?;
        Some(Diagnostic { file: file.clone(), line: line_num, column, name: caps[3].to_string() })
    }
}

/// Recognize an unindented line naming a source file.
fn header_path(line: &str) -> Option<&str> {
    if line.is_empty() || line.starts_with(char::is_whitespace) {
        return None;
    }
    let candidate = line.trim_end();

    if candidate.starts_with('/')
        || candidate.starts_with("./")
        || candidate.starts_with("../")
        || drive_re().is_match(candidate)
    {
        return Some(candidate);
    }

    // A bare relative path such as `components/Hero.vue`
    if !candidate.contains(char::is_whitespace)
        && let Some((_, ext)) = candidate.rsplit_once('.')
        && SOURCE_EXTENSIONS.contains(&ext)
    {
        return Some(candidate);
    }

    None
}

/// Parse a full block of linter output into diagnostics, in emission order.
pub fn parse_diagnostics(root: &Path, output: &str) -> Vec<Diagnostic> {
    let mut parser = DiagnosticParser::new(root);
    let diagnostics: Vec<Diagnostic> =
        output.lines().filter_map(|l| parser.parse_line(l)).collect();
    debug!("Parsed {} unused-variable diagnostics", diagnostics.len());
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/project";

    #[test]
    fn test_header_then_warning() {
        let output = "./a.ts\n  12:3  warning  'x' is defined but never used\n";
        let diags = parse_diagnostics(Path::new(ROOT), output);
        assert_eq!(
            diags,
            vec![Diagnostic {
                file: PathBuf::from("/project/a.ts"),
                line: 12,
                column: 3,
                name: "x".to_string(),
            }]
        );
    }

    #[test]
    fn test_stylish_output_with_rule_ids() {
        let output = "\
/project/stores/cart.ts
  14:9   warning  'total' is assigned a value but never used  @typescript-eslint/no-unused-vars
  20:1   warning  Unexpected console statement                 no-console

/project/components/Hero.vue
  3:10  warning  \"ref\" is defined but never used  no-unused-vars

✖ 3 problems (0 errors, 3 warnings)
";
        let diags = parse_diagnostics(Path::new(ROOT), output);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].file, PathBuf::from("/project/stores/cart.ts"));
        assert_eq!(diags[0].name, "total");
        assert_eq!(diags[0].line, 14);
        assert_eq!(diags[1].file, PathBuf::from("/project/components/Hero.vue"));
        assert_eq!(diags[1].name, "ref");
        assert_eq!(diags[1].column, 10);
    }

    #[test]
    fn test_warning_before_header_is_dropped() {
        let output = "  1:1  warning  'x' is defined but never used\n";
        assert!(parse_diagnostics(Path::new(ROOT), output).is_empty());
    }

    #[test]
    fn test_errors_and_malformed_lines_are_dropped() {
        let output = "\
./a.ts
  2:5  error  'y' is defined but never used  no-unused-vars
  x:5  warning  'z' is defined but never used
  warning  'w' is defined but never used
";
        assert!(parse_diagnostics(Path::new(ROOT), output).is_empty());
    }

    #[test]
    fn test_npm_noise_is_not_a_header() {
        let mut parser = DiagnosticParser::new(Path::new(ROOT));
        assert!(parser.parse_line("> shop@1.0.0 lint").is_none());
        assert!(parser.parse_line("> eslint .").is_none());
        assert!(parser.current_file().is_none());
        assert!(parser.parse_line("components/Hero.vue").is_none());
        assert_eq!(parser.current_file(), Some(Path::new("/project/components/Hero.vue")));
    }

    #[test]
    fn test_ansi_colors_are_stripped() {
        let output = "\x1b[4m/project/a.ts\x1b[24m\n  \x1b[2m7:3\x1b[22m  \x1b[33mwarning\x1b[39m  'x' is defined but never used\n";
        let diags = parse_diagnostics(Path::new(ROOT), output);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].file, PathBuf::from("/project/a.ts"));
        assert_eq!(diags[0].line, 7);
    }

    #[test]
    fn test_header_detection() {
        assert_eq!(header_path("/abs/file.ts"), Some("/abs/file.ts"));
        assert_eq!(header_path("../up/file.js  "), Some("../up/file.js"));
        assert_eq!(header_path("C:\\repo\\file.ts"), Some("C:\\repo\\file.ts"));
        assert_eq!(header_path("  12:3  warning"), None);
        assert_eq!(header_path("✖ 3 problems"), None);
        assert_eq!(header_path("README.md"), None);
    }
}
