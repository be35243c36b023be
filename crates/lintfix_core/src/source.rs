use anyhow::{Context, Result, anyhow};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use log::{debug, trace};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// A text file held in memory as its physical lines.
///
/// Each stored line keeps its original terminator (`\n`, `\r\n`, or none for a final
/// line without one), so untouched lines are written back byte-identical.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    lines: Vec<String>,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self> {
        trace!("Reading source file: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::from_text(path, &text))
    }

    pub fn from_text(path: &Path, text: &str) -> Self {
        let lines = text.split_inclusive('\n').map(str::to_string).collect();
        Self { path: path.to_path_buf(), lines }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The content of 1-based line `number`, without its terminator.
    pub fn line(&self, number: usize) -> Option<&str> {
        let raw = self.lines.get(number.checked_sub(1)?)?;
        Some(split_terminator(raw).0)
    }

    /// Replace the content of line `number`, keeping its terminator. Returns false when
    /// the line does not exist.
    pub fn replace_line(&mut self, number: usize, content: &str) -> bool {
        let Some(raw) = number.checked_sub(1).and_then(|idx| self.lines.get_mut(idx)) else {
            return false;
        };
        let terminator = split_terminator(raw).1.to_string();
        *raw = format!("{content}{terminator}");
        true
    }

    /// Remove line `number` entirely, returning its content.
    pub fn remove_line(&mut self, number: usize) -> Option<String> {
        let idx = number.checked_sub(1)?;
        if idx >= self.lines.len() {
            return None;
        }
        let raw = self.lines.remove(idx);
        Some(split_terminator(&raw).0.to_string())
    }

    pub fn contents(&self) -> String {
        self.lines.concat()
    }

    pub fn write(&self) -> Result<()> {
        debug!("Writing {} lines to {}", self.lines.len(), self.path.display());
        write_atomic(&self.path, self.contents().as_bytes())
    }
}

fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(content) = raw.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = raw.strip_suffix('\n') {
        (content, "\n")
    } else {
        (raw, "")
    }
}

/// Replace `path` with `contents` through a temporary file and rename.
///
/// The replacement keeps the permissions of the file it replaces.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let permissions = fs::metadata(path).ok().map(|meta| meta.permissions());
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| {
            f.write_all(contents)?;
            if let Some(permissions) = &permissions {
                f.set_permissions(permissions.clone())?;
            }
            f.flush()
        })
        .map_err(|err| anyhow!("Failed to write {}: {err}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_line_access_is_one_based() {
        let file = SourceFile::from_text(Path::new("a.ts"), "first\nsecond\nthird");
        assert_eq!(file.len(), 3);
        assert_eq!(file.line(0), None);
        assert_eq!(file.line(1), Some("first"));
        assert_eq!(file.line(3), Some("third"));
        assert_eq!(file.line(4), None);
    }

    #[test]
    fn test_replace_keeps_crlf_terminator() {
        let mut file = SourceFile::from_text(Path::new("a.ts"), "const a = 1;\r\nconst b = 2;\r\n");
        assert!(file.replace_line(1, "const _a = 1;"));
        assert_eq!(file.contents(), "const _a = 1;\r\nconst b = 2;\r\n");
        assert!(!file.replace_line(9, "nope"));
    }

    #[test]
    fn test_remove_line_leaves_others_untouched() {
        let text = "import { ref } from 'vue'\n\nconst x = compute();\n  return ref(1)\n";
        let mut file = SourceFile::from_text(Path::new("a.ts"), text);
        assert_eq!(file.remove_line(3).as_deref(), Some("const x = compute();"));
        assert_eq!(file.contents(), "import { ref } from 'vue'\n\n  return ref(1)\n");
        assert_eq!(file.remove_line(10), None);
    }

    #[test]
    fn test_missing_final_newline_round_trips() {
        let text = "a\nb";
        let file = SourceFile::from_text(Path::new("a.ts"), text);
        assert_eq!(file.contents(), text);
    }

    #[test]
    fn test_write_replaces_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cart.ts");
        fs::write(&path, "const total = 0;\nexport {}\n").unwrap();

        let mut file = SourceFile::read(&path).unwrap();
        file.remove_line(1);
        file.write().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "export {}\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("build.mjs");
        fs::write(&path, "#!/usr/bin/env node\nconst f = (a, b) => a\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let mut file = SourceFile::read(&path).unwrap();
        assert!(file.replace_line(2, "const f = (a, _b) => a"));
        file.write().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "#!/usr/bin/env node\nconst f = (a, _b) => a\n"
        );
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = SourceFile::read(&temp_dir.path().join("gone.ts")).unwrap_err();
        assert!(err.to_string().contains("gone.ts"));
    }
}
