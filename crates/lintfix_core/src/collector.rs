use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::PathBuf;

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Extensions (without the dot) a file must have to be collected
    pub extensions: Vec<String>,
    /// Substrings of the root-relative path that exclude a file
    pub exclude: Vec<String>,
}

pub fn collect_files(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting files with extensions {:?}", cfg.extensions);
    let mut files: Vec<PathBuf> = Vec::new();
    let root = &cfg.root;
    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(root).hidden(false).ignore(true).git_ignore(true).build();

    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        let rel_str = p.strip_prefix(root).unwrap_or(p).to_string_lossy().replace('\\', "/");
        if let Some(marker) = cfg.exclude.iter().find(|m| rel_str.contains(m.as_str())) {
            trace!("Skipping {} (matches '{}')", rel_str, marker);
            continue;
        }

        if let Some(ext) = p.extension().and_then(|e| e.to_str())
            && cfg.extensions.iter().any(|e| e == ext)
        {
            trace!("Collected file: {}", rel_str);
            files.push(p.to_path_buf());
        }
    }

    files.sort();
    debug!("Collected {} files", files.len());
    Ok(files)
}
