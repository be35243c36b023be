use anyhow::{Context, Result, anyhow};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use serde_json::Value;
use std::{fs, path::Path, thread};

use lintfix_core::{CollectorConfig, EXCLUDED_PATH_MARKERS, collect_files, write_atomic};

use crate::{
    config::Config,
    merge::{MergeStats, merge_into},
    patch::LocalePatch,
    types::{FileReport, FileStatus, UpdateResult},
};

pub fn run_locale_update(mut cfg: Config) -> Result<UpdateResult> {
    info!("Starting locale update");

    cfg.initialize()?;
    let dir = cfg.locales_dir()?;
    if !dir.is_dir() {
        return Err(anyhow!("Locale directory {} does not exist", dir.display()));
    }
    info!("Using locale directory: {}", dir.display());

    let patch = LocalePatch::load(&cfg.patch)?;

    let files = collect_files(&CollectorConfig {
        root: dir.clone(),
        extensions: vec!["json".to_string()],
        exclude: EXCLUDED_PATH_MARKERS.iter().map(|m| m.to_string()).collect(),
    })?;
    if files.is_empty() {
        warn!("No locale files found under {}", dir.display());
        return Err(anyhow!("No locale files found under {}", dir.display()));
    }
    info!("Processing {} locale files in parallel", files.len());

    // Every file has exactly one worker, so parallel writes never touch the same path
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            debug!("Thread {:?} processing: {}", thread::current().id(), path.display());
            update_locale_file(path, &patch, cfg.overwrite, cfg.dry_run)
        })
        .collect();

    let unmatched_locales: Vec<String> = patch
        .locales()
        .filter(|locale| !reports.iter().any(|r| r.locale == *locale))
        .map(str::to_string)
        .collect();
    for locale in &unmatched_locales {
        warn!("Patch section '{}' matches no locale file", locale);
    }

    let result = UpdateResult { files: reports, unmatched_locales, dry_run: cfg.dry_run };
    info!(
        "Locale update complete: {} updated, {} unchanged, {} failed",
        result.count(FileStatus::Updated),
        result.count(FileStatus::Unchanged),
        result.count(FileStatus::Failed)
    );
    Ok(result)
}

/// Locale name of a file: its stem, so `es.json` is `es`.
fn locale_of(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
}

/// Merge the applicable patch sections into one locale file, writing it back if it changed.
pub fn update_locale_file(
    path: &Path,
    patch: &LocalePatch,
    overwrite: bool,
    dry_run: bool,
) -> FileReport {
    let locale = locale_of(path);
    match merge_file(path, &locale, patch, overwrite, dry_run) {
        Ok((status, stats)) => {
            FileReport { path: path.to_path_buf(), locale, status, stats, error: None }
        }
        Err(e) => {
            warn!("Failed to update {}: {:#}", path.display(), e);
            FileReport {
                path: path.to_path_buf(),
                locale,
                status: FileStatus::Failed,
                stats: MergeStats::default(),
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

fn merge_file(
    path: &Path,
    locale: &str,
    patch: &LocalePatch,
    overwrite: bool,
    dry_run: bool,
) -> Result<(FileStatus, MergeStats)> {
    let sections = patch.sections_for(locale);
    if sections.is_empty() {
        trace!("No patch sections for locale '{}'", locale);
        return Ok((FileStatus::Unchanged, MergeStats::default()));
    }

    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let Value::Object(target) = &mut value else {
        return Err(anyhow!("{} does not hold a JSON object", path.display()));
    };

    let mut stats = MergeStats::default();
    for section in sections {
        stats.absorb(merge_into(target, section, overwrite));
    }
    debug!(
        "{}: {} added, {} overwritten, {} kept",
        path.display(),
        stats.added,
        stats.overwritten,
        stats.kept
    );

    if !stats.changed() {
        return Ok((FileStatus::Unchanged, stats));
    }

    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    if rendered == text {
        return Ok((FileStatus::Unchanged, stats));
    }

    if !dry_run {
        write_atomic(path, rendered.as_bytes())?;
    }
    Ok((FileStatus::Updated, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn config(root: &Path, patch: PathBuf) -> Config {
        Config {
            root: Some(root.to_path_buf()),
            dir: PathBuf::from("i18n/locales"),
            patch,
            overwrite: false,
            dry_run: false,
            json: false,
        }
    }

    const ES: &str = "{\n  \"common\": {\n    \"save\": \"Guardar\",\n    \"cancel\": \"Cancelar\"\n  },\n  \"cart\": {\n    \"empty\": \"Tu carrito está vacío\"\n  }\n}\n";

    #[test]
    fn test_new_top_level_key_preserves_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let es = create_test_file(root, "i18n/locales/es.json", ES);
        let patch = create_test_file(
            root,
            "patch.json",
            r#"{ "es": { "checkout": { "title": "Finalizar compra" } } }"#,
        );

        let result = run_locale_update(config(root, patch)).unwrap();

        assert_eq!(result.count(FileStatus::Updated), 1);
        let written = fs::read_to_string(&es).unwrap();
        let value: Value = serde_json::from_str(&written).unwrap();
        let original: Value = serde_json::from_str(ES).unwrap();
        assert_eq!(value["common"], original["common"]);
        assert_eq!(value["cart"], original["cart"]);
        assert_eq!(value["checkout"]["title"], "Finalizar compra");

        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["common", "cart", "checkout"]);
        // Non-ASCII text is written verbatim, not escaped
        assert!(written.contains("Tu carrito está vacío"));
        assert!(written.starts_with(&ES[..ES.len() - 3]));
    }

    #[test]
    fn test_shared_section_applies_to_all_locales() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let en = create_test_file(root, "i18n/locales/en.json", "{\n  \"title\": \"Shop\"\n}\n");
        let ro = create_test_file(root, "i18n/locales/ro.json", "{\n  \"title\": \"Magazin\"\n}\n");
        let patch = create_test_file(
            root,
            "patch.json",
            r#"{ "*": { "brand": "Moldova Direct" }, "ru": { "title": "Магазин" } }"#,
        );

        let result = run_locale_update(config(root, patch)).unwrap();

        assert_eq!(result.count(FileStatus::Updated), 2);
        assert_eq!(result.unmatched_locales, vec!["ru"]);
        for path in [en, ro] {
            let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
            assert_eq!(value["brand"], "Moldova Direct");
        }
    }

    #[test]
    fn test_unchanged_file_is_not_rewritten() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        // Four-space indentation would be normalized by a rewrite
        let text = "{\n    \"title\": \"Shop\"\n}\n";
        let en = create_test_file(root, "i18n/locales/en.json", text);
        let patch = create_test_file(root, "patch.json", r#"{ "en": { "title": "Store" } }"#);

        let result = run_locale_update(config(root, patch)).unwrap();

        assert_eq!(result.count(FileStatus::Unchanged), 1);
        assert_eq!(result.files[0].stats.kept, 1);
        assert_eq!(fs::read_to_string(en).unwrap(), text);
    }

    #[test]
    fn test_invalid_locale_file_fails_alone() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "i18n/locales/en.json", "{ \"title\": ");
        let es = create_test_file(root, "i18n/locales/es.json", "{}\n");
        let patch = create_test_file(root, "patch.json", r#"{ "*": { "brand": "MD" } }"#);

        let result = run_locale_update(config(root, patch)).unwrap();

        assert_eq!(result.count(FileStatus::Failed), 1);
        assert_eq!(result.count(FileStatus::Updated), 1);
        let failed = result.files.iter().find(|f| f.status == FileStatus::Failed).unwrap();
        assert_eq!(failed.locale, "en");
        assert!(failed.error.as_deref().unwrap().contains("Failed to parse"));
        assert_eq!(fs::read_to_string(es).unwrap(), "{\n  \"brand\": \"MD\"\n}\n");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let en = create_test_file(root, "i18n/locales/en.json", "{}\n");
        let patch = create_test_file(root, "patch.json", r#"{ "en": { "title": "Shop" } }"#);

        let mut cfg = config(root, patch);
        cfg.dry_run = true;
        let result = run_locale_update(cfg).unwrap();

        assert!(result.dry_run);
        assert_eq!(result.count(FileStatus::Updated), 1);
        assert_eq!(fs::read_to_string(en).unwrap(), "{}\n");
    }

    #[test]
    fn test_build_output_copies_are_not_touched() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let en = create_test_file(root, "i18n/locales/en.json", "{}\n");
        let built = create_test_file(root, "i18n/locales/.output/en.json", "{}\n");
        let patch = create_test_file(root, "patch.json", r#"{ "en": { "title": "Shop" } }"#);

        let result = run_locale_update(config(root, patch)).unwrap();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].path, en);
        assert_eq!(fs::read_to_string(built).unwrap(), "{}\n");
    }

    #[test]
    fn test_missing_locale_dir_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let patch = create_test_file(root, "patch.json", "{}");
        assert!(run_locale_update(config(root, patch)).is_err());
    }
}
