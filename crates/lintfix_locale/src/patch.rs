use anyhow::{Context, Result, anyhow};
use log::debug;
use serde_json::{Map, Value};
use std::{fs, path::Path};

/// Patch section applied to every locale file
pub const SHARED_SECTION: &str = "*";

/// Keys to merge, grouped by locale name.
#[derive(Debug, Clone, Default)]
pub struct LocalePatch {
    sections: Map<String, Value>,
}

impl LocalePatch {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading locale patch from {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read patch file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid patch file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let Value::Object(sections) = serde_json::from_str::<Value>(text)? else {
            return Err(anyhow!("patch must be a JSON object keyed by locale"));
        };
        if let Some((locale, _)) = sections.iter().find(|(_, v)| !v.is_object()) {
            return Err(anyhow!("patch section '{}' must be a JSON object", locale));
        }
        debug!("Patch has {} sections", sections.len());
        Ok(Self { sections })
    }

    /// Sections applying to `locale`: the shared section first, then the locale's own.
    pub fn sections_for(&self, locale: &str) -> Vec<&Map<String, Value>> {
        [SHARED_SECTION, locale]
            .iter()
            .filter_map(|name| self.sections.get(*name))
            .filter_map(Value::as_object)
            .collect()
    }

    /// Locale names the patch targets explicitly.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str).filter(|k| *k != SHARED_SECTION)
    }
}
