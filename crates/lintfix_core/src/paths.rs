use path_clean::clean;
use std::{
    env,
    path::{Component, Path, PathBuf},
};

use log::trace;

/// Turn a path reported by an external tool into a clean absolute path.
///
/// Relative paths are taken relative to `root`, the directory the tool ran in.
pub fn normalize_path(root: &Path, raw: &str) -> PathBuf {
    let raw = Path::new(raw.trim());
    if raw.is_absolute() { clean(raw) } else { clean(root.join(raw)) }
}

/// Relativize a path to the current working directory for clickable links
pub fn display_path(path: &Path) -> String {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(_) => return path.display().to_string(),
    };

    match make_relative(path, &cwd) {
        Some(rel_path) => {
            let result = rel_path.to_string_lossy().to_string();
            trace!("Relativized '{}' to '{}'", path.display(), result);
            result
        }
        None => path.display().to_string(),
    }
}

/// The path leading from directory `base` to `target`, or `None` when they share no root.
pub fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();

    let shared = target.iter().zip(&base).take_while(|(t, b)| t == b).count();
    if shared == 0 && target.first() != base.first() {
        return None;
    }

    let climb = base[shared..].iter().map(|_| Component::ParentDir);
    let descend = target[shared..]
        .iter()
        .copied()
        .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir));
    let result: PathBuf = climb.chain(descend).collect();

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_relative_header() {
        let root = Path::new("/project");
        assert_eq!(normalize_path(root, "./a.ts"), PathBuf::from("/project/a.ts"));
        assert_eq!(
            normalize_path(root, "stores/../stores/cart.ts"),
            PathBuf::from("/project/stores/cart.ts")
        );
    }

    #[test]
    fn test_normalize_absolute_header() {
        let root = Path::new("/project");
        assert_eq!(
            normalize_path(root, "/elsewhere/./pages/index.vue  "),
            PathBuf::from("/elsewhere/pages/index.vue")
        );
    }

    #[test]
    fn test_make_relative_same_dir() {
        let target = Path::new("/project/stores/cart.ts");
        let base = Path::new("/project/stores");
        assert_eq!(make_relative(target, base), Some(PathBuf::from("cart.ts")));
    }

    #[test]
    fn test_make_relative_parent_dir() {
        let target = Path::new("/project/stores/cart.ts");
        let base = Path::new("/project/stores/cart");
        assert_eq!(make_relative(target, base), Some(PathBuf::from("../cart.ts")));
    }

    #[test]
    fn test_make_relative_sibling_dir() {
        let target = Path::new("/project/server/api/orders.ts");
        let base = Path::new("/project/components");
        assert_eq!(make_relative(target, base), Some(PathBuf::from("../server/api/orders.ts")));
    }

    #[test]
    fn test_make_relative_to_ancestor() {
        let target = Path::new("/project");
        let base = Path::new("/project/stores/cart");
        assert_eq!(make_relative(target, base), Some(PathBuf::from("../..")));
    }

    #[test]
    fn test_make_relative_without_shared_root() {
        assert_eq!(make_relative(Path::new("stores/cart.ts"), Path::new("server")), None);
    }

    #[test]
    fn test_make_relative_same_path() {
        let target = Path::new("/project");
        assert_eq!(make_relative(target, target), Some(PathBuf::from(".")));
    }
}
