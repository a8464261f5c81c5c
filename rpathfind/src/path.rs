//! Parent-directory computation for library paths.

use std::path::{Component, Path, PathBuf};

/// Returns the parent of `libdir`, the runtime's base directory.
///
/// Works on path components, so trailing and repeated separators are
/// ignored: `/usr/lib/` yields `/usr`. A root (or prefix + root) has no
/// parent and is returned as-is. A single relative component yields `.`.
pub fn base_dir(libdir: impl AsRef<Path>) -> PathBuf {
    let mut components: Vec<Component<'_>> = libdir.as_ref().components().collect();

    if matches!(
        components.last(),
        Some(Component::Normal(_) | Component::CurDir | Component::ParentDir)
    ) {
        components.pop();
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_final_component() {
        assert_eq!(base_dir("/usr/lib/python3.9"), Path::new("/usr/lib"));
        assert_eq!(base_dir("/opt/lang/lib64"), Path::new("/opt/lang"));
    }

    #[test]
    fn ignores_trailing_and_repeated_separators() {
        assert_eq!(base_dir("/usr/lib/"), Path::new("/usr"));
        assert_eq!(base_dir("/usr/lib//"), Path::new("/usr"));
        assert_eq!(base_dir("/usr//lib"), Path::new("/usr"));
    }

    #[test]
    fn top_level_dir_yields_root() {
        assert_eq!(base_dir("/lib"), Path::new("/"));
        assert_eq!(base_dir("/"), Path::new("/"));
    }

    #[test]
    fn relative_paths() {
        assert_eq!(base_dir("lib/python"), Path::new("lib"));
        assert_eq!(base_dir("lib"), Path::new("."));
        assert_eq!(base_dir("lib/"), Path::new("."));
    }

    #[cfg(windows)]
    #[test]
    fn keeps_windows_prefix() {
        assert_eq!(base_dir(r"C:\Python39\libs"), Path::new(r"C:\Python39"));
        assert_eq!(base_dir(r"C:\libs"), Path::new(r"C:\"));
    }
}
