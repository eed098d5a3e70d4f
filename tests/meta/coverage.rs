//! Keeps `tests/unit/` a mirror of `src/` and every test file non-empty

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";
    const TESTS_ROOT: &str = "tests";

    // Crate roots and module declarations carry no logic to test
    fn needs_mirror(relative: &Path) -> bool {
        let name = relative.file_name().and_then(|name| name.to_str());
        !matches!(name, Some("lib.rs" | "main.rs" | "mod.rs"))
    }

    /// Rust files below `root`, relative to it
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(directory) = pending.pop() {
            for entry in fs::read_dir(&directory)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|extension| extension == "rs") {
                    let relative = path
                        .strip_prefix(root)
                        .map_err(|_| io::Error::other("entry escaped its root"))?;
                    found.insert(relative.to_path_buf());
                }
            }
        }

        Ok(found)
    }

    fn listing(paths: &[&PathBuf], from: &str, to: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {from}/{0} -> {to}/{0}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let sources = rust_files(Path::new(SRC_ROOT)).unwrap_or_default();
        let units = rust_files(Path::new(UNIT_ROOT)).unwrap_or_default();
        assert!(!sources.is_empty(), "no source files found under {SRC_ROOT}");

        let untested: Vec<&PathBuf> = sources
            .iter()
            .filter(|path| needs_mirror(path) && !units.contains(*path))
            .collect();

        assert!(
            untested.is_empty(),
            "Source files without a unit test file:\n{}",
            listing(&untested, SRC_ROOT, UNIT_ROOT)
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = rust_files(Path::new(SRC_ROOT)).unwrap_or_default();
        let units = rust_files(Path::new(UNIT_ROOT)).unwrap_or_default();

        let orphaned: Vec<&PathBuf> = units
            .iter()
            .filter(|path| needs_mirror(path) && !sources.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files whose source file is gone:\n{}",
            listing(&orphaned, UNIT_ROOT, SRC_ROOT)
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let root = Path::new(TESTS_ROOT);
        let files = rust_files(root).unwrap_or_default();

        let empty: Vec<String> = files
            .iter()
            .filter(|relative| !is_harness_root(root, relative) && needs_mirror(relative))
            .filter(|relative| {
                fs::read_to_string(root.join(relative))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|relative| format!("  - {TESTS_ROOT}/{}", relative.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }

    // Top-level files that only pull in modules from a same-named directory
    fn is_harness_root(root: &Path, relative: &Path) -> bool {
        relative.components().count() == 1
            && root.join(relative).with_extension("").is_dir()
    }
}
