//! Keeps `tests/unit` mirroring the module tree under `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";
    const TESTS_ROOT: &str = "tests";

    // Files that only wire modules together or start the binary
    fn is_wiring(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn rust_files(root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    found.push(path);
                }
            }
        }
        Ok(found)
    }

    fn module_files(root: &str) -> BTreeSet<String> {
        let root = Path::new(root);
        let files = rust_files(root)
            .unwrap_or_else(|error| panic!("Failed to scan {}: {error}", root.display()));
        files
            .iter()
            .filter_map(|path| path.strip_prefix(root).ok())
            .map(|relative| relative.to_string_lossy().replace('\\', "/"))
            .filter(|relative| !is_wiring(relative))
            .collect()
    }

    // Tests each source module has a unit test file at the same relative path
    // Verified by adding a source file without tests
    #[test]
    fn test_every_module_has_unit_tests() {
        let tested = module_files(UNIT_ROOT);
        let missing: Vec<String> = module_files(SRC_ROOT)
            .into_iter()
            .filter(|module| !tested.contains(module))
            .map(|module| format!("  - {SRC_ROOT}/{module} has no {UNIT_ROOT}/{module}"))
            .collect();

        assert!(missing.is_empty(), "Untested modules:\n{}", missing.join("\n"));
    }

    // Tests unit test files do not outlive the modules they cover
    // Verified by leaving a test file behind after deleting its module
    #[test]
    fn test_no_orphaned_unit_tests() {
        let modules = module_files(SRC_ROOT);
        let orphaned: Vec<String> = module_files(UNIT_ROOT)
            .into_iter()
            .filter(|test| !modules.contains(test))
            .map(|test| format!("  - {UNIT_ROOT}/{test} has no {SRC_ROOT}/{test}"))
            .collect();

        assert!(orphaned.is_empty(), "Orphaned unit tests:\n{}", orphaned.join("\n"));
    }

    // Tests every non-wiring file under tests declares at least one test
    // Verified by adding an empty test file
    #[test]
    fn test_test_files_declare_tests() {
        let root = Path::new(TESTS_ROOT);
        let files = rust_files(root).unwrap_or_else(|error| panic!("Failed to scan tests: {error}"));

        let empty: Vec<String> = files
            .iter()
            .filter(|path| path.file_name().is_some_and(|name| name != "mod.rs"))
            .filter(|path| {
                fs::read_to_string(path).map_or(true, |content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - {}", path.display()))
            .collect();

        assert!(empty.is_empty(), "Test files without tests:\n{}", empty.join("\n"));
    }
}
