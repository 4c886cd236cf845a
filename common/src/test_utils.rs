use std::path::PathBuf;
use std::sync::OnceLock;

/// Returns the workspace root (parent of the calling crate's manifest directory).
fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

fn test_output_dir() -> &'static PathBuf {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = workspace_root().join("test_output");
        std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
        dir
    })
}

/// Returns the path for an image or report a test wants to keep for inspection.
pub fn test_output_path(name: &str) -> PathBuf {
    test_output_dir().join(name)
}
