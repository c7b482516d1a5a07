use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn metafeta_cmd() -> Command {
    let mut cmd = Command::cargo_bin("metafeta").unwrap();
    cmd.env_remove("METAFETA_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a metadata file under `<root>/metadata`
pub fn write_metadata(root: &Path, file_name: &str, contents: &str) {
    let dir = root.join("metadata");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file_name), contents).unwrap();
}
