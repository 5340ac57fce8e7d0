use std::path::{Path, PathBuf};

use crate::model::category::Category;

/// Everything after the final `.` of `file_name`, or `None` when there is no `.`.
pub fn parse_extension(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

pub fn matches_suffix(key: &str, suffix: &str) -> bool {
    key.ends_with(suffix)
}

pub fn output_file_name(category: Category, index: usize, ext: &str) -> String {
    format!("{}_{}.{}", category, index, ext)
}

/// Hidden sibling of `dest` that a download streams into before it is renamed.
pub fn partial_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    dest.with_file_name(format!(".{}.part", name))
}
