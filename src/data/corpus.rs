//! Discovery of paper text files on disk.

use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::{info, warn};
use walkdir::WalkDir;

/// Path fragments that mark files which are never papers.
const EXCLUDED_FRAGMENTS: &[&str] = &["output_summary.txt", ".gz"];

/// Walk `root` recursively and list candidate paper files in a stable order.
///
/// Summary files written by the download step and gzip archives are left
/// out. Entries that cannot be read are logged and skipped.
pub fn collect_documents(root: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("paper directory {} does not exist", root.display()),
        ));
    }
    let mut documents = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable corpus entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || is_excluded(entry.path()) {
            continue;
        }
        documents.push(entry.into_path());
    }
    info!(root = %root.display(), count = documents.len(), "collected documents");
    Ok(documents)
}

fn is_excluded(path: &Path) -> bool {
    let text = path.to_string_lossy();
    EXCLUDED_FRAGMENTS
        .iter()
        .any(|fragment| text.contains(fragment))
}

/// Identifier of a paper: its file name without extension.
pub fn paper_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_and_gzip_files_are_excluded() {
        assert!(is_excluded(Path::new("papers/output_summary.txt")));
        assert!(is_excluded(Path::new("papers/PMC1.txt.gz")));
        assert!(!is_excluded(Path::new("papers/PMC1.txt")));
    }

    #[test]
    fn paper_id_is_file_stem() {
        assert_eq!(paper_id(Path::new("a/b/PMC12345.txt")), "PMC12345");
    }
}
