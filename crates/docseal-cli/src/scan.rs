use std::io;
use std::path::Path;

use walkdir::WalkDir;

use docseal_ledger::BatchItem;

use crate::digest::file_digest;

/// Walk a directory tree and digest every regular file, producing the
/// ordered item sequence the batch ingestor consumes.
///
/// A file that cannot be read becomes a `Failed` item carrying the error
/// message — one bad file never aborts the batch. Entries are visited in
/// file-name order so repeated runs over the same tree produce the same
/// sequence.
pub fn scan_directory(root: &Path) -> io::Result<Vec<BatchItem>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("directory {} does not exist", root.display()),
        ));
    }

    let mut items = Vec::new();
    for result in WalkDir::new(root).sort_by_file_name() {
        match result {
            Ok(entry) if entry.file_type().is_file() => {
                let identifier = entry.path().display().to_string();
                match file_digest(entry.path()) {
                    Ok(digest) => items.push(BatchItem::Ready { identifier, digest }),
                    Err(e) => items.push(BatchItem::Failed {
                        identifier,
                        error: e.to_string(),
                    }),
                }
            }
            Ok(_) => {}
            Err(e) => {
                let identifier = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                items.push(BatchItem::Failed {
                    identifier,
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(items)
}
