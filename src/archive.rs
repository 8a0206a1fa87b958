//! Reading a single entry out of a zip (or jar) archive.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{ExtractError, ExtractResult};

/// Read the full content of the entry named `entry` from the archive at `path`
///
/// Entry names are looked up in the central directory and compared exactly,
/// so no other entry is read or decompressed. The zip reader indexes entries
/// by name: when several entries share a name, the last one in central
/// directory order is the one returned.
///
/// # Errors
/// - [`ExtractError::ArchiveOpen`] if the file is missing or not a zip archive
/// - [`ExtractError::EntryRead`] if the entry cannot be decompressed
/// - [`ExtractError::EntryNotFound`] if no entry has that name
pub fn read_entry(path: &Path, entry: &str) -> ExtractResult<Vec<u8>> {
    let open_error = |source: ZipError| ExtractError::ArchiveOpen {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| open_error(ZipError::Io(e)))?;
    let mut archive = ZipArchive::new(file).map_err(open_error)?;
    debug!(archive = %path.display(), entries = archive.len(), "opened archive");

    let Some(index) = archive.index_for_name(entry) else {
        return Err(ExtractError::EntryNotFound {
            entry: entry.to_string(),
            archive: path.to_path_buf(),
        });
    };

    let read_error = |source: ZipError| ExtractError::EntryRead {
        entry: entry.to_string(),
        source,
    };
    let mut file = archive.by_index(index).map_err(read_error)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| read_error(ZipError::Io(e)))?;
    debug!(entry, index, bytes = content.len(), "read entry");

    Ok(content)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    /// Write a zip archive containing `entries` into `dir`
    pub(crate) fn write_archive(
        dir: &Path,
        file_name: &str,
        entries: &[(&str, &str)],
    ) -> std::path::PathBuf {
        let path = dir.join(file_name);
        let file = File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    /// Overwrite every occurrence of `from` in the file at `path` with `to`
    fn patch_bytes(path: &Path, from: &[u8], to: &[u8]) {
        assert_eq!(from.len(), to.len());
        let mut bytes = std::fs::read(path).unwrap();
        let mut i = 0;
        while i + from.len() <= bytes.len() {
            if &bytes[i..i + from.len()] == from {
                bytes[i..i + from.len()].copy_from_slice(to);
                i += from.len();
            } else {
                i += 1;
            }
        }
        std::fs::write(path, bytes).unwrap();
    }

    /// Archive with stored (uncompressed) entries, so names never collide with content bytes
    fn write_stored_archive(dir: &Path, entries: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.join("client.jar");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_read_entry_returns_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(
            dir.path(),
            "client.jar",
            &[
                ("assets/minecraft/lang/de_de.json", "{\"a\":\"b\"}"),
                ("assets/minecraft/lang/en_us.json", "{\"death.fell\":\"%s fell\"}"),
            ],
        );

        let content = read_entry(&path, "assets/minecraft/lang/en_us.json").unwrap();
        assert_eq!(content, b"{\"death.fell\":\"%s fell\"}");
    }

    #[test]
    fn test_read_entry_name_match_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "client.jar", &[("lang/EN_US.json", "{}")]);

        let err = read_entry(&path, "lang/en_us.json").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::EntryNotFound { ref entry, .. } if entry == "lang/en_us.json"
        ));
    }

    #[test]
    fn test_read_entry_empty_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "client.jar", &[("empty.json", "")]);

        assert!(read_entry(&path, "empty.json").unwrap().is_empty());
    }

    #[test]
    fn test_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.jar");

        let err = read_entry(&path, "en_us.json").unwrap_err();
        assert!(matches!(err, ExtractError::ArchiveOpen { .. }));
        assert!(err.to_string().contains("does-not-exist.jar"));
    }

    #[test]
    fn test_not_a_zip_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jar");
        std::fs::write(&path, b"this is not a zip file").unwrap();

        let err = read_entry(&path, "en_us.json").unwrap_err();
        assert!(matches!(err, ExtractError::ArchiveOpen { .. }));
    }

    #[test]
    fn test_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "client.jar", &[("other.json", "{}")]);

        let err = read_entry(&path, "en_us.json").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "could not find entry 'en_us.json' in archive '{}'",
                path.display()
            )
        );
    }

    #[test]
    fn test_duplicate_entry_names_resolve_to_last() {
        let dir = tempfile::tempdir().unwrap();
        // Same-length placeholder name, renamed afterwards since the writer
        // refuses duplicate names
        let path = write_stored_archive(
            dir.path(),
            &[
                ("en_us.json", r#"{"death.a":"FIRST"}"#),
                ("en_us.jsoX", r#"{"death.a":"SECOND"}"#),
            ],
        );
        patch_bytes(&path, b"en_us.jsoX", b"en_us.json");

        let content = read_entry(&path, "en_us.json").unwrap();
        assert_eq!(content, br#"{"death.a":"SECOND"}"#);
    }

    #[test]
    fn test_corrupt_unrelated_entry_does_not_break_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_stored_archive(
            dir.path(),
            &[
                ("unrelated.class", "\u{ca}\u{fe}"),
                ("en_us.json", r#"{"death.fell":"%s fell"}"#),
            ],
        );
        // The first local header starts the file; break its signature
        let mut bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        bytes[..2].copy_from_slice(b"XX");
        std::fs::write(&path, bytes).unwrap();

        let content = read_entry(&path, "en_us.json").unwrap();
        assert_eq!(content, br#"{"death.fell":"%s fell"}"#);

        let err = read_entry(&path, "unrelated.class").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::EntryRead { ref entry, .. } if entry == "unrelated.class"
        ));
    }
}
