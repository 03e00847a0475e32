use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Result, SrrdbError};

use super::parser::{Scanner, signature_mismatches};
use super::structures::{MarkerCheck, StoredFile};

/// Extension that selects the whole SRR file instead of its members
pub const SRR_EXTENSION: &str = "srr";

/// Returns true if `name` ends with `extension`, ignoring ASCII case.
///
/// This is a raw suffix compare: `foo.mp3` matches both `mp3` and `p3`.
pub fn matches_extension(name: &str, extension: &str) -> bool {
    let (name, extension) = (name.as_bytes(), extension.as_bytes());
    name.len() >= extension.len()
        && name[name.len() - extension.len()..].eq_ignore_ascii_case(extension)
}

/// Returns true if `extension` asks for the SRR file itself.
pub fn wants_whole_container(extension: Option<&str>) -> bool {
    match extension {
        None => true,
        Some(ext) => ext.is_empty() || ext.eq_ignore_ascii_case(SRR_EXTENSION),
    }
}

/// SRR file extractor
///
/// Owns the downloaded bytes only while the members are being cut out.
pub struct SrrExtractor {
    srr: Vec<u8>,
    scanner: Scanner,
}

impl SrrExtractor {
    /// Wrap a downloaded SRR file, rejecting it if the signature is wrong.
    pub fn new(srr: Vec<u8>, marker_check: MarkerCheck) -> Result<Self> {
        if signature_mismatches(&srr) {
            return Err(SrrdbError::InvalidContainer);
        }
        Ok(Self {
            srr,
            scanner: Scanner::new(marker_check),
        })
    }

    /// The raw SRR bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.srr
    }

    /// List all stored files in the SRR file
    pub fn list_files(&self) -> Result<Vec<StoredFile>> {
        self.scanner.scan(&self.srr)
    }

    /// Stored files whose name ends with `extension`, in scan order
    ///
    /// # Errors
    ///
    /// [`SrrdbError::MemberNotFound`] if no stored file matches.
    pub fn extract_matching(&self, extension: &str) -> Result<Vec<StoredFile>> {
        let files: Vec<StoredFile> = self
            .list_files()?
            .into_iter()
            .filter(|f| matches_extension(&f.name, extension))
            .collect();

        if files.is_empty() {
            return Err(SrrdbError::MemberNotFound(extension.to_string()));
        }
        Ok(files)
    }
}

/// Compute where a stored file is written below `root`.
///
/// Both `/` and `\` separate path components. Empty, `.`, `..` and drive
/// components are dropped so the result always stays inside `root`.
/// With `prune_paths` only the last component is kept.
pub fn output_path(root: &Path, name: &str, prune_paths: bool) -> Option<PathBuf> {
    let components: Vec<&str> = name
        .split(['/', '\\'])
        .filter(|c| !c.is_empty() && *c != "." && *c != ".." && !c.ends_with(':'))
        .collect();

    let path = if prune_paths {
        root.join(components.last()?)
    } else if components.is_empty() {
        return None;
    } else {
        components.iter().fold(root.to_path_buf(), |p, c| p.join(c))
    };
    Some(path)
}

/// Save `data` below `root` under the stored file's `name`.
///
/// Parent directories are created unless `prune_paths` is set.
pub async fn save_member(root: &Path, name: &str, data: &[u8], prune_paths: bool) -> Result<PathBuf> {
    let output_path = output_path(root, name, prune_paths).ok_or_else(|| {
        SrrdbError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("unusable file name {:?}", name),
        ))
    })?;

    // Create parent directories if needed
    if !prune_paths {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
    }

    let mut file = fs::File::create(&output_path).await?;
    file.write_all(data).await?;
    file.flush().await?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srr::structures::STORED_FILE_MARKER;
    use tempfile::TempDir;

    fn srr_with(names: &[&str]) -> Vec<u8> {
        let mut srr = vec![0x69, 0x69, 0x69, 0x01, 0x00, 0x07, 0x00];
        for name in names {
            srr.extend_from_slice(&STORED_FILE_MARKER);
            srr.extend_from_slice(&[0x00, 0x80, 0x00, 0x00]);
            srr.extend_from_slice(&(name.len() as u32).to_le_bytes());
            srr.extend_from_slice(&(name.len() as u16).to_le_bytes());
            srr.extend_from_slice(name.as_bytes());
            srr.extend_from_slice(name.as_bytes());
        }
        srr
    }

    #[test]
    fn test_matches_extension() {
        assert!(matches_extension("Movie.NFO", "nfo"));
        assert!(matches_extension("movie.nfo", "NFO"));
        assert!(matches_extension("foo.mp3", "p3"));
        assert!(matches_extension("foo.mp3", ""));
        assert!(!matches_extension("nfo", "x.nfo"));
        assert!(!matches_extension("movie.sfv", "nfo"));
    }

    #[test]
    fn test_wants_whole_container() {
        assert!(wants_whole_container(None));
        assert!(wants_whole_container(Some("")));
        assert!(wants_whole_container(Some("SRR")));
        assert!(!wants_whole_container(Some("nfo")));
    }

    #[test]
    fn test_invalid_container_is_rejected() {
        assert!(matches!(
            SrrExtractor::new(b"<html>".to_vec(), MarkerCheck::Strict),
            Err(SrrdbError::InvalidContainer)
        ));
        assert!(matches!(
            SrrExtractor::new(vec![0x69], MarkerCheck::Strict),
            Err(SrrdbError::InvalidContainer)
        ));
    }

    #[test]
    fn test_extract_matching() {
        let extractor =
            SrrExtractor::new(srr_with(&["a/Release.NFO", "b.sfv", "c.nfo"]), MarkerCheck::Strict)
                .unwrap();

        let files = extractor.extract_matching("nfo").unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a/Release.NFO", "c.nfo"]);
        assert_eq!(files[0].data, b"a/Release.NFO");

        assert!(matches!(
            extractor.extract_matching("srs"),
            Err(SrrdbError::MemberNotFound(ext)) if ext == "srs"
        ));
    }

    #[test]
    fn test_raw_suffix_selection() {
        let extractor =
            SrrExtractor::new(srr_with(&["x.mp3", "y.txt"]), MarkerCheck::Strict).unwrap();
        let selected = extractor.extract_matching("P3").unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "x.mp3");
    }

    #[test]
    fn test_output_path() {
        let root = Path::new("out");
        assert_eq!(
            output_path(root, "Sample/x.srs", false).unwrap(),
            root.join("Sample").join("x.srs")
        );
        assert_eq!(
            output_path(root, "Sample\\x.srs", false).unwrap(),
            root.join("Sample").join("x.srs")
        );
        assert_eq!(output_path(root, "Sample/x.srs", true).unwrap(), root.join("x.srs"));
        assert_eq!(
            output_path(root, "../../etc/passwd", false).unwrap(),
            root.join("etc").join("passwd")
        );
        assert_eq!(
            output_path(root, "C:\\x\\y.nfo", false).unwrap(),
            root.join("x").join("y.nfo")
        );
        assert!(output_path(root, "../", false).is_none());
        assert!(output_path(root, "", true).is_none());
    }

    #[tokio::test]
    async fn test_save_member_round_trip() {
        let dir = TempDir::new().unwrap();
        let extractor =
            SrrExtractor::new(srr_with(&["Sub/dir/file.nfo"]), MarkerCheck::Strict).unwrap();
        let file = &extractor.list_files().unwrap()[0];

        let path = save_member(dir.path(), &file.name, &file.data, false)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("Sub").join("dir").join("file.nfo"));
        assert_eq!(std::fs::read(&path).unwrap(), file.data);

        let pruned = save_member(dir.path(), &file.name, &file.data, true)
            .await
            .unwrap();
        assert_eq!(pruned, dir.path().join("file.nfo"));
        assert_eq!(std::fs::read(&pruned).unwrap(), file.data);
    }
}
