//! Persisting the document as a README file.

use crate::error::ReportError;
use docana_kernel::DocumentBuffer;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Replace `path` with the document text: write a sibling temp file, fsync,
/// then rename over the target. Readers see the old or the new README, never
/// a partial one.
pub fn write_document(path: impl AsRef<Path>, doc: &DocumentBuffer) -> Result<(), ReportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent.display(), e))?;
    }

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), ReportError> {
        let file = File::create(&tmp_path).map_err(|e| ReportError::io(tmp_path.display(), e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(doc.to_text().as_bytes())
            .map_err(|e| ReportError::io(tmp_path.display(), e))?;
        let file = writer
            .into_inner()
            .map_err(|e| ReportError::io(tmp_path.display(), e.error()))?;
        file.sync_all()
            .map_err(|e| ReportError::io(tmp_path.display(), e))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ReportError::io(format!("{} -> {}", tmp_path.display(), path.display()), e)
    })?;

    tracing::debug!(path = %path.display(), lines = doc.cursor(), "README written");
    Ok(())
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "docana-writer-{prefix}-{}-{unique}/SIM.README",
            std::process::id()
        ))
    }

    #[test]
    fn rewrite_replaces_earlier_pass() {
        let path = temp_path("rewrite");
        let mut doc = DocumentBuffer::new();
        doc.append_line("DOCUMENTATION:").unwrap();
        write_document(&path, &doc).expect("first write should succeed");
        assert_eq!(fs::read_to_string(&path).unwrap(), "DOCUMENTATION:\n");

        doc.append_line("DOCUMENTATION_END:").unwrap();
        write_document(&path, &doc).expect("second write should succeed");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "DOCUMENTATION:\nDOCUMENTATION_END:\n"
        );

        let dir = path.parent().expect("temp file has a parent");
        let leftovers = fs::read_dir(dir).unwrap().count();
        assert_eq!(leftovers, 1);
        let _ = fs::remove_dir_all(dir);
    }
}
