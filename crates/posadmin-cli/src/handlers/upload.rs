use anyhow::{Context as _, Result, bail};
use posadmin_client::{Error as ApiError, UploadSummary};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::presentation::UploadViewModel;

pub(crate) fn read_tsv(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

/// `<stem>-errors.tsv` next to the uploaded file
fn default_error_path(file: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    file.with_file_name(format!("{}-errors.tsv", stem))
}

/// Turn an upload outcome into a view model, saving the server's error
/// report to disk when the file is rejected
pub(crate) fn finish(
    file: &Path,
    errors: Option<PathBuf>,
    result: posadmin_runtime::Result<UploadSummary>,
) -> Result<UploadViewModel> {
    match result {
        Ok(summary) => Ok(UploadViewModel {
            file: file.to_path_buf(),
            imported: summary.length,
        }),
        Err(posadmin_runtime::Error::Api(ApiError::TsvRejected(report))) => {
            let path = errors.unwrap_or_else(|| default_error_path(file));
            report.write_to(&path)?;
            warn!(rows = report.rows().len(), path = %path.display(), "upload rejected");
            bail!(
                "Upload rejected: {} invalid row(s); error report written to {}",
                report.rows().len(),
                path.display()
            )
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_error_path() {
        assert_eq!(
            default_error_path(Path::new("/tmp/in/products.tsv")),
            PathBuf::from("/tmp/in/products-errors.tsv")
        );
        assert_eq!(
            default_error_path(Path::new("stock")),
            PathBuf::from("stock-errors.tsv")
        );
    }
}
