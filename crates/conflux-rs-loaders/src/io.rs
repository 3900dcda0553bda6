//! IO helpers for reading config sources from disk.

use conflux_rs_core::LoadError;
use log::debug;
use std::path::Path;

/// Read a source file, mapping a missing file to `LoadError::NotFound`.
pub(crate) fn read_blocking(path: &Path) -> Result<String, LoadError> {
    debug!("reading config source (path={})", path.display());
    std::fs::read_to_string(path).map_err(|err| io_error(path, err))
}

/// Async counterpart of [`read_blocking`].
pub(crate) async fn read_async(path: &Path) -> Result<String, LoadError> {
    debug!("reading config source (path={})", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| io_error(path, err))
}

/// Build a parse error naming the offending file.
pub(crate) fn parse_error(path: &Path, message: impl ToString) -> LoadError {
    LoadError::Parse {
        origin: path.display().to_string(),
        message: message.to_string(),
    }
}

fn io_error(path: &Path, err: std::io::Error) -> LoadError {
    if err.kind() == std::io::ErrorKind::NotFound {
        LoadError::NotFound(path.display().to_string())
    } else {
        LoadError::Io(err)
    }
}
