// GuildView - platform/fs.rs
//
// Reading guild list files from disk.

use crate::util::constants::MAX_INPUT_FILE_BYTES;
use crate::util::error::LoadError;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// Read the whole of `path` as UTF-8 text.
///
/// Rejects files larger than `MAX_INPUT_FILE_BYTES` before reading them and
/// strips a leading byte-order mark.
pub fn read_input_file(path: &Path) -> Result<String, LoadError> {
    let io_err = |e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_INPUT_FILE_BYTES {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: MAX_INPUT_FILE_BYTES,
        });
    }

    let bytes = std::fs::read(path).map_err(io_err)?;
    let mut content = String::from_utf8(bytes).map_err(|e| LoadError::InvalidEncoding {
        path: path.to_path_buf(),
        source: e,
    })?;

    if content.starts_with(UTF8_BOM) {
        content.replace_range(..UTF8_BOM.len_utf8(), "");
    }

    tracing::debug!(path = %path.display(), bytes = size, "Input file read");
    Ok(content)
}
