use std::fs::Permissions;
use std::path::Path;

use crate::VersionedError;
use crate::VersionedResult;

/// Read a regular file to a string, rejecting directories and other
/// non-file paths. Returns the content together with the file's permissions.
pub(crate) fn read_regular_file(path: &Path) -> VersionedResult<(String, Permissions)> {
	let metadata = std::fs::metadata(path).map_err(|e| VersionedError::read(path, e))?;
	if !metadata.is_file() {
		return Err(VersionedError::NotAFile(path.display().to_string()));
	}

	let content = std::fs::read_to_string(path).map_err(|e| VersionedError::read(path, e))?;
	Ok((content, metadata.permissions()))
}

/// Overwrite `path` with `content` and re-apply `permissions`.
pub(crate) fn write_with_permissions(
	path: &Path,
	content: &str,
	permissions: Permissions,
) -> VersionedResult<()> {
	std::fs::write(path, content).map_err(|e| VersionedError::write(path, e))?;
	std::fs::set_permissions(path, permissions).map_err(|e| VersionedError::write(path, e))
}
