//! Filesystem locations inside the Zellij plugin sandbox.
//!
//! Zellij mounts the host filesystem under `/host`, rooted at the directory
//! Zellij was started from (usually the user's home).

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
const HOST_ROOT: &str = "/host";

/// Returns the directory holding notekeeper's trace files.
///
/// Resolves to `/host/.local/share/zellij/notekeeper`, which is
/// `~/.local/share/zellij/notekeeper` on the host when Zellij runs from the
/// home directory.
///
/// # Examples
///
/// ```
/// use notekeeper::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/notekeeper")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local")
        .join("share")
        .join("zellij")
        .join("notekeeper")
}
