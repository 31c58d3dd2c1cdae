//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Directory holding the plugin's trace files.
///
/// Resolves to `/host/.local/share/zellij/patient-registry`. `/host` points at
/// the directory Zellij was started from, usually the user's home.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("patient-registry")
}

/// Maps `~` to the sandbox's `/host` mount.
///
/// Used for configured file paths such as `theme_file`. Only a leading `~`
/// (alone or followed by `/`) is expanded.
///
/// # Parameters
///
/// * `path` - Path as written in the plugin configuration
///
/// # Returns
///
/// The path as seen from inside the sandbox.
///
/// ```
/// use patient_registry::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/clinic.toml"), "/host/themes/clinic.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/clinic.toml"), "/etc/clinic.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir() {
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/host/.local/share/zellij/patient-registry")
        );
    }

    #[test]
    fn test_tilde_inside_path_is_kept() {
        assert_eq!(expand_tilde("/srv/~backup"), "/srv/~backup");
    }
}
