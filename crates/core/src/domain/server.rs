// Target Server Domain Model

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The server a probe is bound to
///
/// `name` doubles as the default URI authority (`http://<name>`).
/// `root` is where relative file paths given to the probe are resolved,
/// e.g. the deployment directory of the service on that server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetServer {
    name: String,
    #[serde(default)]
    root: Option<PathBuf>,
}

impl TargetServer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Map a path as seen from the deployment onto this server
    ///
    /// Absolute paths are returned unchanged. Relative paths are joined onto
    /// the server root when one is configured.
    pub fn map_path(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_path_without_root() {
        let server = TargetServer::new("web01");
        assert_eq!(
            server.map_path(Path::new("conf/app.config")),
            PathBuf::from("conf/app.config")
        );
    }

    #[test]
    fn test_map_path_joins_relative_onto_root() {
        let server = TargetServer::new("web01").with_root("/srv/app");
        assert_eq!(
            server.map_path(Path::new("conf/app.config")),
            PathBuf::from("/srv/app/conf/app.config")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_map_path_keeps_absolute() {
        let server = TargetServer::new("web01").with_root("/srv/app");
        assert_eq!(
            server.map_path(Path::new("/etc/app.config")),
            PathBuf::from("/etc/app.config")
        );
    }
}
