use std::{
    fs,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use futures::{future, FutureExt};
use log::debug;
use serde_json::Value;

use tandem_shared::ResourceError;

use crate::resources::loader::{LoaderFuture, ResourceLoader};

/// Reads JSON resources from `<root>/<name>`
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<Value, ResourceError> {
        let relative = Path::new(name);
        // names stay inside the root
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return Err(ResourceError::Load {
                name: name.to_string(),
                reason: "resource names must be relative paths without '..'".to_string(),
            });
        }

        let path = self.root.join(relative);
        debug!("Loading resource '{}' from {}", name, path.display());
        let text = fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ResourceError::NotFound {
                name: name.to_string(),
            },
            _ => ResourceError::Load {
                name: name.to_string(),
                reason: err.to_string(),
            },
        })?;
        serde_json::from_str(&text).map_err(|err| ResourceError::Parse {
            name: name.to_string(),
            reason: err.to_string(),
        })
    }
}

impl ResourceLoader for DirectoryLoader {
    fn load(&self, name: &str) -> LoaderFuture {
        future::ready(self.read(name)).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serde_json::json;

    use super::*;

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("tandem-render-{}-{}", test, std::process::id()));
        fs::create_dir_all(dir.join("actors")).unwrap();
        dir
    }

    #[test]
    fn reads_nested_json() {
        let dir = scratch_dir("nested");
        fs::write(dir.join("actors/ball.json"), r#"{ "type": "ball" }"#).unwrap();

        let loader = DirectoryLoader::new(&dir);
        assert_eq!(loader.read("actors/ball.json"), Ok(json!({ "type": "ball" })));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_and_malformed_files() {
        let dir = scratch_dir("errors");
        fs::write(dir.join("broken.json"), "{ nope").unwrap();

        let loader = DirectoryLoader::new(&dir);
        assert!(matches!(
            loader.read("absent.json"),
            Err(ResourceError::NotFound { .. })
        ));
        assert!(matches!(
            loader.read("broken.json"),
            Err(ResourceError::Parse { .. })
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn escaping_the_root_is_refused() {
        let loader = DirectoryLoader::new("/tmp");
        assert!(matches!(
            loader.read("../etc/passwd"),
            Err(ResourceError::Load { .. })
        ));
        assert!(matches!(
            loader.read("/etc/passwd"),
            Err(ResourceError::Load { .. })
        ));
    }
}
