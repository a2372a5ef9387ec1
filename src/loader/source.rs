//! Concrete [`AssetSource`] implementations.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::{AssetSource, LoadError, LoadObserver};
use crate::scene::Node;

/// Serves node trees from memory, keyed by path. Entries may also be
/// registered as decode failures.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    assets: FxHashMap<String, Result<Node, String>>,
}

impl MemorySource {
    /// Empty source; every fetch reports [`LoadError::NotFound`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `root` under `path`.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, root: Node) -> Self {
        self.insert(path, root);
        self
    }

    /// Register a decode failure under `path`.
    #[must_use]
    pub fn with_error(
        mut self,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let _ = self.assets.insert(path.into(), Err(message.into()));
        self
    }

    /// Register `root` under `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<String>, root: Node) {
        let _ = self.assets.insert(path.into(), Ok(root));
    }

    /// Remove the entry under `path`.
    pub fn remove(&mut self, path: &str) {
        let _ = self.assets.remove(path);
    }
}

impl AssetSource for MemorySource {
    async fn fetch(
        &self,
        path: &str,
        observer: &dyn LoadObserver,
    ) -> Result<Node, LoadError> {
        match self.assets.get(path) {
            Some(Ok(root)) => {
                observer.on_progress(path, 1, Some(1));
                Ok(root.clone())
            }
            Some(Err(message)) => Err(LoadError::Parse(message.clone())),
            None => Err(LoadError::NotFound(path.to_owned())),
        }
    }
}

/// Reads JSON scene descriptions (a serialized [`Node`] tree) from disk,
/// relative to a base directory.
///
/// Reads go through blocking `std::fs`, so [`fetch`](AssetSource::fetch)
/// finishes on its first poll and holds the polling thread for the whole
/// read. On an async runtime, drive it from a blocking-capable thread
/// (`spawn_blocking` or a dedicated executor) rather than a reactor
/// worker.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    base_dir: PathBuf,
}

impl JsonFileSource {
    /// Source rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory asset paths are resolved against.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl AssetSource for JsonFileSource {
    async fn fetch(
        &self,
        path: &str,
        observer: &dyn LoadObserver,
    ) -> Result<Node, LoadError> {
        let full = self.base_dir.join(path);
        let content = std::fs::read_to_string(&full).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                LoadError::NotFound(full.display().to_string())
            } else {
                LoadError::Io(e)
            }
        })?;
        let len = content.len() as u64;
        observer.on_progress(path, len, Some(len));
        serde_json::from_str(&content).map_err(|e| {
            LoadError::Parse(format!("{}: {e}", full.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::task::{Context, Poll, Waker};

    use super::*;
    use crate::loader::NoopObserver;
    use crate::scene::{Material, MeshGeometry, Transform};

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("meshview-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample() -> Node {
        Node::mesh(
            "tile",
            MeshGeometry::cuboid(2.0, 2.0, 2.0),
            Material::textured("tile.png"),
            Transform::IDENTITY,
        )
    }

    #[test]
    fn memory_source_serves_and_fails() {
        let source = MemorySource::new()
            .with("a.glb", sample())
            .with_error("b.glb", "bad header");

        let ok = pollster::block_on(source.fetch("a.glb", &NoopObserver));
        assert_eq!(ok.unwrap(), sample());

        let parse = pollster::block_on(source.fetch("b.glb", &NoopObserver));
        assert!(matches!(parse, Err(LoadError::Parse(_))));

        let missing = pollster::block_on(source.fetch("c.glb", &NoopObserver));
        assert!(matches!(missing, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn json_file_source_round_trip() {
        let dir = temp_dir("json-source");
        let json = serde_json::to_string(&sample()).unwrap();
        std::fs::write(dir.join("model.json"), json).unwrap();
        std::fs::write(dir.join("broken.json"), "{ not json").unwrap();

        let source = JsonFileSource::new(&dir);
        let fetch =
            |path: &str| pollster::block_on(source.fetch(path, &NoopObserver));
        assert_eq!(fetch("model.json").unwrap(), sample());

        let broken = fetch("broken.json");
        assert!(matches!(broken, Err(LoadError::Parse(_))));

        let missing = fetch("absent.json");
        assert!(matches!(missing, Err(LoadError::NotFound(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn json_fetch_finishes_on_first_poll() {
        let dir = temp_dir("json-poll");
        let json = serde_json::to_string(&sample()).unwrap();
        std::fs::write(dir.join("model.json"), json).unwrap();

        let source = JsonFileSource::new(&dir);
        let mut fetch =
            std::pin::pin!(source.fetch("model.json", &NoopObserver));
        let mut cx = Context::from_waker(Waker::noop());
        match fetch.as_mut().poll(&mut cx) {
            Poll::Ready(node) => assert_eq!(node.unwrap(), sample()),
            Poll::Pending => panic!("file fetch yielded"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
