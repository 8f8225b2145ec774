mod jsonstore_store;
mod memory_store;

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use jsonstore_store::JsonStoreClient;
use memory_store::MemoryDocumentStore;

pub use jsonstore_store::DEFAULT_JSONSTORE_BASE_URL;

/// Path addressing the whole root document.
pub const ROOT_PATH: &str = "/";

#[derive(Clone, Debug)]
enum StoreBackend {
    Memory(MemoryDocumentStore),
    JsonStore(JsonStoreClient),
}

/// Key-path addressable JSON document store holding the single root document.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    backend: StoreBackend,
}

impl DocumentStore {
    /// In-process store. State lives as long as any clone of the handle.
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory(MemoryDocumentStore::default()),
        }
    }

    /// Remote store speaking the jsonstore HTTP API.
    pub fn jsonstore(base_url: &str, token: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            backend: StoreBackend::JsonStore(JsonStoreClient::new(base_url, token, timeout)?),
        })
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            StoreBackend::Memory(_) => "memory",
            StoreBackend::JsonStore(_) => "jsonstore",
        }
    }

    /// Read the value at `path`. Missing and `null` values both read as `None`.
    pub async fn read(&self, path: &str) -> anyhow::Result<Option<Value>> {
        debug!(path, backend = self.backend_name(), "store read");
        match &self.backend {
            StoreBackend::Memory(store) => store.read(path).await,
            StoreBackend::JsonStore(store) => store.read(path).await,
        }
    }

    /// Replace the value at `path`, creating missing parents.
    pub async fn write(&self, path: &str, value: Value) -> anyhow::Result<()> {
        debug!(path, backend = self.backend_name(), "store write");
        match &self.backend {
            StoreBackend::Memory(store) => store.write(path, value).await,
            StoreBackend::JsonStore(store) => store.write(path, value).await,
        }
    }

    /// Remove the value at `path`. Deleting a missing path is not an error.
    pub async fn delete(&self, path: &str) -> anyhow::Result<()> {
        debug!(path, backend = self.backend_name(), "store delete");
        match &self.backend {
            StoreBackend::Memory(store) => store.delete(path).await,
            StoreBackend::JsonStore(store) => store.delete(path).await,
        }
    }

    pub async fn write_json<T>(&self, path: &str, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let payload = serde_json::to_value(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize store value for `{path}`: {e}"))?;

        self.write(path, payload).await
    }
}

/// Split a store path into its non-empty segments. `"/"` yields no segments.
pub(crate) fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
