use std::sync::Arc;

use crate::core::config::{AppConfig, AppPaths};
use crate::manager::{ChatManager, DocumentManager};
use crate::rag::RagClient;
use crate::store::TenantStore;

pub mod error;

use error::InitializationError;

/// Shared application state: configuration, the tenant store, the RAG
/// client, and the two managers built on top of them.
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: AppConfig,
    pub store: TenantStore,
    pub rag: RagClient,
    pub documents: DocumentManager,
    pub chat: ChatManager,
}

impl AppState {
    pub async fn initialize() -> Result<Arc<Self>, InitializationError> {
        let paths = Arc::new(AppPaths::new());
        let config =
            AppConfig::load(&paths).map_err(|e| InitializationError::Config(e.into()))?;

        let store = TenantStore::new(paths.db_path.clone())
            .await
            .map_err(|e| InitializationError::Store(e.into()))?;

        Ok(Self::assemble(paths, config, store))
    }

    /// Builds the state from pre-made parts. Tests use this to point the
    /// RAG client at a stub server and the store at a temp database.
    pub fn assemble(paths: Arc<AppPaths>, config: AppConfig, store: TenantStore) -> Arc<Self> {
        let rag = RagClient::new(config.rag.base_url.clone());
        let documents = DocumentManager::new(store.clone(), rag.clone());
        let chat = ChatManager::new(store.clone(), rag.clone());

        Arc::new(AppState {
            paths,
            config,
            store,
            rag,
            documents,
            chat,
        })
    }
}
