//! Orchestration between the tenant store and the RAG service. Store writes
//! and upstream calls are independent, non-atomic steps; the failure modes
//! of the gap between them (orphan files, unflagged rows) are accepted and
//! logged rather than reconciled.

pub mod chat;
pub mod documents;

pub use chat::ChatManager;
pub use documents::{DocumentManager, UploadOutcome};
