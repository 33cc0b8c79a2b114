//! Client for the external RAG service. The service owns all retrieval and
//! generation; this module only forwards requests and relays responses.

pub mod client;

pub use client::{RagClient, RagPayload, UploadFile};
