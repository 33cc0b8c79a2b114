pub mod core;
pub mod manager;
pub mod rag;
pub mod server;
pub mod state;
pub mod store;
