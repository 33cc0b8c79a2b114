pub mod accounts;
pub mod documents;
pub mod health;
pub mod proxy;
pub mod sessions;
pub mod utils;
