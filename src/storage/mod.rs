pub mod json_bookmark_store;
pub mod memory_bookmark_store;
