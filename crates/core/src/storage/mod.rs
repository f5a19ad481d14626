pub mod encryption;
pub mod format;
pub mod manager;
pub mod memory;
pub mod repository;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
