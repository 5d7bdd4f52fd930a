//! I/O for the henge crates: talking to HTTP services, and small key-value stores that behave the
//! same way on native (files in a directory) and on web (the browser's local storage).

#[macro_use]
extern crate log;

#[cfg(not(target_arch = "wasm32"))]
mod kv_native;
#[cfg(not(target_arch = "wasm32"))]
pub use kv_native::FileStore;
#[cfg(target_arch = "wasm32")]
mod kv_web;
#[cfg(target_arch = "wasm32")]
pub use kv_web::LocalStorage;

pub use download::{post_form, post_json};
pub use kv::{KeyValueStore, MemoryStore};

mod download;
mod kv;
