//! Backend-neutral key-value client contract for kv-bench.
//!
//! Every backend under test is wrapped in a thin adapter implementing
//! [`KvClient`]. The workload driver only ever talks to this trait, so the
//! Redis, NATS and in-memory backends are interchangeable:
//!
//! ```text
//!  ClientFactory ──create_client()──▶ Arc<dyn KvClient>
//!                                         │
//!        set / get / flush_all / delete_by_prefix
//!                                         │
//!              ┌──────────────┬───────────┴─────────┐
//!              ▼              ▼                     ▼
//!        kv-client-redis  kv-client-nats     memory (this crate)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use kv_client::{ClientFactory, MemoryFactory, MemoryKvStore};
//!
//! let store = MemoryKvStore::new();
//! let factory = MemoryFactory::new(store.clone());
//! let client = factory.create_client().await?;
//! client.set("abc-key-0", "value").await?;
//! assert_eq!(client.get("abc-key-0").await?, "value");
//! assert_eq!(client.delete_by_prefix("abc").await?, 1);
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod memory;

pub use client::KvClient;
pub use error::KvClientError;
pub use factory::{ClientFactory, SharedClientFactory};
pub use memory::{MemoryFactory, MemoryKvClient, MemoryKvStore};
