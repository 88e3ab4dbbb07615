//! NATS JetStream key-value adapter for kv-bench.
//!
//! The benchmark stores its keys in one named KV bucket. The bucket is looked
//! up on connect and created with in-memory storage when it does not exist
//! yet; an existing bucket is reused as-is, whatever its configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! use kv_client::KvClient;
//! use kv_client_nats::NatsKvClient;
//!
//! let client = NatsKvClient::connect("nats://n1:4222,nats://n2:4222", "perf").await?;
//! client.set("abc-key-0", "value").await?;
//! assert_eq!(client.get("abc-key-0").await?, "value");
//! ```

pub mod args;
pub mod client;
pub mod error;
pub mod factory;

pub use args::NatsArgs;
pub use client::{parse_server_list, NatsKvClient};
pub use error::NatsKvError;
pub use factory::NatsFactory;
