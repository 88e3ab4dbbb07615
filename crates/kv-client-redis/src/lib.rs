//! Redis-protocol adapters for kv-bench.
//!
//! Two deployments speak the Redis protocol in the benchmark:
//!
//! - a Redis Cluster, reached through redis-rs' async cluster connection
//!   (slot-aware routing, `KEYS`/`FLUSHALL` fanned out to every master);
//! - a standalone server such as Dragonfly, reached through a multiplexed
//!   async connection.
//!
//! Both share [`RedisKvClient`]; only the connection type differs.
//!
//! # Example
//!
//! ```rust,ignore
//! use kv_client::KvClient;
//! use kv_client_redis::RedisKvClient;
//!
//! let client = RedisKvClient::connect("redis://127.0.0.1:6379", "dragonfly").await?;
//! client.set("abc-key-0", "value").await?;
//! let deleted = client.delete_by_prefix("abc").await?;
//! ```

pub mod args;
pub mod client;
pub mod error;
pub mod factory;

pub use args::RedisArgs;
pub use client::{RedisKvClient, Topology, DELETE_BATCH_SIZE};
pub use error::RedisKvError;
pub use factory::{RedisClusterFactory, RedisFactory};
