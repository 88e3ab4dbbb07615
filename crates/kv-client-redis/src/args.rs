//! CLI argument definitions for the Redis-protocol backends.

use clap::Args;

/// Default Redis Cluster seed node.
pub const DEFAULT_REDIS_CLUSTER_URL: &str =
    "redis://:@redis-cluster-test-headless.data.svc.cluster.local:6379";

/// Default Dragonfly endpoint.
pub const DEFAULT_DRAGONFLY_URL: &str = "redis://:@dragonfly-test.data.svc.cluster.local:6379";

/// Redis-specific connection arguments.
#[derive(Args, Clone, Debug)]
pub struct RedisArgs {
    /// Redis Cluster seed node URL (e.g., redis://:password@host:6379)
    #[arg(long, env = "REDIS_CLUSTER_URL", default_value = DEFAULT_REDIS_CLUSTER_URL)]
    pub redis_cluster_url: String,

    /// Dragonfly (standalone Redis protocol) URL
    #[arg(long, env = "DRAGONFLY_URL", default_value = DEFAULT_DRAGONFLY_URL)]
    pub dragonfly_url: String,
}
