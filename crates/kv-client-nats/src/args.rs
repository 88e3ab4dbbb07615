//! CLI argument definitions for the NATS backend.

use clap::Args;

/// Default three-node NATS cluster.
pub const DEFAULT_NATS_URL: &str = "nats://nats-cluster-test-0.nats-cluster-test-headless.data.svc.cluster.local:4222,nats://nats-cluster-test-1.nats-cluster-test-headless.data.svc.cluster.local:4222,nats://nats-cluster-test-2.nats-cluster-test-headless.data.svc.cluster.local:4222";

/// Default KV bucket name.
pub const DEFAULT_NATS_BUCKET: &str = "perfomance_test_3";

/// NATS-specific connection arguments.
#[derive(Args, Clone, Debug)]
pub struct NatsArgs {
    /// NATS server URLs, comma-separated
    #[arg(long, env = "NATS_URL", default_value = DEFAULT_NATS_URL)]
    pub nats_url: String,

    /// JetStream key-value bucket (created with memory storage if missing)
    #[arg(long, env = "NATS_BUCKET", default_value = DEFAULT_NATS_BUCKET)]
    pub nats_bucket: String,
}
