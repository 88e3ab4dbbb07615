//! Command-line and environment configuration.

use crate::backend::BackendKind;
use clap::Args;
use kv_client_nats::NatsArgs;
use kv_client_redis::RedisArgs;
use kv_loadtest::{WorkloadConfig, DEFAULT_COOLDOWN};
use std::path::PathBuf;
use std::time::Duration;

/// Connection options for every backend.
#[derive(Args, Clone, Debug)]
pub struct ConnectionOpts {
    #[command(flatten)]
    pub redis: RedisArgs,

    #[command(flatten)]
    pub nats: NatsArgs,
}

/// Options of a benchmark run.
#[derive(Args, Clone, Debug)]
pub struct BenchOpts {
    /// Operations per client in each of the write and read phases
    #[arg(long, env = "OPERATIONS_COUNT")]
    pub operations_count: u64,

    /// Nominal operations per second, reported alongside each sample
    #[arg(long, env = "RATE_LIMIT")]
    pub rate_limit: u64,

    /// Concurrent clients per backend
    #[arg(long, env = "CLIENT_COUNT")]
    pub client_count: usize,

    /// Length of every written value, in characters
    #[arg(long, env = "VALUE_LENGTH")]
    pub value_length: usize,

    /// Minimum delay between two operations of one client (0 = unthrottled)
    #[arg(long, env = "PACE_INTERVAL_MS", default_value = "0")]
    pub pace_interval_ms: u64,

    /// Pause between the read phase and cleanup
    #[arg(long, env = "COOLDOWN_SECS", default_value_t = DEFAULT_COOLDOWN.as_secs())]
    pub cooldown_secs: u64,

    /// Backends to benchmark, in order
    #[arg(
        long,
        env = "BACKENDS",
        value_enum,
        value_delimiter = ',',
        default_values_t = BackendKind::DEFAULT_ORDER
    )]
    pub backends: Vec<BackendKind>,

    /// Open one client per backend and share it between all workers
    #[arg(long, env = "SHARE_CONNECTION")]
    pub share_connection: bool,

    /// Write the run summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Exit once every backend is done instead of idling
    #[arg(long, env = "EXIT_WHEN_DONE")]
    pub exit_when_done: bool,

    #[command(flatten)]
    pub connection: ConnectionOpts,
}

impl BenchOpts {
    /// Workload parameters shared by every backend of the run.
    pub fn workload_config(&self) -> WorkloadConfig {
        WorkloadConfig::new(self.operations_count, self.value_length, self.client_count)
            .with_rate_limit(self.rate_limit)
            .with_pace_interval(Duration::from_millis(self.pace_interval_ms))
            .with_cooldown(Duration::from_secs(self.cooldown_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        opts: BenchOpts,
    }

    fn parse(args: &[&str]) -> Result<BenchOpts, clap::Error> {
        let argv = std::iter::once("kv-bench").chain(args.iter().copied());
        TestCli::try_parse_from(argv).map(|cli| cli.opts)
    }

    const REQUIRED: [&str; 8] = [
        "--operations-count",
        "100",
        "--rate-limit",
        "10",
        "--client-count",
        "4",
        "--value-length",
        "16",
    ];

    #[test]
    fn test_defaults() {
        let opts = parse(&REQUIRED).unwrap();

        assert_eq!(opts.pace_interval_ms, 0);
        assert_eq!(opts.cooldown_secs, 15);
        assert_eq!(
            opts.backends,
            vec![
                BackendKind::RedisCluster,
                BackendKind::Nats,
                BackendKind::Dragonfly
            ]
        );
        assert!(!opts.share_connection);
        assert!(opts.json.is_none());
        assert_eq!(opts.connection.nats.nats_bucket, "perfomance_test_3");
    }

    #[test]
    fn test_workload_config() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--pace-interval-ms", "5", "--cooldown-secs", "0"]);
        let config = parse(&args).unwrap().workload_config();

        assert_eq!(config.operations_count, 100);
        assert_eq!(config.value_length, 16);
        assert_eq!(config.clients, 4);
        assert_eq!(config.rate_limit_interval(), Some(Duration::from_millis(100)));
        assert_eq!(config.pace_interval, Some(Duration::from_millis(5)));
        assert_eq!(config.cooldown, Duration::ZERO);
    }

    #[test]
    fn test_backend_list() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--backends", "memory,dragonfly"]);
        let opts = parse(&args).unwrap();

        assert_eq!(
            opts.backends,
            vec![BackendKind::Memory, BackendKind::Dragonfly]
        );
    }

    #[test]
    fn test_missing_required_value() {
        assert!(parse(&["--operations-count", "100"]).is_err());
    }

    #[test]
    fn test_non_integer_value() {
        let mut args = REQUIRED.to_vec();
        args[1] = "lots";
        assert!(parse(&args).is_err());
    }

    #[test]
    fn test_unknown_backend() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--backends", "etcd"]);
        assert!(parse(&args).is_err());
    }
}
