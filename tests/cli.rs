//! The flush and cleanup subcommands against the in-memory backend.

use clap::Parser;
use kv_bench::cli::{cleanup_backend, flush_backend, Cli, Commands};
use kv_bench::BackendKind;
use kv_client::{KvClient, MemoryKvStore};
use tokio_test::assert_ok;

async fn populate(store: &MemoryKvStore) -> anyhow::Result<()> {
    let client = store.client();
    for i in 0..3 {
        client.set(&format!("AAAAAAAAAA-key-{i}"), "x").await?;
        client.set(&format!("BBBBBBBBBB-key-{i}"), "y").await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_flush_subcommand() -> anyhow::Result<()> {
    let store = MemoryKvStore::new();
    populate(&store).await?;

    let cli = Cli::try_parse_from(["kv-bench", "flush", "memory"])?;
    let Some(Commands::Flush {
        backend,
        connection,
    }) = cli.command
    else {
        panic!("expected the flush subcommand");
    };
    assert_eq!(backend, BackendKind::Memory);

    assert_ok!(flush_backend(backend, &connection, &store).await);
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cleanup_subcommand() -> anyhow::Result<()> {
    let store = MemoryKvStore::new();
    populate(&store).await?;

    let cli = Cli::try_parse_from(["kv-bench", "cleanup", "memory", "--prefix", "AAAAAAAAAA"])?;
    let Some(Commands::Cleanup {
        backend,
        prefix,
        connection,
    }) = cli.command
    else {
        panic!("expected the cleanup subcommand");
    };

    let deleted = assert_ok!(cleanup_backend(backend, &prefix, &connection, &store).await);
    assert_eq!(deleted, 3);
    assert!(store.keys_with_prefix("AAAAAAAAAA").is_empty());
    assert_eq!(store.keys_with_prefix("BBBBBBBBBB").len(), 3);

    let again = assert_ok!(cleanup_backend(backend, &prefix, &connection, &store).await);
    assert_eq!(again, 0);
    Ok(())
}

#[test]
fn test_cleanup_requires_prefix() {
    assert!(Cli::try_parse_from(["kv-bench", "cleanup", "memory"]).is_err());
}

#[test]
fn test_no_subcommand_parses() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(["kv-bench"])?;
    assert!(cli.command.is_none());
    Ok(())
}
