//! hoard CLI
//!
//! Starts the caching reverse proxy, or flushes its cache and exits.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hoard_cache::{MemoryStore, RedisStore};
use hoard_core::constants::{
    DEFAULT_BIND, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_ORIGIN, DEFAULT_PORT, DEFAULT_REDIS_URL,
};
use hoard_core::traits::CacheStore;
use hoard_proxy::{flush_cache, HttpOrigin, ProxyConfig, ProxyServer};

/// hoard - transparent caching reverse proxy
#[derive(Parser, Debug)]
#[command(name = "hoard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "HOARD_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Bind address
    #[arg(short, long, env = "HOARD_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Origin URL to forward cache misses to
    #[arg(short, long, env = "HOARD_ORIGIN", default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Redis server holding the cache
    #[arg(long, env = "REDIS_URL", default_value = DEFAULT_REDIS_URL)]
    redis_url: String,

    /// Cache backend
    #[arg(long, env = "HOARD_STORE", value_enum, default_value_t = StoreKind::Redis)]
    store: StoreKind,

    /// Clear the cache and exit
    #[arg(long)]
    clear_cache: bool,

    /// Upstream request deadline in seconds (none by default)
    #[arg(long, env = "HOARD_UPSTREAM_TIMEOUT")]
    upstream_timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// Shared Redis server
    Redis,
    /// In-process map, lost on restart
    Memory,
}

impl Cli {
    fn proxy_config(&self) -> ProxyConfig {
        ProxyConfig {
            port: self.port,
            origin: self.origin.clone(),
            flush_on_start: self.clear_cache,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            upstream_timeout_seconds: self.upstream_timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "hoard=debug,tower_http=debug,info"
    } else {
        "hoard=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.proxy_config();

    if config.flush_on_start {
        let result = cmd_clear_cache(&cli).await;
        if let Err(e) = &result {
            eprintln!("{} {:#}", "Error clearing cache:".red().bold(), e);
        }
        std::process::exit(flush_exit_code(&result));
    }

    cmd_serve(&cli, config).await
}

async fn open_store(cli: &Cli) -> Result<Arc<dyn CacheStore>> {
    match cli.store {
        StoreKind::Redis => {
            let store = RedisStore::connect(&cli.redis_url)
                .await
                .with_context(|| format!("Failed to connect to Redis at {}", cli.redis_url))?;
            Ok(Arc::new(store))
        }
        StoreKind::Memory => {
            warn!("Using in-memory store; entries are not shared and are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Flush every cached entry
async fn cmd_clear_cache(cli: &Cli) -> Result<()> {
    let store = open_store(cli).await?;
    clear_store(store.as_ref()).await
}

async fn clear_store(store: &dyn CacheStore) -> Result<()> {
    let summary = flush_cache(store).await.context("Flush failed")?;

    println!("{} {}", "Cache cleared successfully:".green().bold(), summary);
    Ok(())
}

/// Process exit code for the `--clear-cache` branch.
fn flush_exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Run the proxy
async fn cmd_serve(cli: &Cli, config: ProxyConfig) -> Result<()> {
    validate_origin(&config.origin)?;

    let store = open_store(cli).await?;
    let origin = Arc::new(HttpOrigin::new(&config).context("Failed to build upstream client")?);

    let addr = bind_addr(&cli.bind, config.port)?;

    println!("{} {}", "Listening on port".cyan().bold(), config.port);
    println!("{} {}", "Origin set to:".cyan().bold(), config.origin);

    let server = ProxyServer::new(config, store, origin);
    server.run(addr).await.context("Server error")?;

    Ok(())
}

fn bind_addr(bind: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", bind))?;
    Ok(SocketAddr::new(ip, port))
}

/// Checks that the origin is an absolute http(s) URL.
///
/// The string itself is still used as-is when building upstream URLs.
fn validate_origin(origin: &str) -> Result<()> {
    let parsed = url::Url::parse(origin)
        .with_context(|| format!("Invalid origin URL '{}'", origin))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => bail!("Unsupported origin scheme '{}' (expected http or https)", other),
    }
}
