//! Redis coordination store
//!
//! Shared store implementation for multi-instance deployments.
//!
//! ## Features
//!
//! - Lock procedures as Lua scripts (`EVALSHA`, falling back to `EVAL`)
//! - Native key expiry for leases
//! - Optimistic transactions via `WATCH`/`MULTI`/`EXEC` on a dedicated connection
//! - Reconnecting connection manager for scripts and counters
//!
//! ## Example
//!
//! ```ignore
//! use stockguard_providers::store::RedisCoordinationStore;
//!
//! let store = RedisCoordinationStore::new("redis://localhost:6379")?;
//! // Or with host/port
//! let store = RedisCoordinationStore::with_host_port("localhost", 6379)?;
//! ```

use crate::constants::REDIS_BACKEND_NAME;
use crate::store::scripts;
use async_trait::async_trait;
use redis::aio::{ConnectionManager, MultiplexedConnection};
use redis::{AsyncCommands, Client, RedisError, Script};
use std::sync::Arc;
use stockguard_domain::error::{Error, Result};
use stockguard_domain::ports::{
    AtomicScript, CommitOutcome, CoordinationStore, CounterStore, OptimisticStore,
    ScriptExecutor, ScriptReply, WatchSession,
};
use tokio::sync::OnceCell;
use tracing::debug;

/// Compiled handles of the three lock procedures
struct ScriptCatalog {
    acquire: Script,
    release: Script,
    renew: Script,
}

impl ScriptCatalog {
    fn new() -> Self {
        Self {
            acquire: Script::new(scripts::ACQUIRE_REENTRANT),
            release: Script::new(scripts::RELEASE_REENTRANT),
            renew: Script::new(scripts::RENEW_LEASE),
        }
    }

    fn get(&self, script: AtomicScript) -> &Script {
        match script {
            AtomicScript::AcquireReentrant => &self.acquire,
            AtomicScript::ReleaseReentrant => &self.release,
            AtomicScript::RenewLease => &self.renew,
        }
    }
}

/// Redis coordination store
///
/// Scripts and counter commands share one reconnecting connection manager,
/// established on first use. Every watch session opens its own connection
/// because `WATCH` state belongs to a connection.
#[derive(Clone)]
pub struct RedisCoordinationStore {
    client: Client,
    endpoint: String,
    manager: Arc<OnceCell<ConnectionManager>>,
    scripts: Arc<ScriptCatalog>,
}

impl RedisCoordinationStore {
    /// Create a new Redis store with connection string
    ///
    /// No connection is made until the first command.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL: {}", e), e)
        })?;

        Ok(Self {
            client,
            endpoint: redact_credentials(connection_string),
            manager: Arc::new(OnceCell::new()),
            scripts: Arc::new(ScriptCatalog::new()),
        })
    }

    /// Create a new Redis store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{}:{}", host, port))
    }

    /// Endpoint this store talks to, without credentials
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Round-trip a `PING`
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("PING", e))?;
        Ok(())
    }

    /// Shared connection, established lazily
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                debug!(endpoint = %self.endpoint, "Connecting to Redis");
                self.client
                    .get_connection_manager()
                    .await
                    .map_err(|e| map_redis_error("connect", e))
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl ScriptExecutor for RedisCoordinationStore {
    async fn execute(
        &self,
        script: AtomicScript,
        keys: &[String],
        args: &[String],
    ) -> Result<ScriptReply> {
        script.check_arity(keys, args)?;
        let mut conn = self.connection().await?;

        let mut invocation = self.scripts.get(script).prepare_invoke();
        for key in keys {
            invocation.key(key.as_str());
        }
        for arg in args {
            invocation.arg(arg.as_str());
        }

        let raw: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(|e| map_redis_error(script.name(), e))?;

        Ok(ScriptReply::from_raw(script.reply_kind(), raw))
    }
}

#[async_trait]
impl CounterStore for RedisCoordinationStore {
    async fn read_counter(&self, key: &str) -> Result<Option<i64>> {
        let mut conn = self.connection().await?;
        let raw = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| map_redis_error("GET", e))?;
        parse_counter(key, raw)
    }

    async fn write_counter(&self, key: &str, value: i64) -> Result<()> {
        let mut conn = self.connection().await?;
        let result: redis::RedisResult<()> = conn.set(key, value).await;
        result.map_err(|e| map_redis_error("SET", e))
    }
}

#[async_trait]
impl OptimisticStore for RedisCoordinationStore {
    async fn open_session(&self) -> Result<Box<dyn WatchSession>> {
        let connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("connect", e))?;
        Ok(Box::new(RedisWatchSession { connection }))
    }
}

impl CoordinationStore for RedisCoordinationStore {
    fn backend_name(&self) -> &str {
        REDIS_BACKEND_NAME
    }
}

impl std::fmt::Debug for RedisCoordinationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCoordinationStore")
            .field("endpoint", &self.endpoint)
            .field("connected", &self.manager.initialized())
            .finish()
    }
}

/// Transaction context on a connection nobody else uses
pub struct RedisWatchSession {
    connection: MultiplexedConnection,
}

#[async_trait]
impl WatchSession for RedisWatchSession {
    async fn watch(&mut self, key: &str) -> Result<()> {
        let _: () = redis::cmd("WATCH")
            .arg(key)
            .query_async(&mut self.connection)
            .await
            .map_err(|e| map_redis_error("WATCH", e))?;
        Ok(())
    }

    async fn read_counter(&mut self, key: &str) -> Result<Option<i64>> {
        let raw = self
            .connection
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| map_redis_error("GET", e))?;
        parse_counter(key, raw)
    }

    async fn unwatch(&mut self) -> Result<()> {
        let _: () = redis::cmd("UNWATCH")
            .query_async(&mut self.connection)
            .await
            .map_err(|e| map_redis_error("UNWATCH", e))?;
        Ok(())
    }

    async fn commit_counter(&mut self, key: &str, value: i64) -> Result<CommitOutcome> {
        let mut pipe = redis::pipe();
        pipe.atomic().set(key, value);

        // EXEC answers nil when a watched key changed
        let result: Option<Vec<redis::Value>> = pipe
            .query_async(&mut self.connection)
            .await
            .map_err(|e| map_redis_error("EXEC", e))?;

        Ok(match result {
            Some(_) => CommitOutcome::Committed,
            None => CommitOutcome::Conflict,
        })
    }
}

/// Split transport failures from errors the server answered with
fn map_redis_error(operation: &str, err: RedisError) -> Error {
    let message = format!("Redis {} failed: {}", operation, err);
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        Error::store_unavailable_with_source(message, err)
    } else {
        Error::store_with_source(message, err)
    }
}

fn parse_counter(key: &str, raw: Option<String>) -> Result<Option<i64>> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::invalid_counter(key, value.as_str())),
    }
}

fn redact_credentials(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}{}", &url[..scheme_end + 3], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
