//! Runtime configuration with sensible defaults (§6, SPEC_FULL.md §B.3).

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use serde::{Deserialize, Serialize};

// Layer 3: Internal
use crate::util::NodeId;

/// Default capacity for actor mailboxes created without an explicit override.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;

/// Default cap on the number of concurrently-live actors.
pub const DEFAULT_MAX_ACTORS: usize = 1024;

/// Default `poll(2)` timeout used when no timer is pending (§4.9 step 3).
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Runtime-wide configuration (§6 Environment, §4.9 `init`).
///
/// `node_id` and `node_name` are overridden by the `NODE_ID`/`NODE_NAME`
/// environment variables at [`crate::runtime::Runtime::init`] time (§6) when
/// left unset here; see [`crate::util::NodeIdentity`].
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::runtime::RuntimeConfig;
///
/// let config = RuntimeConfig::default();
/// assert_eq!(config.max_actors, microkernel_rt::runtime::config::DEFAULT_MAX_ACTORS);
///
/// let config = RuntimeConfig::builder()
///     .with_max_actors(16)
///     .with_default_mailbox_capacity(8)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_actors, 16);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Explicit node id; falls back to `NODE_ID` then a hashed default.
    pub node_id: Option<NodeId>,

    /// Explicit node name; falls back to `NODE_NAME` then the hostname.
    pub node_name: Option<String>,

    /// Maximum number of concurrently-live actors on this node.
    pub max_actors: usize,

    /// Mailbox capacity used by `spawn` when the caller passes zero.
    pub default_mailbox_capacity: usize,

    /// `poll(2)` timeout used when no timer is due (§4.9 step 3).
    pub poll_default_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            node_id: None,
            node_name: None,
            max_actors: DEFAULT_MAX_ACTORS,
            default_mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            poll_default_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

impl RuntimeConfig {
    /// Start building a configuration from defaults.
    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_actors == 0 {
            return Err("max_actors must be > 0".to_string());
        }
        if self.default_mailbox_capacity == 0 {
            return Err("default_mailbox_capacity must be > 0".to_string());
        }
        if let Some(id) = self.node_id {
            if !(1..=15).contains(&id.raw()) {
                return Err("node_id must be in range [1, 15]".to_string());
            }
        }
        Ok(())
    }
}

/// Fluent builder for [`RuntimeConfig`].
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfigBuilder {
    config: RuntimeConfig,
}

impl RuntimeConfigBuilder {
    /// Set an explicit node id (overridden by `NODE_ID` at init time).
    pub fn with_node_id(mut self, node_id: NodeId) -> Self {
        self.config.node_id = Some(node_id);
        self
    }

    /// Set an explicit node name (overridden by `NODE_NAME` at init time).
    pub fn with_node_name(mut self, name: impl Into<String>) -> Self {
        self.config.node_name = Some(name.into());
        self
    }

    /// Set the maximum number of concurrently-live actors.
    pub fn with_max_actors(mut self, max_actors: usize) -> Self {
        self.config.max_actors = max_actors;
        self
    }

    /// Set the default mailbox capacity.
    pub fn with_default_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.config.default_mailbox_capacity = capacity;
        self
    }

    /// Set the `poll(2)` timeout used when no timer is due.
    pub fn with_poll_default_timeout(mut self, timeout: Duration) -> Self {
        self.config.poll_default_timeout = timeout;
        self
    }

    /// Validate and produce the final [`RuntimeConfig`].
    pub fn build(self) -> Result<RuntimeConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
