use std::time::Duration;

use crate::config::LatencyConfig;

/// Kinds of store operation, each with its own simulated delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Lookup,
    Create,
    Update,
    Delete,
    Query,
    Membership,
}

/// Stands in for the round trip to a remote API
#[derive(Debug, Clone)]
pub struct LatencySimulator {
    config: LatencyConfig,
}

impl LatencySimulator {
    pub fn new(config: LatencyConfig) -> Self {
        Self { config }
    }

    pub fn disabled() -> Self {
        Self::new(LatencyConfig::disabled())
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        if !self.config.enabled {
            return Duration::ZERO;
        }
        let ms = match op {
            Operation::List => self.config.list_ms,
            Operation::Lookup => self.config.lookup_ms,
            Operation::Create => self.config.create_ms,
            Operation::Update => self.config.update_ms,
            Operation::Delete => self.config.delete_ms,
            Operation::Query => self.config.query_ms,
            Operation::Membership => self.config.membership_ms,
        };
        Duration::from_millis(ms)
    }

    /// Suspend the caller for the operation's delay. Never fails.
    pub async fn pause(&self, op: Operation) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::new(LatencyConfig::default())
    }
}
