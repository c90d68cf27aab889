//! Configuration Module
//!
//! Configuration loading for the price stream core.

mod settings;

pub use settings::{
    ConfigError, DashboardConfig, FeedEndpoint, FeedSettings, HubSettings, OrdersSettings,
};
