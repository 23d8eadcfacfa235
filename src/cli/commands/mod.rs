//! CLI command implementations.

pub mod connect;
pub mod order;
pub mod orders;
pub mod quotes;
pub mod records;
pub mod signals;
pub mod validate;
pub mod watch;

use std::sync::Arc;
use terminal_config::AppConfig;
use terminal_gateway::{GatewayConnection, GatewayCredentials, NullGateway};

/// Build the gateway connection from configuration.
///
/// No vendor SDK binding is linked in this build: the null gateway
/// reports unavailable and every downstream path degrades to its
/// disconnected behavior.
pub(crate) fn build_connection(config: &AppConfig) -> Arc<GatewayConnection> {
    Arc::new(GatewayConnection::new(
        Arc::new(NullGateway),
        GatewayCredentials::resolve(
            config.gateway.token.clone(),
            config.gateway.account_id.clone(),
        ),
    ))
}
