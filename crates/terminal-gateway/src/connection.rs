//! Gateway connection lifecycle.

use crate::bounded::{run_bounded, Bounded};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use terminal_core::error::GatewayError;
use terminal_core::traits::{GatewayApi, OrderTicket};
use tokio::time;
use tracing::{debug, info, warn};

/// Pre-seeded demo credentials, used when the configuration carries none.
/// These point at the vendor's public simulation environment.
pub const DEMO_TOKEN: &str = "85db8b06e888f0e16b7041da679079ecd529e117";
pub const DEMO_ACCOUNT_ID: &str = "41702793-80bf-11f0-8b8b-00163e022aa6";

/// Liquid, always-listed instrument used to prove live connectivity.
const CANARY_SYMBOL: &str = "SZSE.000001";

/// Why a connection attempt ended in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The overall deadline fired before any probe reported success.
    /// Usually means the vendor terminal process is not running.
    TimedOut,
    /// Probes ran and failed. Usually bad token or account id.
    ProbeFailed,
    /// The SDK module is not importable at all.
    SdkUnavailable,
}

/// Connection lifecycle state.
///
/// There is no reconnecting state: a failed or disconnected gateway is
/// restarted from `Disconnected` by calling [`GatewayConnection::connect`]
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Failed(FailureReason),
}

/// Per-step and overall probe deadlines.
///
/// The relative ordering matters: cheap probes carry short deadlines and
/// run before the expensive ones. The overall deadline is independent of
/// the per-step sum and wins whenever it fires first.
#[derive(Debug, Clone)]
pub struct ConnectTimeouts {
    pub set_token: Duration,
    pub set_account: Duration,
    pub canary_quote: Duration,
    pub cash_probe: Duration,
    pub overall: Duration,
}

impl Default for ConnectTimeouts {
    fn default() -> Self {
        Self {
            set_token: Duration::from_secs(1),
            set_account: Duration::from_secs(1),
            canary_quote: Duration::from_secs(3),
            cash_probe: Duration::from_secs(2),
            overall: Duration::from_secs(4),
        }
    }
}

/// Resolved gateway credentials.
#[derive(Debug, Clone)]
pub struct GatewayCredentials {
    pub token: String,
    pub account_id: String,
}

impl GatewayCredentials {
    /// Resolve from configuration, falling back to the seeded demo
    /// credentials when absent.
    pub fn resolve(token: Option<String>, account_id: Option<String>) -> Self {
        let token = match token.filter(|t| !t.is_empty()) {
            Some(t) => t,
            None => {
                info!("no gateway token configured, using demo token");
                DEMO_TOKEN.to_string()
            }
        };
        let account_id = match account_id.filter(|a| !a.is_empty()) {
            Some(a) => a,
            None => {
                info!("no gateway account id configured, using demo simulation account");
                DEMO_ACCOUNT_ID.to_string()
            }
        };
        Self { token, account_id }
    }
}

/// Owns the lifecycle of the connection to the vendor trading terminal.
pub struct GatewayConnection {
    api: Arc<dyn GatewayApi>,
    credentials: GatewayCredentials,
    timeouts: ConnectTimeouts,
    state: RwLock<ConnectionState>,
}

impl GatewayConnection {
    pub fn new(api: Arc<dyn GatewayApi>, credentials: GatewayCredentials) -> Self {
        Self::with_timeouts(api, credentials, ConnectTimeouts::default())
    }

    pub fn with_timeouts(
        api: Arc<dyn GatewayApi>,
        credentials: GatewayCredentials,
        timeouts: ConnectTimeouts,
    ) -> Self {
        Self {
            api,
            credentials,
            timeouts,
            state: RwLock::new(ConnectionState::Disconnected),
        }
    }

    /// The underlying SDK handle, for callers issuing their own bounded
    /// calls (provider fallback, bar store).
    pub fn api(&self) -> Arc<dyn GatewayApi> {
        Arc::clone(&self.api)
    }

    pub fn account_id(&self) -> &str {
        &self.credentials.account_id
    }

    /// Current lifecycle state. Pure read.
    pub fn state(&self) -> ConnectionState {
        *self.state.read().expect("connection state lock poisoned")
    }

    /// Whether the gateway is usable: explicitly `Connected` AND the SDK
    /// is importable. Never re-probes.
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected && self.api.available()
    }

    /// Drop back to `Disconnected`.
    pub fn disconnect(&self) {
        self.set_state(ConnectionState::Disconnected);
    }

    /// Authenticate and probe the vendor terminal.
    ///
    /// Transitions to `Connected` only on an explicit success signal from
    /// the canary quote or the cash probe, never on absence of error.
    /// Returns whether the gateway is now connected.
    pub async fn connect(&self) -> bool {
        if !self.api.available() {
            warn!("gateway SDK unavailable, cannot connect");
            self.set_state(ConnectionState::Failed(FailureReason::SdkUnavailable));
            return false;
        }

        self.set_state(ConnectionState::Connecting);

        match time::timeout(self.timeouts.overall, self.probe()).await {
            Ok(Ok(())) => {
                self.set_state(ConnectionState::Connected);
                info!("gateway connected");
                true
            }
            Ok(Err(reason)) => {
                self.set_state(ConnectionState::Failed(reason));
                match reason {
                    FailureReason::TimedOut => warn!(
                        "gateway probes timed out; is the vendor terminal running?"
                    ),
                    _ => warn!("gateway probe failed; check token and account id"),
                }
                false
            }
            Err(_) => {
                // The in-flight probe is abandoned, not interrupted.
                self.set_state(ConnectionState::Failed(FailureReason::TimedOut));
                warn!(
                    timeout = ?self.timeouts.overall,
                    "gateway connect timed out; is the vendor terminal running?"
                );
                false
            }
        }
    }

    /// Ordered probe sequence: token, account id, canary quote, cash.
    ///
    /// A step that completes with an error means the terminal answered
    /// and rejected us; a step that times out means it likely is not
    /// there at all. The distinction surfaces in the failure reason.
    async fn probe(&self) -> Result<(), FailureReason> {
        let mut any_timeout = false;

        let api = self.api();
        let token = self.credentials.token.clone();
        match run_bounded(self.timeouts.set_token, async move {
            api.set_token(&token).await
        })
        .await
        {
            Bounded::Completed(Ok(())) => debug!("gateway token set"),
            Bounded::Completed(Err(e)) => {
                warn!(error = %e, "setting gateway token failed");
                return Err(FailureReason::ProbeFailed);
            }
            Bounded::TimedOut => {
                warn!("setting gateway token timed out");
                any_timeout = true;
            }
        }

        let api = self.api();
        let account_id = self.credentials.account_id.clone();
        match run_bounded(self.timeouts.set_account, async move {
            api.set_account_id(&account_id).await
        })
        .await
        {
            Bounded::Completed(Ok(())) => {
                debug!(account_id = %self.credentials.account_id, "gateway account id set");
            }
            Bounded::Completed(Err(e)) => warn!(error = %e, "setting gateway account id failed"),
            Bounded::TimedOut => {
                warn!("setting gateway account id timed out");
                any_timeout = true;
            }
        }

        // Lightweight live quote for a canary symbol proves connectivity.
        let api = self.api();
        let canary = vec![CANARY_SYMBOL.to_string()];
        match run_bounded(self.timeouts.canary_quote, async move {
            api.live_quotes(&canary).await
        })
        .await
        {
            Bounded::Completed(Ok(ticks)) if !ticks.is_empty() => {
                debug!("gateway connectivity proven via canary quote");
                return Ok(());
            }
            Bounded::Completed(_) => warn!("canary quote probe failed"),
            Bounded::TimedOut => {
                warn!("canary quote probe timed out");
                any_timeout = true;
            }
        }

        // Cheaper secondary proof when the quote feed is not serving.
        let api = self.api();
        match run_bounded(self.timeouts.cash_probe, async move { api.cash().await }).await {
            Bounded::Completed(Ok(_)) => {
                debug!("gateway connectivity proven via cash balance");
                return Ok(());
            }
            Bounded::Completed(Err(e)) => warn!(error = %e, "cash probe failed"),
            Bounded::TimedOut => {
                warn!("cash probe timed out");
                any_timeout = true;
            }
        }

        Err(if any_timeout {
            FailureReason::TimedOut
        } else {
            FailureReason::ProbeFailed
        })
    }

    /// Session orders; empty when not connected.
    pub async fn orders(&self) -> Result<Vec<OrderTicket>, GatewayError> {
        if !self.is_connected() {
            return Ok(Vec::new());
        }
        let api = self.api();
        run_bounded(Duration::from_secs(3), async move { api.orders().await })
            .await
            .into_result(Duration::from_secs(3))
    }

    /// Open (not fully filled or cancelled) orders; empty when not
    /// connected.
    pub async fn unfinished_orders(&self) -> Result<Vec<OrderTicket>, GatewayError> {
        if !self.is_connected() {
            return Ok(Vec::new());
        }
        let api = self.api();
        run_bounded(Duration::from_secs(3), async move {
            api.unfinished_orders().await
        })
        .await
        .into_result(Duration::from_secs(3))
    }

    fn set_state(&self, next: ConnectionState) {
        *self.state.write().expect("connection state lock poisoned") = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::null::NullGateway;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use terminal_core::traits::{CashInfo, GatewayBar, LiveTick, OrderRequest};

    /// Scripted gateway for probe scenarios.
    #[derive(Default)]
    struct ScriptedGateway {
        hang_everything: bool,
        quote_serves: bool,
        cash_serves: bool,
        quote_calls: AtomicUsize,
        cash_calls: AtomicUsize,
    }

    impl ScriptedGateway {
        async fn maybe_hang(&self) {
            if self.hang_everything {
                std::future::pending::<()>().await;
            }
        }
    }

    #[async_trait]
    impl GatewayApi for ScriptedGateway {
        async fn set_token(&self, _token: &str) -> Result<(), GatewayError> {
            self.maybe_hang().await;
            Ok(())
        }

        async fn set_account_id(&self, _account_id: &str) -> Result<(), GatewayError> {
            self.maybe_hang().await;
            Ok(())
        }

        async fn live_quotes(&self, symbols: &[String]) -> Result<Vec<LiveTick>, GatewayError> {
            self.maybe_hang().await;
            self.quote_calls.fetch_add(1, Ordering::SeqCst);
            if self.quote_serves {
                Ok(symbols
                    .iter()
                    .map(|s| LiveTick {
                        symbol: s.clone(),
                        price: 10.0,
                        cum_volume: 1000.0,
                    })
                    .collect())
            } else {
                Err(GatewayError::Api("quote feed down".into()))
            }
        }

        async fn cash(&self) -> Result<CashInfo, GatewayError> {
            self.maybe_hang().await;
            self.cash_calls.fetch_add(1, Ordering::SeqCst);
            if self.cash_serves {
                Ok(CashInfo {
                    available: Decimal::new(100_000, 0),
                    total: Decimal::new(100_000, 0),
                })
            } else {
                Err(GatewayError::Api("no account".into()))
            }
        }

        async fn history(
            &self,
            _symbol: &str,
            _frequency: &str,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<GatewayBar>, GatewayError> {
            Ok(Vec::new())
        }

        async fn history_n(
            &self,
            _symbol: &str,
            _frequency: &str,
            _count: usize,
        ) -> Result<Vec<GatewayBar>, GatewayError> {
            Ok(Vec::new())
        }

        async fn place_order(&self, _request: &OrderRequest) -> Result<OrderTicket, GatewayError> {
            Err(GatewayError::NotConnected)
        }

        async fn cancel_order(&self, _order_id: &str, _account_id: &str) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn orders(&self) -> Result<Vec<OrderTicket>, GatewayError> {
            Ok(Vec::new())
        }

        async fn unfinished_orders(&self) -> Result<Vec<OrderTicket>, GatewayError> {
            Ok(Vec::new())
        }
    }

    fn connection(api: Arc<dyn GatewayApi>) -> GatewayConnection {
        GatewayConnection::new(api, GatewayCredentials::resolve(None, None))
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_via_canary_quote() {
        let api = Arc::new(ScriptedGateway {
            quote_serves: true,
            ..Default::default()
        });
        let conn = connection(api.clone());

        assert!(conn.connect().await);
        assert_eq!(conn.state(), ConnectionState::Connected);
        assert!(conn.is_connected());
        // Cash probe never needed.
        assert_eq!(api.cash_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_via_cash_when_quote_fails() {
        let api = Arc::new(ScriptedGateway {
            quote_serves: false,
            cash_serves: true,
            ..Default::default()
        });
        let conn = connection(api.clone());

        assert!(conn.connect().await);
        assert_eq!(conn.state(), ConnectionState::Connected);
        assert_eq!(api.quote_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.cash_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_probes_failing_is_probe_failed() {
        let api = Arc::new(ScriptedGateway::default());
        let conn = connection(api);

        assert!(!conn.connect().await);
        assert_eq!(
            conn.state(),
            ConnectionState::Failed(FailureReason::ProbeFailed)
        );
        assert!(!conn.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_terminal_times_out() {
        let api = Arc::new(ScriptedGateway {
            hang_everything: true,
            ..Default::default()
        });
        let conn = connection(api);
        let started = time::Instant::now();

        assert!(!conn.connect().await);
        assert_eq!(
            conn.state(),
            ConnectionState::Failed(FailureReason::TimedOut)
        );
        // Every step hangs, so the step budgets (1+1+3+2s) would exceed
        // the overall 4s deadline; the deadline wins.
        assert_eq!(started.elapsed(), ConnectTimeouts::default().overall);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_sdk_fails_fast() {
        let conn = connection(Arc::new(NullGateway));

        assert!(!conn.connect().await);
        assert_eq!(
            conn.state(),
            ConnectionState::Failed(FailureReason::SdkUnavailable)
        );
        assert!(!conn.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_resets_state() {
        let api = Arc::new(ScriptedGateway {
            quote_serves: true,
            ..Default::default()
        });
        let conn = connection(api);

        assert!(conn.connect().await);
        conn.disconnect();
        assert_eq!(conn.state(), ConnectionState::Disconnected);
        assert!(!conn.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_listing_empty_when_disconnected() {
        let conn = connection(Arc::new(ScriptedGateway::default()));
        assert!(conn.orders().await.unwrap().is_empty());
        assert!(conn.unfinished_orders().await.unwrap().is_empty());
    }

    #[test]
    fn test_credentials_default_to_demo() {
        let creds = GatewayCredentials::resolve(None, Some(String::new()));
        assert_eq!(creds.token, DEMO_TOKEN);
        assert_eq!(creds.account_id, DEMO_ACCOUNT_ID);

        let creds = GatewayCredentials::resolve(Some("tok".into()), Some("acct".into()));
        assert_eq!(creds.token, "tok");
        assert_eq!(creds.account_id, "acct");
    }
}
