//! Relational connection lifecycle.
//!
//! The [`Supervisor`] owns the connection and walks it through
//! `Disconnected -> Connecting -> Connected -> Disconnected`. Everyone else holds a
//! [`SupervisedLink`], which hands out the current handle and reports losses back.
//!
//! Transitions:
//! - connect succeeds: `Connecting -> Connected`
//! - connect fails with a connectivity error: `Connecting -> Disconnected`, retry after
//!   the [`RetryPolicy`] delay
//! - probe fails or a query reports a loss: `Connected -> Disconnected`, retry after the delay
//! - any fatal error: `Disconnected`, and [`Supervisor::run`] returns it

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::store::StoreError;

/// Lower bound on the probe interval; `tokio::time::interval` rejects zero.
const MIN_PROBE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Error)]
pub enum ConnectError {
    /// The server is unreachable or dropped us. Retried.
    #[error("connection unavailable: {0}")]
    Connectivity(String),

    /// Anything else (bad credentials, unknown database). Not retried.
    #[error("fatal connection error: {0}")]
    Fatal(String),
}

/// Fixed-delay retry, no backoff and no attempt limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    delay: Duration,
}

impl RetryPolicy {
    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Opens and checks connections for the supervisor.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Handle, ConnectError>;

    /// Cheap liveness check on an established handle.
    async fn probe(&self, handle: &Self::Handle) -> Result<(), ConnectError>;

    /// Releases a handle that is being replaced.
    async fn close(&self, _handle: Self::Handle) {}
}

enum Slot<H> {
    Disconnected,
    Connecting,
    Connected(H),
}

impl<H> Slot<H> {
    fn state(&self) -> LinkState {
        match self {
            Slot::Disconnected => LinkState::Disconnected,
            Slot::Connecting => LinkState::Connecting,
            Slot::Connected(_) => LinkState::Connected,
        }
    }
}

/// Shared view of a supervised connection.
#[derive(Clone)]
pub struct SupervisedLink<H> {
    slot: watch::Receiver<Slot<H>>,
    lost: mpsc::Sender<()>,
}

impl<H: Clone> SupervisedLink<H> {
    /// The live handle, or `Unavailable` while the supervisor is reconnecting.
    pub fn current(&self) -> Result<H, StoreError> {
        match &*self.slot.borrow() {
            Slot::Connected(handle) => Ok(handle.clone()),
            other => Err(StoreError::Unavailable(format!(
                "relational store is {:?}",
                other.state()
            ))),
        }
    }

    pub fn state(&self) -> LinkState {
        self.slot.borrow().state()
    }

    /// Tells the supervisor the connection looks dead. Duplicate reports collapse.
    pub fn report_lost(&self) {
        let _ = self.lost.try_send(());
    }

    /// Resolves once the link reaches `state`.
    #[cfg(test)]
    pub async fn wait_for(&self, state: LinkState) {
        let mut slot = self.slot.clone();
        let _ = slot.wait_for(|s| s.state() == state).await;
    }
}

pub struct Supervisor<C: Connector> {
    connector: C,
    policy: RetryPolicy,
    probe_interval: Duration,
    slot: watch::Sender<Slot<C::Handle>>,
    lost: mpsc::Receiver<()>,
}

impl<C: Connector> Supervisor<C> {
    pub fn new(
        connector: C,
        policy: RetryPolicy,
        probe_interval: Duration,
    ) -> (Self, SupervisedLink<C::Handle>) {
        let (slot_tx, slot_rx) = watch::channel(Slot::Disconnected);
        let (lost_tx, lost_rx) = mpsc::channel(1);

        let supervisor = Self {
            connector,
            policy,
            probe_interval: probe_interval.max(MIN_PROBE_INTERVAL),
            slot: slot_tx,
            lost: lost_rx,
        };
        let link = SupervisedLink {
            slot: slot_rx,
            lost: lost_tx,
        };
        (supervisor, link)
    }

    /// Keeps the connection alive. Returns only on a fatal error.
    pub async fn run(mut self) -> Result<(), ConnectError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            self.slot.send_replace(Slot::Connecting);

            match self.connector.connect().await {
                Ok(handle) => {
                    // Reports filed against the previous handle are stale.
                    while self.lost.try_recv().is_ok() {}

                    self.slot.send_replace(Slot::Connected(handle.clone()));
                    info!("Relational store connected (attempt {attempt})");
                    attempt = 0;

                    let reason = self.watch(&handle).await;
                    self.slot.send_replace(Slot::Disconnected);
                    self.connector.close(handle).await;

                    match reason {
                        ConnectError::Connectivity(msg) => {
                            warn!("Relational store connection lost: {msg}");
                        }
                        fatal => {
                            error!("Relational store failed: {fatal}");
                            return Err(fatal);
                        }
                    }
                }
                Err(ConnectError::Connectivity(msg)) => {
                    self.slot.send_replace(Slot::Disconnected);
                    error!("Relational store connect attempt {attempt} failed: {msg}");
                }
                Err(fatal) => {
                    self.slot.send_replace(Slot::Disconnected);
                    error!("Relational store connect failed: {fatal}");
                    return Err(fatal);
                }
            }

            let delay = self.policy.delay();
            info!("Reconnecting to relational store in {}ms", delay.as_millis());
            tokio::time::sleep(delay).await;
        }
    }

    /// Waits until the connection is reported lost or fails a probe.
    async fn watch(&mut self, handle: &C::Handle) -> ConnectError {
        let mut ticker = tokio::time::interval(self.probe_interval);
        ticker.tick().await;

        loop {
            tokio::select! {
                Some(()) = self.lost.recv() => {
                    return ConnectError::Connectivity("query reported a dropped connection".into());
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.connector.probe(handle).await {
                        return e;
                    }
                }
            }
        }
    }
}
