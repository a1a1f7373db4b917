use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use boards_core::{Action, ActionType};
use boards_logging::boards_trace;
use tokio::sync::mpsc;

/// Fan-out channel for dispatched actions.
///
/// Every subscription sees every action published after it subscribed, in
/// publish order. Nothing is dropped for slow subscribers and no action is
/// consumed by a single taker.
#[derive(Debug, Default)]
pub struct ActionBus {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Action>>>,
    closed: AtomicBool,
}

impl ActionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `action` on every live subscription before returning.
    ///
    /// Returns false once the bus is closed.
    pub fn publish(&self, action: Action) -> bool {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.closed.load(Ordering::Acquire) {
            boards_trace!("bus closed, dropping {}", action.action_type());
            return false;
        }
        boards_trace!(
            "publish {} to {} subscribers",
            action.action_type(),
            subscribers.len()
        );
        subscribers.retain(|tx| tx.send(action.clone()).is_ok());
        true
    }

    /// Starts receiving every action published from now on.
    ///
    /// Subscribing to a closed bus yields a subscription that is already drained.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.closed.load(Ordering::Acquire) {
            subscribers.push(tx);
        }
        Subscription { rx }
    }

    /// Drops every subscriber. Queued actions can still be received.
    pub fn close(&self) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.closed.store(true, Ordering::Release);
        subscribers.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// One subscriber's queue of published actions.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Subscription {
    /// Next action in publish order; `None` once the bus closed and the queue drained.
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }

    /// Skips actions until one whose type is in `pattern` arrives.
    pub async fn next_matching(&mut self, pattern: &[ActionType]) -> Option<Action> {
        while let Some(action) = self.rx.recv().await {
            if action.matches(pattern) {
                return Some(action);
            }
        }
        None
    }

    pub fn try_recv(&mut self) -> Option<Action> {
        self.rx.try_recv().ok()
    }
}
