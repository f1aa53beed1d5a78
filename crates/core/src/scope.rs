//! Screen lifetime scopes.
//!
//! Each screen on the navigation stack owns a [`ScreenScope`]. Requests issued on behalf of the
//! screen run through [`ScreenScope::run`]; once the screen is popped the scope is closed and
//! any response still in flight is dropped with [`ClinicError::Cancelled`] instead of being
//! written into state nobody is looking at.

use crate::{ClinicError, ClinicResult};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Cancellation scope tied to a screen's visible lifetime.
///
/// Clones share the same scope, so a navigator can close it while a request is awaiting.
#[derive(Clone, Debug)]
pub struct ScreenScope {
    closed: Arc<watch::Sender<bool>>,
}

impl ScreenScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            closed: Arc::new(tx),
        }
    }

    /// Close the scope. Idempotent.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Drive `fut` until it finishes or the scope closes, whichever comes first.
    pub async fn run<F, T>(&self, fut: F) -> ClinicResult<T>
    where
        F: Future<Output = T>,
    {
        let mut rx = self.closed.subscribe();
        if *rx.borrow_and_update() {
            return Err(ClinicError::Cancelled);
        }

        let closed = async move {
            loop {
                if rx.changed().await.is_err() {
                    // Sender gone: nobody can close the scope any more.
                    std::future::pending::<()>().await;
                }
                if *rx.borrow() {
                    break;
                }
            }
        };

        tokio::select! {
            biased;
            _ = closed => Err(ClinicError::Cancelled),
            out = fut => Ok(out),
        }
    }
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}
