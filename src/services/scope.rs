//! Cancellation for view-initiated requests. A view owns a [`ViewScope`];
//! once the scope is dropped or unmounted, any request still in flight
//! resolves to [`AppError::Cancelled`] and its result is never applied.

use std::future::Future;

use tokio::sync::watch;

use crate::errors::AppError;

pub struct ViewScope {
    unmounted: watch::Sender<bool>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            unmounted: tx,
        }
    }

    pub fn is_mounted(&self) -> bool {
        !*self.unmounted.borrow()
    }

    pub fn unmount(&self) {
        self.unmounted.send_replace(true);
    }

    /// Drives `fut` unless the scope unmounts first. A result that lands
    /// after unmount is discarded as well.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let mut rx = self.unmounted.subscribe();
        if *rx.borrow() {
            return Err(AppError::Cancelled);
        }

        let result = tokio::select! {
            res = fut => res,
            _ = rx.wait_for(|unmounted| *unmounted) => return Err(AppError::Cancelled),
        };

        if self.is_mounted() {
            result
        } else {
            Err(AppError::Cancelled)
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.unmounted.send_replace(true);
    }
}
