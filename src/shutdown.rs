//! Interrupt handling.
//!
//! The signal task only flips a [`ShutdownToken`]. The session loop sees the
//! flip, sends QUIT best-effort and closes the transport; the game state is
//! never touched from the signal side.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Safe to call from any task, any number of times.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Resolves once [`trigger`](Self::trigger) has been called.
    pub async fn triggered(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_triggered() {
                return;
            }
            notified.await;
        }
    }

    /// Trigger this token on Ctrl-C. The spawned task holds only a clone of the token.
    pub fn trigger_on_ctrl_c(&self) {
        let token = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    log::info!("interrupt received, shutting down");
                    token.trigger();
                }
                Err(e) => log::warn!("cannot listen for Ctrl-C: {}", e),
            }
        });
    }
}
