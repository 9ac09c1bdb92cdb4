//! # Wallet Session
//!
//! Read-only view of the user's wallet. Keys live with the wallet provider;
//! this crate only sees the address, the public key, and whether the session
//! is authenticated, and asks a [`TransactionSigner`] for signatures.
//!
//! [`SessionHandle`] is the provider an embedding application updates when its
//! wallet connects or disconnects. Watchers observe it through
//! [`WalletProvider::watch`].

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;

/// Snapshot of the wallet connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Option<String>,
    pub public_key: Option<String>,
    pub connected: bool,
}

impl WalletSession {
    pub fn connected(address: impl Into<String>, public_key: Option<String>) -> Self {
        Self {
            address: Some(address.into()),
            public_key,
            connected: true,
        }
    }

    /// Address to act on: present only while connected.
    pub fn active_address(&self) -> Option<&str> {
        if self.connected {
            self.address.as_deref()
        } else {
            None
        }
    }
}

/// Source of the wallet session.
pub trait WalletProvider: Send + Sync {
    fn session(&self) -> WalletSession;

    /// Receiver that wakes on every session change.
    fn watch(&self) -> watch::Receiver<WalletSession>;
}

/// Signs built transaction bytes on behalf of the user.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Returns the base64 serialized signature for base64 `tx_bytes`.
    async fn sign_transaction(&self, tx_bytes: &str) -> Result<String>;
}

/// Wallet provider backed by a watch channel.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: watch::Sender<WalletSession>,
}

impl SessionHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(WalletSession::default());
        Self { tx }
    }

    pub fn connect(&self, address: impl Into<String>, public_key: Option<String>) {
        let session = WalletSession::connected(address, public_key);
        tracing::info!(address = ?session.address, "[WALLET] Connected");
        self.tx.send_replace(session);
    }

    pub fn disconnect(&self) {
        tracing::info!("[WALLET] Disconnected");
        self.tx.send_replace(WalletSession::default());
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletProvider for SessionHandle {
    fn session(&self) -> WalletSession {
        self.tx.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<WalletSession> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_address_requires_connection() {
        let session = WalletSession {
            address: Some("0x2".to_string()),
            public_key: None,
            connected: false,
        };

        assert_eq!(session.active_address(), None);
        assert_eq!(WalletSession::connected("0x2", None).active_address(), Some("0x2"));
    }

    #[tokio::test]
    async fn test_session_handle_notifies_watchers() {
        // Arrange
        let handle = SessionHandle::new();
        let mut rx = handle.watch();

        // Act
        handle.connect("0xabc", Some("AQID".to_string()));
        rx.changed().await.unwrap();

        // Assert
        assert_eq!(rx.borrow().active_address(), Some("0xabc"));
        assert_eq!(handle.session().public_key.as_deref(), Some("AQID"));

        handle.disconnect();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().connected);
    }
}
