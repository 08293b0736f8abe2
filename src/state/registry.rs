use std::sync::Arc;

use alloy::primitives::U256;
use dashmap::DashMap;
use tokio::sync::Mutex;

use super::*;

/// Vaults shared between tasks.
///
/// Each vault sits behind its own lock: fills on one vault are settled one
/// at a time, fills on different vaults do not wait for each other.
#[derive(Debug, Default)]
pub struct Vaults {
    vaults: DashMap<types::VaultId, Arc<Mutex<Vault>>>,
}

impl Vaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the vault, returning the one previously registered under the
    /// same ID.
    pub fn insert(&self, vault: Vault) -> Option<Arc<Mutex<Vault>>> {
        self.vaults.insert(vault.id(), Arc::new(Mutex::new(vault)))
    }

    pub fn get(&self, id: types::VaultId) -> Option<Arc<Mutex<Vault>>> {
        self.vaults.get(&id).map(|v| Arc::clone(v.value()))
    }

    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }

    /// Takes (part of) an order on behalf of the vault, waiting for fills
    /// already in progress on it.
    pub async fn take_order<E: TransferEffector>(
        &self,
        id: types::VaultId,
        request: &types::FillRequest,
        effector: E,
    ) -> SettlementResult<fill::FillRecord> {
        let vault = self.get(id).ok_or(SettlementError::UnknownVault(id))?;
        let mut vault = vault.lock().await;
        vault.take_order(request, effector)
    }

    /// Current holdings of the asset in the vault.
    pub async fn balance(&self, id: types::VaultId, asset: types::Asset) -> SettlementResult<U256> {
        let vault = self.get(id).ok_or(SettlementError::UnknownVault(id))?;
        let balance = vault.lock().await.balance(asset);
        Ok(balance)
    }
}
