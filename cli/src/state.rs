//! Persisted simulation state: the contract plus the host clock

use anyhow::{bail, Context, Result};
use reservoir::{Address, Call, MemoryReservoir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Host block time in seconds; only `clock advance` moves it
    pub now: u64,
    pub contract: MemoryReservoir,
}

impl SimState {
    pub fn new(now: u64, contract: MemoryReservoir) -> Self {
        Self { now, contract }
    }

    pub fn call(&self, caller: Address) -> Call {
        Call::new(caller, self.now)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "State file not found: {}\n\
                 Deploy first with: reservoir init --controller @alice",
                path.display()
            );
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))
    }

    /// Write to a sibling temp file, then rename over the target
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Failed to serialize state")?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)
            .with_context(|| format!("Failed to write state file: {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace state file: {}", path.display()))?;
        log::debug!("Saved state to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::deploy_contract;
    use crate::config::CliConfig;
    use reservoir::WAD;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let controller = Address::from_label("alice").unwrap();

        let contract = deploy_contract(&CliConfig::default(), controller, 1_000 * WAD, 42).unwrap();
        SimState::new(42, contract).save(&path).unwrap();

        let loaded = SimState::load(&path).unwrap();
        assert_eq!(loaded.now, 42);
        assert_eq!(loaded.contract.balance_of(&controller), 1_000 * WAD);
        assert_eq!(loaded.contract.config().deployed_at, 42);
    }

    #[test]
    fn test_missing_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SimState::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("State file not found"));
    }
}
