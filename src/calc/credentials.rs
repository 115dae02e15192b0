use keyring::Entry;
use tracing::{info, warn};

use crate::error::WorkshopError;

const ACCOUNT: &str = "serviceability-workshop";

fn entry(service: &str) -> Result<Entry, WorkshopError> {
    Entry::new(service, ACCOUNT).map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        WorkshopError::Keychain(e.to_string())
    })
}

pub fn set_api_key(service: &str, key: &str) -> Result<(), WorkshopError> {
    info!("Setting API key for service: {}", service);
    entry(service)?.set_password(key).map_err(|e| {
        warn!("Failed to set password for {}: {}", service, e);
        WorkshopError::Keychain(e.to_string())
    })
}

/// `Ok(None)` when no key has been stored yet.
pub fn get_api_key(service: &str) -> Result<Option<String>, WorkshopError> {
    match entry(service)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => {
            info!("No API key found for service: {}", service);
            Ok(None)
        }
        Err(e) => {
            warn!("Failed to get password for {}: {}", service, e);
            Err(WorkshopError::Keychain(e.to_string()))
        }
    }
}

pub fn delete_api_key(service: &str) -> Result<(), WorkshopError> {
    info!("Deleting API key for service: {}", service);
    entry(service)?.delete_credential().map_err(|e| {
        warn!("Failed to delete credential for {}: {}", service, e);
        WorkshopError::Keychain(e.to_string())
    })
}
