//! # Store
//!
//! Opens both persisted files from one data directory.
//!
//! ```text
//! StoreConfig::new(data_dir)
//!      │
//!      ▼
//! Store::open(config)
//!      ├── ClientDirectory::open(data_dir/clients.json)     (corrupt → error)
//!      └── InvoiceSequencer::load(data_dir/invoiceNumber.json) (never fails)
//! ```

use std::path::PathBuf;
use tracing::info;

use crate::clients::ClientDirectory;
use crate::error::StoreResult;
use crate::sequence::InvoiceSequencer;

/// Default client list file name.
pub const CLIENTS_FILE: &str = "clients.json";

/// Default invoice counter file name.
pub const SEQUENCE_FILE: &str = "invoiceNumber.json";

/// Where the persisted files live.
///
/// ## Example
/// ```rust
/// use facture_store::StoreConfig;
///
/// let config = StoreConfig::new("/tmp/facture").clients_file("customers.json");
/// assert!(config.clients_path().ends_with("customers.json"));
/// assert!(config.sequence_path().ends_with("invoiceNumber.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding both files.
    pub data_dir: PathBuf,

    /// Client list file name.
    /// Default: `clients.json`
    pub clients_file: String,

    /// Counter file name.
    /// Default: `invoiceNumber.json`
    pub sequence_file: String,
}

impl StoreConfig {
    /// Creates a configuration with the default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            clients_file: CLIENTS_FILE.to_string(),
            sequence_file: SEQUENCE_FILE.to_string(),
        }
    }

    /// Sets the client list file name.
    pub fn clients_file(mut self, name: impl Into<String>) -> Self {
        self.clients_file = name.into();
        self
    }

    /// Sets the counter file name.
    pub fn sequence_file(mut self, name: impl Into<String>) -> Self {
        self.sequence_file = name.into();
        self
    }

    /// Full path of the client list.
    pub fn clients_path(&self) -> PathBuf {
        self.data_dir.join(&self.clients_file)
    }

    /// Full path of the counter.
    pub fn sequence_path(&self) -> PathBuf {
        self.data_dir.join(&self.sequence_file)
    }
}

/// Both persisted components, opened together.
#[derive(Debug, Clone)]
pub struct Store {
    clients: ClientDirectory,
    sequencer: InvoiceSequencer,
}

impl Store {
    /// Opens the client directory and loads the invoice counter.
    ///
    /// ## Errors
    /// Only a corrupt or unreadable client list fails; the counter always
    /// recovers.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening store");

        let clients = ClientDirectory::open(config.clients_path())?;
        let sequencer = InvoiceSequencer::load(config.sequence_path());

        Ok(Store { clients, sequencer })
    }

    /// The client directory.
    pub fn clients(&self) -> &ClientDirectory {
        &self.clients
    }

    /// The client directory, for mutation.
    pub fn clients_mut(&mut self) -> &mut ClientDirectory {
        &mut self.clients
    }

    /// The invoice counter.
    pub fn sequencer(&self) -> &InvoiceSequencer {
        &self.sequencer
    }

    /// The invoice counter, for committing.
    pub fn sequencer_mut(&mut self) -> &mut InvoiceSequencer {
        &mut self.sequencer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::fs;

    #[test]
    fn test_default_file_names() {
        let config = StoreConfig::new("/data");
        assert_eq!(config.clients_path(), PathBuf::from("/data/clients.json"));
        assert_eq!(config.sequence_path(), PathBuf::from("/data/invoiceNumber.json"));
    }

    #[test]
    fn test_open_empty_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&StoreConfig::new(dir.path())).unwrap();

        assert!(store.clients().is_empty());
        assert_eq!(store.sequencer().next(), 1);
    }

    #[test]
    fn test_open_fails_on_corrupt_clients() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CLIENTS_FILE), "not json").unwrap();

        assert!(matches!(
            Store::open(&StoreConfig::new(dir.path())),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
