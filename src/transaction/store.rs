//! The persistence store that owns the transaction collection.
//!
//! The whole collection is kept in memory and written to a single JSON file
//! after every change.

use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction},
};

/// Holds the transactions in insertion order and keeps the data file in sync.
#[derive(Debug)]
pub struct TransactionStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
    next_id: TransactionId,
}

impl TransactionStore {
    /// Load the transactions from the JSON file at `path`.
    ///
    /// A missing file is treated as an empty ledger; the file is only created
    /// on the first write.
    ///
    /// # Errors
    /// Returns [Error::CorruptData] if the file exists but is not a JSON list
    /// of transactions, or [Error::Io] if the file could not be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let transactions: Vec<Transaction> = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|error| Error::CorruptData {
                path: path.display().to_string(),
                reason: error.to_string(),
            })?,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "No data file found at {}, starting with an empty ledger",
                    path.display()
                );
                Vec::new()
            }
            Err(error) => {
                return Err(Error::Io(format!(
                    "could not read {}: {error}",
                    path.display()
                )));
            }
        };

        let next_id = match transactions.iter().map(|transaction| transaction.id).max() {
            Some(max_id) => max_id.checked_add(1).ok_or_else(|| Error::CorruptData {
                path: path.display().to_string(),
                reason: format!("the ID {max_id} leaves no room for new transactions"),
            })?,
            None => 1,
        };

        tracing::debug!(
            "Loaded {} transactions from {}, next ID is {next_id}",
            transactions.len(),
            path.display()
        );

        Ok(Self {
            path,
            transactions,
            next_id,
        })
    }

    /// All transactions in the order they were added.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The ID that the next created transaction will get.
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    /// Assign the next ID to `new_transaction` and append it.
    ///
    /// # Errors
    /// Returns an error if the IDs have run out or the collection could not
    /// be written to disk, in which case nothing is added and the ID is not
    /// used up.
    pub fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = new_transaction.with_id(self.next_id);
        self.append(transaction.clone())?;

        Ok(transaction)
    }

    /// Add `transaction` to the end of the collection and save the collection.
    ///
    /// If the transaction's ID is not below the next ID, the next ID is moved
    /// past it so IDs stay unique.
    ///
    /// # Errors
    /// Returns [Error::IdOverflow] if no ID would be left after `transaction`,
    /// or an error if the collection could not be written to disk. In both
    /// cases the in-memory collection is left unchanged.
    pub fn append(&mut self, transaction: Transaction) -> Result<(), Error> {
        let id = transaction.id;
        let following_id = id.checked_add(1).ok_or(Error::IdOverflow(id))?;
        self.transactions.push(transaction);

        if let Err(error) = self.save() {
            self.transactions.pop();
            return Err(error);
        }

        self.next_id = self.next_id.max(following_id);
        tracing::debug!("Added transaction {id}");

        Ok(())
    }

    /// Remove every transaction with the ID `id`.
    ///
    /// Returns `true` if a transaction was removed and the collection was
    /// saved, or `false` if there was no such transaction. The data file is
    /// not touched in the latter case.
    ///
    /// # Errors
    /// Returns an error if the collection could not be written to disk, in
    /// which case the removed transactions are restored.
    pub fn remove(&mut self, id: TransactionId) -> Result<bool, Error> {
        if !self.transactions.iter().any(|transaction| transaction.id == id) {
            return Ok(false);
        }

        let previous = self.transactions.clone();
        self.transactions.retain(|transaction| transaction.id != id);

        if let Err(error) = self.save() {
            self.transactions = previous;
            return Err(error);
        }

        tracing::debug!("Removed transaction {id}");

        Ok(true)
    }

    /// Write the collection to a temporary file next to the data file and
    /// rename it over the data file.
    fn save(&self) -> Result<(), Error> {
        let serialized = serde_json::to_vec_pretty(&self.transactions)
            .map_err(|error| Error::Serialization(error.to_string()))?;

        atomic_write(&self.path, &serialized)
    }
}

fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| {
            Error::Io(format!(
                "could not create directory {}: {error}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = temp_path(path);

    let write_tmp = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    };

    write_tmp().map_err(|error| {
        Error::Io(format!(
            "could not write temp file {}: {error}",
            tmp_path.display()
        ))
    })?;

    fs::rename(&tmp_path, path).map_err(|error| {
        Error::Io(format!(
            "could not rename {} to {}: {error}",
            tmp_path.display(),
            path.display()
        ))
    })
}

/// `data.json` -> `data.json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}
