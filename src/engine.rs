//! Engine Module
//!
//! A table session: one symbol table behind a lock, driven by commands.
//!
//! ## Responsibilities
//! - Build the configured backend
//! - Route commands to table operations
//! - Serialize writers, allow concurrent readers
//! - Run line scripts and report per-command results

use std::io::{BufRead, Write};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, TableError};
use crate::protocol::{self, Command, Response};
use crate::table::{self, SymbolTable};

type SharedTable = Box<dyn SymbolTable<String, String> + Send + Sync>;

/// A symbol table session
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader
///
/// - **Writes** (put/delete): exclusive `RwLock` write guard
/// - **Reads** (get and the ordered queries): shared read guard
///
/// Every operation completes under one guard, so callers never observe a
/// partially applied mutation.
pub struct Session {
    /// Session configuration
    config: Config,

    /// The table, guarded for single-writer/multi-reader access
    table: RwLock<SharedTable>,
}

impl Session {
    /// Open a session with the backend chosen by `config`
    pub fn open(config: Config) -> Result<Self> {
        let table = table::open::<String, String>(&config)?;

        debug!(backend = %config.backend, "session opened");

        Ok(Self {
            config,
            table: RwLock::new(table),
        })
    }

    /// Execute a command
    ///
    /// Writes run under the write guard, everything else under a read
    /// guard. Absent keys produce a NOT_FOUND response; only failed writes
    /// return an error.
    pub fn execute(&self, command: Command) -> Result<Response> {
        if command.is_write() {
            let mut table = self.table.write();
            Self::apply(&mut table, command)
        } else {
            let table = self.table.read();
            Ok(Self::query(&table, command))
        }
    }

    /// Run a line script, writing one response line per command
    ///
    /// Malformed lines and failed writes produce an `ERR` line and the
    /// script continues. Returns the number of commands read.
    pub fn run_script<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<usize>
    where
        R: BufRead,
        W: Write,
    {
        let mut count = 0;

        while let Some(line) = protocol::read_command_line(reader)? {
            count += 1;

            let result = protocol::decode_command(&line).and_then(|c| self.execute(c));
            let response = match result {
                Ok(response) => response,
                Err(e @ TableError::Io(_)) => return Err(e),
                Err(e) => {
                    warn!(line = count, error = %e, "command failed");
                    Response::error(&e.to_string())
                }
            };

            protocol::write_response(writer, &response)?;
        }

        debug!(commands = count, "script finished");
        Ok(count)
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<String> {
        self.table.read().get(&key.to_string()).cloned()
    }

    /// Put a key-value pair
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.table.write().put(key.into(), value.into())
    }

    /// Delete a key
    pub fn delete(&self, key: &str) {
        self.table.write().delete(&key.to_string());
    }

    /// Number of entries
    pub fn size(&self) -> usize {
        self.table.read().size()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Diagnostic dump of the table layout
    pub fn dump(&self) -> String {
        self.table.read().dump()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn apply(table: &mut SharedTable, command: Command) -> Result<Response> {
        match command {
            Command::Put { key, value } => {
                table.put(key, value)?;
                Ok(Response::ok(None))
            }
            Command::Delete { key } => {
                table.delete(&key);
                Ok(Response::ok(None))
            }
            other => Ok(Self::query(table, other)),
        }
    }

    fn query(table: &SharedTable, command: Command) -> Response {
        match command {
            Command::Get { key } => match table.get(&key) {
                Some(value) => Response::value(value.as_str()),
                None => Response::not_found(),
            },
            Command::Size => Response::value(table.size().to_string()),
            Command::IsEmpty => Response::value(table.is_empty().to_string()),
            Command::Min => Self::key_response(table.min()),
            Command::Max => Self::key_response(table.max()),
            Command::Rank { key } => Response::value(table.rank(&key).to_string()),
            Command::Select { rank } => Self::key_response(table.select(rank)),
            Command::Keys => {
                let keys: Vec<&str> = table.keys().into_iter().map(String::as_str).collect();
                Response::value(keys.join(" "))
            }
            Command::Dump => Response::value(table.dump()),
            Command::Ping => Response::value("PONG"),
            Command::Put { .. } | Command::Delete { .. } => {
                Response::error("write command needs the write guard")
            }
        }
    }

    fn key_response(key: Option<&String>) -> Response {
        match key {
            Some(key) => Response::value(key.as_str()),
            None => Response::not_found(),
        }
    }
}
