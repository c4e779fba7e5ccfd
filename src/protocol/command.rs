//! Command definitions
//!
//! Represents commands issued to a table session.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Get,
    Put,
    Delete,
    Size,
    IsEmpty,
    Min,
    Max,
    Rank,
    Select,
    Keys,
    Dump,
    Ping,
}

impl CommandType {
    /// Verb used on the command line
    pub fn verb(self) -> &'static str {
        match self {
            CommandType::Get => "GET",
            CommandType::Put => "PUT",
            CommandType::Delete => "DEL",
            CommandType::Size => "SIZE",
            CommandType::IsEmpty => "EMPTY",
            CommandType::Min => "MIN",
            CommandType::Max => "MAX",
            CommandType::Rank => "RANK",
            CommandType::Select => "SELECT",
            CommandType::Keys => "KEYS",
            CommandType::Dump => "DUMP",
            CommandType::Ping => "PING",
        }
    }

    /// Parse a verb, ignoring case
    pub fn from_verb(verb: &str) -> Option<Self> {
        let command_type = match verb.to_ascii_uppercase().as_str() {
            "GET" => CommandType::Get,
            "PUT" => CommandType::Put,
            "DEL" => CommandType::Delete,
            "SIZE" => CommandType::Size,
            "EMPTY" => CommandType::IsEmpty,
            "MIN" => CommandType::Min,
            "MAX" => CommandType::Max,
            "RANK" => CommandType::Rank,
            "SELECT" => CommandType::Select,
            "KEYS" => CommandType::Keys,
            "DUMP" => CommandType::Dump,
            "PING" => CommandType::Ping,
            _ => return None,
        };
        Some(command_type)
    }

    /// Number of arguments following the verb
    pub fn arity(self) -> usize {
        match self {
            CommandType::Put => 2,
            CommandType::Get | CommandType::Delete | CommandType::Rank | CommandType::Select => 1,
            _ => 0,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Get a value by key
    Get { key: String },

    /// Put a key-value pair
    Put { key: String, value: String },

    /// Delete a key
    Delete { key: String },

    /// Number of entries
    Size,

    /// Whether the table has no entries
    IsEmpty,

    /// Smallest key
    Min,

    /// Largest key
    Max,

    /// Number of keys less than `key`
    Rank { key: String },

    /// Key of the given rank
    Select { rank: usize },

    /// All keys in order
    Keys,

    /// Diagnostic dump of the table layout
    Dump,

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Get { .. } => CommandType::Get,
            Command::Put { .. } => CommandType::Put,
            Command::Delete { .. } => CommandType::Delete,
            Command::Size => CommandType::Size,
            Command::IsEmpty => CommandType::IsEmpty,
            Command::Min => CommandType::Min,
            Command::Max => CommandType::Max,
            Command::Rank { .. } => CommandType::Rank,
            Command::Select { .. } => CommandType::Select,
            Command::Keys => CommandType::Keys,
            Command::Dump => CommandType::Dump,
            Command::Ping => CommandType::Ping,
        }
    }

    /// Whether the command mutates the table
    pub fn is_write(&self) -> bool {
        matches!(self, Command::Put { .. } | Command::Delete { .. })
    }
}
