//! Protocol codec
//!
//! Encoding and decoding functions for the line protocol.
//!
//! ## Line Format
//!
//! ### Request (Command)
//! ```text
//! VERB [ARG [ARG]]
//! ```
//! Tokens are separated by ASCII whitespace. Verbs are case-insensitive.
//!
//! ### Arguments by Command Type
//! - PUT:              key value
//! - GET, DEL, RANK:   key
//! - SELECT:           rank (unsigned integer)
//! - everything else:  none
//!
//! ### Response
//! ```text
//! OK | VALUE [payload] | NOT_FOUND | ERR message
//! ```

use std::io::{BufRead, Write};

use crate::error::{Result, TableError};
use super::{Command, CommandType, Response, Status};

/// Lines starting with this are skipped by the stream reader
pub const COMMENT_PREFIX: char = '#';

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command as a single line (without newline)
pub fn encode_command(command: &Command) -> String {
    let verb = command.command_type().verb();

    match command {
        Command::Get { key } | Command::Delete { key } | Command::Rank { key } => {
            format!("{} {}", verb, key)
        }
        Command::Put { key, value } => format!("{} {} {}", verb, key, value),
        Command::Select { rank } => format!("{} {}", verb, rank),
        _ => verb.to_string(),
    }
}

/// Decode a command from a single line
pub fn decode_command(line: &str) -> Result<Command> {
    let mut tokens = line.split_whitespace();

    let verb = tokens
        .next()
        .ok_or_else(|| TableError::Protocol("Empty command".to_string()))?;

    let command_type = CommandType::from_verb(verb)
        .ok_or_else(|| TableError::Protocol(format!("Unknown command: {}", verb)))?;

    let args: Vec<&str> = tokens.collect();
    if args.len() != command_type.arity() {
        return Err(TableError::Protocol(format!(
            "{} command: expected {} argument(s), got {}",
            command_type.verb(),
            command_type.arity(),
            args.len()
        )));
    }

    let command = match command_type {
        CommandType::Get => Command::Get {
            key: args[0].to_string(),
        },
        CommandType::Put => Command::Put {
            key: args[0].to_string(),
            value: args[1].to_string(),
        },
        CommandType::Delete => Command::Delete {
            key: args[0].to_string(),
        },
        CommandType::Rank => Command::Rank {
            key: args[0].to_string(),
        },
        CommandType::Select => {
            let rank = args[0].parse().map_err(|_| {
                TableError::Protocol(format!("SELECT command: invalid rank: {}", args[0]))
            })?;
            Command::Select { rank }
        }
        CommandType::Size => Command::Size,
        CommandType::IsEmpty => Command::IsEmpty,
        CommandType::Min => Command::Min,
        CommandType::Max => Command::Max,
        CommandType::Keys => Command::Keys,
        CommandType::Dump => Command::Dump,
        CommandType::Ping => Command::Ping,
    };

    Ok(command)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response as a single line (without newline)
pub fn encode_response(response: &Response) -> String {
    match (response.status, response.payload.as_deref()) {
        (Status::Ok, None) => "OK".to_string(),
        (Status::Ok, Some("")) => "VALUE".to_string(),
        (Status::Ok, Some(payload)) => format!("VALUE {}", payload),
        (Status::NotFound, _) => "NOT_FOUND".to_string(),
        (Status::Error, message) => format!("ERR {}", message.unwrap_or("")),
    }
}

/// Decode a response from a single line
pub fn decode_response(line: &str) -> Result<Response> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (head, rest) = match line.split_once(' ') {
        Some((head, rest)) => (head, Some(rest)),
        None => (line, None),
    };

    match (head, rest) {
        ("OK", None) => Ok(Response::ok(None)),
        ("VALUE", payload) => Ok(Response::value(payload.unwrap_or(""))),
        ("NOT_FOUND", None) => Ok(Response::not_found()),
        ("ERR", message) => Ok(Response::error(message.unwrap_or(""))),
        _ => Err(TableError::Protocol(format!("Unknown response: {}", line))),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read the next command line from a stream
///
/// Skips blank lines and comments. Returns `None` at end of stream.
pub fn read_command_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }

        return Ok(Some(trimmed.to_string()));
    }
}

/// Write a response line to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writeln!(writer, "{}", encode_response(response))?;
    writer.flush()?;
    Ok(())
}
