//! Protocol Module
//!
//! Defines the line protocol used to drive a table session from scripts
//! and the command line.
//!
//! ## Commands
//! - `PUT key value`  insert or overwrite
//! - `GET key`        lookup
//! - `DEL key`        delete (no-op when absent)
//! - `SIZE`, `EMPTY`  size queries
//! - `MIN`, `MAX`     smallest / largest key
//! - `RANK key`       number of smaller keys
//! - `SELECT n`       key of rank n
//! - `KEYS`           all keys in order
//! - `DUMP`           diagnostic layout dump
//! - `PING`           health check
//!
//! ## Responses
//! - `OK`                  write succeeded
//! - `VALUE payload`       query result
//! - `NOT_FOUND`           key or rank absent
//! - `ERR message`         malformed command or failed write

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{
    decode_command, decode_response, encode_command, encode_response, read_command_line,
    write_response, COMMENT_PREFIX,
};
