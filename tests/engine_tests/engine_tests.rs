//! Tests for Session
//!
//! These tests verify:
//! - Backend selection from config
//! - Command execution and responses
//! - Capacity errors surfacing through the session
//! - Script execution from memory and from files
//! - Concurrent readers alongside a writer

use std::io::{BufReader, Cursor, Write};
use std::sync::Arc;
use std::thread;

use ordtable::config::{Backend, Config, GrowthPolicy};
use ordtable::engine::Session;
use ordtable::protocol::{Command, Response, Status};
use ordtable::TableError;
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

fn session(backend: Backend) -> Session {
    let config = Config::builder()
        .backend(backend)
        .capacity(4)
        .growth(GrowthPolicy::Double)
        .build();
    Session::open(config).unwrap()
}

fn run(session: &Session, script: &str) -> String {
    let mut out = Vec::new();
    session.run_script(&mut Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_rejects_zero_capacity() {
    let config = Config::builder().capacity(0).build();
    assert!(matches!(Session::open(config), Err(TableError::Config(_))));
}

#[test]
fn test_backend_selects_dump_format() {
    let array = session(Backend::SortedArray);
    let tree = session(Backend::Bst);

    for s in [&array, &tree] {
        s.put("b", "2").unwrap();
        s.put("a", "1").unwrap();
    }

    assert_eq!(array.dump(), "{[a,1][b,2]}");
    assert_eq!(tree.dump(), "b[2]a[1]");
    assert_eq!(tree.config().backend, Backend::Bst);
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_put_get_delete() {
    for backend in [Backend::Bst, Backend::SortedArray] {
        let s = session(backend);

        let put = Command::Put {
            key: "hello".to_string(),
            value: "world".to_string(),
        };
        assert_eq!(s.execute(put).unwrap(), Response::ok(None));

        let get = Command::Get {
            key: "hello".to_string(),
        };
        assert_eq!(s.execute(get.clone()).unwrap(), Response::value("world"));

        let delete = Command::Delete {
            key: "hello".to_string(),
        };
        assert_eq!(s.execute(delete).unwrap(), Response::ok(None));
        assert_eq!(s.execute(get).unwrap().status, Status::NotFound);
        assert!(s.is_empty());
    }
}

#[test]
fn test_execute_ordered_queries() {
    for backend in [Backend::Bst, Backend::SortedArray] {
        let s = session(backend);
        let exec = |command| s.execute(command).unwrap();
        assert_eq!(exec(Command::Min), Response::not_found());
        assert_eq!(exec(Command::Keys), Response::value(""));

        for key in ["m", "c", "x", "a"] {
            s.put(key, key.to_uppercase()).unwrap();
        }

        let rank = Command::Rank {
            key: "d".to_string(),
        };
        assert_eq!(exec(Command::Min), Response::value("a"));
        assert_eq!(exec(Command::Max), Response::value("x"));
        assert_eq!(exec(Command::Size), Response::value("4"));
        assert_eq!(exec(Command::IsEmpty), Response::value("false"));
        assert_eq!(exec(rank), Response::value("2"));
        assert_eq!(exec(Command::Select { rank: 2 }), Response::value("m"));
        assert_eq!(exec(Command::Select { rank: 9 }), Response::not_found());
        assert_eq!(exec(Command::Keys), Response::value("a c m x"));
        assert_eq!(exec(Command::Ping), Response::value("PONG"));
    }
}

#[test]
fn test_fixed_capacity_error_surfaces() {
    let config = Config::builder()
        .backend(Backend::SortedArray)
        .capacity(1)
        .build();
    let s = Session::open(config).unwrap();

    s.put("a", "1").unwrap();
    let err = s.put("b", "2").unwrap_err();
    assert!(matches!(err, TableError::CapacityExceeded { capacity: 1 }));
    assert_eq!(s.size(), 1);
}

// =============================================================================
// Script Tests
// =============================================================================

#[test]
fn test_run_script() {
    let s = session(Backend::Bst);
    let output = run(
        &s,
        "# setup\nPUT b 1\nPUT a 2\nput c 3\n\nGET a\nGET z\nSIZE\nDEL b\nKEYS\nDUMP\n",
    );

    assert_eq!(
        output,
        "OK\nOK\nOK\nVALUE 2\nNOT_FOUND\nVALUE 3\nOK\nVALUE a c\nVALUE c[3]a[2]\n"
    );
}

#[test]
fn test_run_script_continues_after_errors() {
    let config = Config::builder()
        .backend(Backend::SortedArray)
        .capacity(1)
        .build();
    let s = Session::open(config).unwrap();

    let mut script = Cursor::new("PUT a 1\nPUT b 2\nBOGUS\nGET a\n");
    let mut out = Vec::new();
    let count = s.run_script(&mut script, &mut out).unwrap();

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(count, 4);
    assert_eq!(lines[0], "OK");
    assert!(lines[1].starts_with("ERR Capacity exceeded"));
    assert!(lines[2].starts_with("ERR Protocol error"));
    assert_eq!(lines[3], "VALUE 1");
}

#[test]
fn test_run_script_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "PUT key_1 10").unwrap();
    writeln!(file, "PUT key_0 20").unwrap();
    writeln!(file, "MIN").unwrap();
    file.flush().unwrap();

    let s = session(Backend::SortedArray);
    let mut reader = BufReader::new(file.reopen().unwrap());
    let mut out = Vec::new();
    s.run_script(&mut reader, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "OK\nOK\nVALUE key_0\n");
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_readers_with_writer() {
    let s = Arc::new(session(Backend::Bst));
    for i in 0..50 {
        s.put(format!("key_{:03}", i), i.to_string()).unwrap();
    }

    let writer = {
        let s = Arc::clone(&s);
        thread::spawn(move || {
            for i in 50..100 {
                s.put(format!("key_{:03}", i), i.to_string()).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let s = Arc::clone(&s);
            thread::spawn(move || {
                for i in 0..50 {
                    assert_eq!(s.get(&format!("key_{:03}", i)), Some(i.to_string()));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(s.size(), 100);
}

#[test]
fn test_concurrent_execute_writes_and_reads() {
    let s = Arc::new(session(Backend::SortedArray));

    let workers: Vec<_> = (0..4)
        .map(|t| {
            let s = Arc::clone(&s);
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("t{}_{:02}", t, i);
                    let put = Command::Put {
                        key: key.clone(),
                        value: i.to_string(),
                    };
                    assert_eq!(s.execute(put).unwrap(), Response::ok(None));

                    let get = Command::Get { key };
                    assert_eq!(s.execute(get).unwrap(), Response::value(i.to_string()));
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(s.execute(Command::Size).unwrap(), Response::value("100"));
    for t in 0..4 {
        let delete = Command::Delete {
            key: format!("t{}_00", t),
        };
        s.execute(delete).unwrap();
    }
    assert_eq!(s.size(), 96);
    assert_eq!(s.execute(Command::Min).unwrap(), Response::value("t0_01"));
}
