#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone};
use rconverter::db::MemoryStore;
use rconverter::models::{ConversionEntry, Direction};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rcv() -> Command {
    cargo_bin_cmd!("rconverter")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rconverter.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh, empty directory inside the temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rconverter_out", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Initialize a DB through the CLI (schema + migrations)
pub fn init_db(db_path: &str) {
    rcv()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Local timestamp at a fixed, DST-safe hour
pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid local time")
}

pub fn entry(
    ts: DateTime<Local>,
    from: f64,
    to: f64,
    direction: Direction,
    rate: Option<f64>,
) -> ConversionEntry {
    ConversionEntry::new(ts, from, to, direction, rate)
}

pub fn memory() -> MemoryStore {
    MemoryStore::new()
}
