use std::env;
use std::path::PathBuf;

/// Environment variable holding the bind address.
pub const ADDR_VAR: &str = "ABC_GEN_ADDR";
/// Environment variable holding the bank data directory.
pub const DATA_VAR: &str = "ABC_GEN_DATA";

const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATA: &str = "./data";

/// Server settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	/// `host:port` to bind.
	pub addr: String,
	/// Folder scanned for `ru.dat` / `en.dat` bank files.
	pub data_dir: PathBuf,
	/// Max illustration lookups in flight.
	pub image_workers: usize,
}

impl Default for Settings {
	fn default() -> Self {
		Self { addr: DEFAULT_ADDR.to_owned(), data_dir: PathBuf::from(DEFAULT_DATA), image_workers: 4 }
	}
}

impl Settings {
	pub fn from_env() -> Self {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Builds settings from any key lookup; blank values fall back to defaults.
	pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
		let value = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
		let defaults = Self::default();
		Self {
			addr: value(ADDR_VAR).unwrap_or(defaults.addr),
			data_dir: value(DATA_VAR).map(PathBuf::from).unwrap_or(defaults.data_dir),
			image_workers: defaults.image_workers,
		}
	}
}
