use thiserror::Error;

use crate::model::alphabet::Alphabet;

/// Errors raised while parsing mode codes or loading letter banks.
///
/// Generation itself never fails; these only come from the edges
/// (user-supplied codes, bank files on disk).
#[derive(Debug, Error)]
pub enum GenError {
	/// Alphabet code other than `ru` / `en`
	#[error("Unknown alphabet: {0}")]
	UnknownAlphabet(String),

	/// Model tier other than `1.0` / `2.0` / `2.5`
	#[error("Unknown model tier: {0}")]
	UnknownModelTier(String),

	/// Tone other than `soft` / `hard`
	#[error("Unknown tone: {0}")]
	UnknownTone(String),

	/// A bank file line could not be parsed
	#[error("Bank format error at line {line}: {reason}")]
	BankFormat { line: usize, reason: String },

	/// A bank entry has no usable fragment
	#[error("Empty bank entry for '{letter}' ({alphabet})")]
	EmptyEntry { alphabet: Alphabet, letter: String },

	/// A bank has no wildcard list
	#[error("Missing wildcard entry ({0})")]
	MissingWildcard(Alphabet),

	/// File system failure
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Bank cache (de)serialization failure
	#[error("Bank cache error: {0}")]
	Cache(#[from] postcard::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, GenError>;
