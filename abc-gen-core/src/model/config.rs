use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use super::alphabet::Alphabet;

/// Style modifier selecting the adjective set used in seeded mode.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
	#[default]
	Soft,
	Hard,
}

impl FromStr for Tone {
	type Err = GenError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"soft" => Ok(Self::Soft),
			"hard" => Ok(Self::Hard),
			_ => Err(GenError::UnknownTone(s.to_owned())),
		}
	}
}

/// Feature level of a generation.
///
/// - `V1_0`: text only
/// - `V2_0`: text + illustrations
/// - `V2_5`: text + illustrations + speech
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ModelTier {
	#[default]
	#[serde(rename = "1.0")]
	V1_0,
	#[serde(rename = "2.0")]
	V2_0,
	#[serde(rename = "2.5")]
	V2_5,
}

impl ModelTier {
	pub fn code(&self) -> &'static str {
		match self {
			Self::V1_0 => "1.0",
			Self::V2_0 => "2.0",
			Self::V2_5 => "2.5",
		}
	}

	pub fn includes_images(&self) -> bool {
		*self >= Self::V2_0
	}

	pub fn includes_speech(&self) -> bool {
		*self == Self::V2_5
	}

	/// Status line shown when the tier is selected.
	pub fn description(&self) -> &'static str {
		match self {
			Self::V1_0 => "Модель 1.0 (только текст)",
			Self::V2_0 => "Модель 2.0 (фото+текст)",
			Self::V2_5 => "Модель 2.5 (фото+текст+озвучка)",
		}
	}
}

impl fmt::Display for ModelTier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl FromStr for ModelTier {
	type Err = GenError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"1.0" | "1" => Ok(Self::V1_0),
			"2.0" | "2" => Ok(Self::V2_0),
			"2.5" => Ok(Self::V2_5),
			_ => Err(GenError::UnknownModelTier(s.to_owned())),
		}
	}
}

/// Status line shown after a hard tone forced the tier up.
pub const HARD_TONE_STATUS: &str = "Жесткий стиль: фото включены (2.0).";

/// Snapshot of the mode state: (alphabet, model tier, tone).
///
/// `Config` is an immutable value. Every user action produces a new
/// snapshot through one of the transition functions below; the generator
/// only ever reads a snapshot it was handed.
///
/// # Invariants
/// - `tone == Hard` right after `with_tone(Hard)` implies `model == V2_0`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Config {
	pub alphabet: Alphabet,
	pub model: ModelTier,
	pub tone: Tone,
}

impl Config {
	/// Sets the alphabet. No other field changes.
	pub fn with_alphabet(self, alphabet: Alphabet) -> Self {
		Self { alphabet, ..self }
	}

	/// Sets the model tier. No other field changes.
	pub fn with_model(self, model: ModelTier) -> Self {
		Self { model, ..self }
	}

	/// Sets the tone.
	///
	/// Selecting `Hard` also forces the model tier to 2.0, whatever it was
	/// before (including 2.5). Selecting `Soft` leaves the tier alone.
	pub fn with_tone(self, tone: Tone) -> Self {
		match tone {
			Tone::Hard => Self { tone, model: ModelTier::V2_0, ..self },
			Tone::Soft => Self { tone, ..self },
		}
	}
}

/// Status line shown once a generation is rendered.
///
/// Example: `Готово: 33 букв + фото + озвучка`
pub fn ready_status(count: usize, model: ModelTier) -> String {
	let mut status = format!("Готово: {count} букв");
	if model.includes_images() {
		status.push_str(" + фото");
	}
	if model.includes_speech() {
		status.push_str(" + озвучка");
	}
	status
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = Config::default();
		assert_eq!(config.alphabet, Alphabet::Cyrillic);
		assert_eq!(config.model, ModelTier::V1_0);
		assert_eq!(config.tone, Tone::Soft);
	}

	#[test]
	fn test_hard_tone_forces_tier() {
		let config = Config::default().with_tone(Tone::Hard);
		assert_eq!(config.tone, Tone::Hard);
		assert_eq!(config.model, ModelTier::V2_0);

		// Overrides a higher tier too
		let config = Config::default().with_model(ModelTier::V2_5).with_tone(Tone::Hard);
		assert_eq!(config.model, ModelTier::V2_0);
	}

	#[test]
	fn test_soft_tone_keeps_tier() {
		let config = Config::default().with_model(ModelTier::V2_5).with_tone(Tone::Soft);
		assert_eq!(config.model, ModelTier::V2_5);
		assert_eq!(config.tone, Tone::Soft);
	}

	#[test]
	fn test_independent_selections() {
		let config = Config::default()
			.with_tone(Tone::Hard)
			.with_model(ModelTier::V2_5)
			.with_alphabet(Alphabet::Latin);
		assert_eq!(config, Config { alphabet: Alphabet::Latin, model: ModelTier::V2_5, tone: Tone::Hard });
	}

	#[test]
	fn test_parse_tier_and_tone() {
		assert_eq!("2.5".parse::<ModelTier>().unwrap(), ModelTier::V2_5);
		assert_eq!("HARD".parse::<Tone>().unwrap(), Tone::Hard);
		assert!("3.0".parse::<ModelTier>().is_err());
		assert!("loud".parse::<Tone>().is_err());
	}

	#[test]
	fn test_ready_status() {
		assert_eq!(ready_status(26, ModelTier::V1_0), "Готово: 26 букв");
		assert_eq!(ready_status(26, ModelTier::V2_0), "Готово: 26 букв + фото");
		assert_eq!(ready_status(33, ModelTier::V2_5), "Готово: 33 букв + фото + озвучка");
	}
}
