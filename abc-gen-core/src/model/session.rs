use log::info;
use serde::{Deserialize, Serialize};

use super::alphabet::Alphabet;
use super::config::{Config, ModelTier, Tone, HARD_TONE_STATUS};
use super::detector::detect;
use super::generator::{GenerationResult, Generator, Policy};

/// Output of one submitted theme.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Generation {
	/// Theme actually used (trimmed, or the alphabet's default).
	pub theme: String,
	/// Snapshot the result was generated with.
	pub config: Config,
	pub result: GenerationResult,
}

/// Owner of the live mode state and the last result.
///
/// This is the single mutable cell the front end talks to. Selection
/// methods swap in a new [`Config`] snapshot; `submit` hands a copy of the
/// current snapshot to the [`Generator`] and keeps the result for export
/// and speech.
#[derive(Debug, Default)]
pub struct Session {
	config: Config,
	generator: Generator,
	last: Option<Generation>,
}

impl Session {
	pub fn new(generator: Generator) -> Self {
		Self { config: Config::default(), generator, last: None }
	}

	pub fn config(&self) -> Config {
		self.config
	}

	pub fn last(&self) -> Option<&Generation> {
		self.last.as_ref()
	}

	/// Trimmed `raw`, or the current alphabet's default theme if blank.
	pub fn resolve_theme(&self, raw: &str) -> String {
		match raw.trim() {
			"" => self.config.alphabet.default_theme().to_owned(),
			theme => theme.to_owned(),
		}
	}

	/// Generates an alphabet for `raw` and stores it as the last result.
	///
	/// The alphabet detected from the theme replaces the selected one when
	/// they differ, silently.
	pub fn submit(&mut self, raw: &str, policy: Policy) -> &Generation {
		let theme = self.resolve_theme(raw);
		let detected = detect(&theme, self.config.alphabet);
		if detected != self.config.alphabet {
			info!("Switching alphabet {} -> {} for theme {:?}", self.config.alphabet, detected, theme);
			self.config = self.config.with_alphabet(detected);
		}

		let config = self.config;
		let result = self.generator.generate(&theme, &config, policy);
		self.last.insert(Generation { theme, config, result })
	}

	pub fn select_alphabet(&mut self, alphabet: Alphabet) {
		self.config = self.config.with_alphabet(alphabet);
	}

	/// Returns the tier's status line.
	pub fn select_model(&mut self, model: ModelTier) -> &'static str {
		self.config = self.config.with_model(model);
		model.description()
	}

	/// Returns a status line when the hard tone forced the tier up.
	pub fn select_tone(&mut self, tone: Tone) -> Option<&'static str> {
		self.config = self.config.with_tone(tone);
		(tone == Tone::Hard).then_some(HARD_TONE_STATUS)
	}

	/// Newline-joined lines of the last result, `None` before any generation.
	pub fn export_text(&self) -> Option<String> {
		self.last.as_ref().map(|generation| generation.result.to_text())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_detection_switches_alphabet() {
		let mut session = Session::default();
		session.select_alphabet(Alphabet::Latin);

		let generation = session.submit("космос", Policy::Seeded);
		assert_eq!(generation.config.alphabet, Alphabet::Cyrillic);
		assert_eq!(generation.result.len(), 33);
		assert_eq!(session.config().alphabet, Alphabet::Cyrillic);
	}

	#[test]
	fn test_empty_theme_uses_default() {
		let mut session = Session::default();
		session.select_alphabet(Alphabet::Latin);

		let generation = session.submit("   ", Policy::Positional);
		assert_eq!(generation.theme, "no theme");
		assert_eq!(generation.result.entries()[0].line, "A — No theme: astral beacons");
		assert_eq!(generation.result.entries()[25].letter, 'Z');
	}

	#[test]
	fn test_empty_theme_keeps_cyrillic() {
		let mut session = Session::default();
		let generation = session.submit("", Policy::Seeded);
		assert_eq!(generation.theme, "без темы");
		assert_eq!(generation.config.alphabet, Alphabet::Cyrillic);
	}

	#[test]
	fn test_no_letters_keeps_selection() {
		let mut session = Session::default();
		session.select_alphabet(Alphabet::Latin);
		let generation = session.submit("2077", Policy::Seeded);
		assert_eq!(generation.config.alphabet, Alphabet::Latin);
		assert!(generation.result.entries()[0].line.starts_with("A — 2077: "));
	}

	#[test]
	fn test_hard_tone_scenario() {
		let mut session = Session::default();
		assert_eq!(session.config().model, ModelTier::V1_0);

		assert_eq!(session.select_tone(Tone::Hard), Some(HARD_TONE_STATUS));
		assert_eq!(session.config().tone, Tone::Hard);
		assert_eq!(session.config().model, ModelTier::V2_0);

		assert_eq!(session.select_model(ModelTier::V2_5), "Модель 2.5 (фото+текст+озвучка)");
		assert_eq!(session.select_tone(Tone::Soft), None);
		assert_eq!(session.config().model, ModelTier::V2_5);
	}

	#[test]
	fn test_snapshot_is_not_affected_by_later_changes() {
		let mut session = Session::default();
		let before = session.submit("море", Policy::Seeded).clone();
		session.select_tone(Tone::Hard);

		let last = session.last().unwrap();
		assert_eq!(last.config.tone, Tone::Soft);
		assert_eq!(last, &before);
	}

	#[test]
	fn test_export_replaces_wholesale() {
		let mut session = Session::default();
		assert_eq!(session.export_text(), None);

		session.submit("sea", Policy::Positional);
		let first = session.export_text().unwrap();
		assert_eq!(first.lines().count(), 26);

		session.submit("море", Policy::Positional);
		let second = session.export_text().unwrap();
		assert_eq!(second.lines().count(), 33);
		assert!(second.starts_with("А — Море: астероиды"));
	}
}
