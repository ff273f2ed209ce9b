use log::debug;
use serde::{Deserialize, Serialize};

use super::alphabet::Alphabet;
use super::composer::compose;
use super::config::Config;
use super::letter_bank::LetterBank;
use super::rng::{Lcg, UnitSource};

/// How a fragment is chosen for each letter.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
	/// Fragment `i mod len` for the i-th letter, no adjective, no RNG.
	Positional,
	/// Fragment and tone adjective drawn from an [`Lcg`] seeded by the call.
	#[default]
	Seeded,
}

/// One card: a letter and its composed line.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
	pub letter: char,
	pub line: String,
}

/// Ordered output of one generation, one entry per letter of the alphabet.
///
/// Produced fresh by every call and never patched afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct GenerationResult {
	entries: Vec<Entry>,
}

impl GenerationResult {
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, letter: char) -> Option<&Entry> {
		self.entries.iter().find(|entry| entry.letter == letter)
	}

	/// Lines joined with `\n`, as used by export and clipboard copy.
	pub fn to_text(&self) -> String {
		self.entries.iter().map(|entry| entry.line.as_str()).collect::<Vec<_>>().join("\n")
	}
}

impl FromIterator<Entry> for GenerationResult {
	fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
		Self { entries: iter.into_iter().collect() }
	}
}

/// Phrase generation engine.
///
/// Stateless apart from its letter bank: every call reads the
/// configuration snapshot it is given and returns a new result.
/// No I/O, cannot fail.
#[derive(Clone, Debug, Default)]
pub struct Generator {
	bank: LetterBank,
}

impl Generator {
	pub fn new(bank: LetterBank) -> Self {
		Self { bank }
	}

	pub fn bank(&self) -> &LetterBank {
		&self.bank
	}

	/// Generates one line per letter of `config.alphabet` with `policy`.
	///
	/// `theme` is used as given; substituting a default for an empty input
	/// is the caller's job.
	pub fn generate(&self, theme: &str, config: &Config, policy: Policy) -> GenerationResult {
		debug!("Generating {:?} alphabet ({}) for theme {:?}", policy, config.alphabet, theme);
		match policy {
			Policy::Positional => self.positional(theme, config.alphabet),
			Policy::Seeded => {
				let mut rng = Lcg::for_generation(config.alphabet.letters().len(), theme);
				self.seeded(theme, config, &mut rng)
			}
		}
	}

	/// Positional policy: fragment `i mod len` for the i-th letter.
	pub fn positional(&self, theme: &str, alphabet: Alphabet) -> GenerationResult {
		alphabet
			.letters()
			.iter()
			.enumerate()
			.map(|(i, &letter)| {
				let fragments = self.bank.lookup(alphabet, letter);
				let fragment = fragments
					.get(i % fragments.len().max(1))
					.map(String::as_str)
					.unwrap_or(theme);
				Entry { letter, line: compose(letter, theme, fragment, None) }
			})
			.collect()
	}

	/// Seeded policy: per letter, one draw picks the fragment and a second
	/// draw picks the tone adjective.
	///
	/// An out-of-range fragment index falls back to `theme` itself.
	pub fn seeded<R: UnitSource>(&self, theme: &str, config: &Config, rng: &mut R) -> GenerationResult {
		let alphabet = config.alphabet;
		let adjectives = alphabet.tone_adjectives(config.tone);

		alphabet
			.letters()
			.iter()
			.map(|&letter| {
				let fragments = self.bank.lookup(alphabet, letter);
				let fragment = fragments
					.get(rng.next_index(fragments.len()))
					.map(String::as_str)
					.unwrap_or(theme);
				let adjective = adjectives.get(rng.next_index(adjectives.len())).copied();
				Entry { letter, line: compose(letter, theme, fragment, adjective) }
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::config::{ModelTier, Tone};

	/// Always returns the same unit value.
	struct Fixed(f64);

	impl UnitSource for Fixed {
		fn next_unit(&mut self) -> f64 {
			self.0
		}
	}

	fn latin() -> Config {
		Config::default().with_alphabet(Alphabet::Latin)
	}

	#[test]
	fn test_positional_scenario() {
		let result = Generator::default().positional("no theme", Alphabet::Latin);
		assert_eq!(result.len(), 26);
		assert_eq!(result.entries()[0], Entry { letter: 'A', line: "A — No theme: astral beacons".to_owned() });
		// Z is the 26th letter, 2 fragments: 25 mod 2 = 1
		assert_eq!(result.entries()[25].line, "Z — No theme: zenith towers");
	}

	#[test]
	fn test_positional_is_deterministic() {
		let generator = Generator::default();
		let config = Config::default();
		assert_eq!(
			generator.generate("космос", &config, Policy::Positional),
			generator.generate("космос", &config, Policy::Positional)
		);
	}

	#[test]
	fn test_seeded_known_lines() {
		let result = Generator::default().generate("no theme", &latin(), Policy::Seeded);
		assert_eq!(result.entries()[0].line, "A — No theme: astral beacons • subtle");
		assert_eq!(result.entries()[1].line, "B — No theme: bastions • clean");
		assert_eq!(result.entries()[2].line, "C — No theme: celestial charts • polite");

		let result = Generator::default().generate("космос", &Config::default(), Policy::Seeded);
		assert_eq!(result.entries()[0].line, "А — Космос: астероиды • культурно");
		assert_eq!(result.entries()[1].line, "Б — Космос: барды • аккуратно");
	}

	#[test]
	fn test_hard_tone_uses_hard_adjectives() {
		let config = latin().with_tone(Tone::Hard);
		let result = Generator::default().generate("no theme", &config, Policy::Seeded);
		assert_eq!(result.entries()[0].line, "A — No theme: astral beacons • gritty");
	}

	#[test]
	fn test_seeded_is_reproducible() {
		let generator = Generator::default();
		let config = latin().with_model(ModelTier::V2_5);
		let first = generator.generate("dark fantasy", &config, Policy::Seeded);
		let second = generator.generate("dark fantasy", &config, Policy::Seeded);
		assert_eq!(first, second);
	}

	#[test]
	fn test_result_length_matches_alphabet() {
		let generator = Generator::default();
		for alphabet in Alphabet::ALL {
			let config = Config::default().with_alphabet(alphabet);
			for policy in [Policy::Positional, Policy::Seeded] {
				let result = generator.generate("x", &config, policy);
				assert_eq!(result.len(), alphabet.letters().len());
				let letters: Vec<char> = result.entries().iter().map(|e| e.letter).collect();
				assert_eq!(letters, alphabet.letters());
			}
		}
	}

	#[test]
	fn test_out_of_range_falls_back_to_theme() {
		// A unit of 1.0 breaks the [0, 1) contract and indexes one past the end
		let result = Generator::default().seeded("глубины", &Config::default(), &mut Fixed(1.0));
		assert!(result.entries().iter().all(|e| e.line.starts_with(&format!("{} — Глубины: глубины", e.letter))));
	}

	#[test]
	fn test_to_text() {
		let result = Generator::default().positional("sea", Alphabet::Latin);
		let text = result.to_text();
		assert_eq!(text.lines().count(), 26);
		assert!(text.starts_with("A — Sea: astral beacons\nB — Sea: blacksmiths"));
	}
}
