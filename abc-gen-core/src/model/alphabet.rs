use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use super::config::Tone;

const CYRILLIC_LETTERS: [char; 33] = [
	'А', 'Б', 'В', 'Г', 'Д', 'Е', 'Ё', 'Ж', 'З', 'И', 'Й', 'К', 'Л', 'М', 'Н', 'О', 'П',
	'Р', 'С', 'Т', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ъ', 'Ы', 'Ь', 'Э', 'Ю', 'Я',
];

const LATIN_LETTERS: [char; 26] = [
	'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
	'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// One of the two letter sequences the generator iterates over.
///
/// Each variant owns a fixed, ordered letter sequence and the
/// locale-specific strings that travel with it (default theme,
/// illustration word, speech tag, tone adjectives).
///
/// On the wire an alphabet is written by its short code: `ru` or `en`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Alphabet {
	#[default]
	#[serde(rename = "ru")]
	Cyrillic,
	#[serde(rename = "en")]
	Latin,
}

impl Alphabet {
	/// Both alphabets, Cyrillic first.
	pub const ALL: [Alphabet; 2] = [Alphabet::Cyrillic, Alphabet::Latin];

	/// Ordered letters of the alphabet (upper case).
	pub fn letters(&self) -> &'static [char] {
		match self {
			Self::Cyrillic => &CYRILLIC_LETTERS,
			Self::Latin => &LATIN_LETTERS,
		}
	}

	/// Short code used on the wire and in bank file names.
	pub fn code(&self) -> &'static str {
		match self {
			Self::Cyrillic => "ru",
			Self::Latin => "en",
		}
	}

	/// Placeholder theme used when the user submits nothing.
	pub fn default_theme(&self) -> &'static str {
		match self {
			Self::Cyrillic => "без темы",
			Self::Latin => "no theme",
		}
	}

	/// Word inserted into image search queries.
	pub fn illustration_word(&self) -> &'static str {
		match self {
			Self::Cyrillic => "иллюстрация",
			Self::Latin => "illustration",
		}
	}

	/// Language tag handed to the speech engine.
	pub fn speech_language(&self) -> &'static str {
		match self {
			Self::Cyrillic => "ru-RU",
			Self::Latin => "en-US",
		}
	}

	/// Adjective set drawn from in seeded mode.
	pub fn tone_adjectives(&self, tone: Tone) -> &'static [&'static str; 3] {
		match (self, tone) {
			(Self::Cyrillic, Tone::Soft) => &["аккуратно", "вежливо", "культурно"],
			(Self::Cyrillic, Tone::Hard) => &["жёстко", "дерзко", "без фильтра"],
			(Self::Latin, Tone::Soft) => &["polite", "subtle", "clean"],
			(Self::Latin, Tone::Hard) => &["bold", "gritty", "uncut"],
		}
	}

	/// Whether `letter` belongs to this alphabet (upper case only).
	pub fn contains(&self, letter: char) -> bool {
		self.letters().contains(&letter)
	}
}

impl fmt::Display for Alphabet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl FromStr for Alphabet {
	type Err = GenError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"ru" => Ok(Self::Cyrillic),
			"en" => Ok(Self::Latin),
			_ => Err(GenError::UnknownAlphabet(s.to_owned())),
		}
	}
}
