use serde::{Deserialize, Serialize};

use super::alphabet::Alphabet;
use super::generator::Entry;

/// Text handed to the speech engine for one card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Utterance {
	pub letter: char,
	pub text: String,
	/// BCP 47 tag, `ru-RU` or `en-US`.
	pub lang: String,
}

impl Utterance {
	pub fn new(entry: &Entry, alphabet: Alphabet) -> Self {
		Self { letter: entry.letter, text: entry.line.clone(), lang: alphabet.speech_language().to_owned() }
	}
}

/// Tracks the single utterance allowed to play at a time.
///
/// Starting a card interrupts whatever was playing.
#[derive(Debug, Default)]
pub struct SpeechDesk {
	active: Option<Utterance>,
}

impl SpeechDesk {
	pub fn active(&self) -> Option<&Utterance> {
		self.active.as_ref()
	}

	/// Makes `utterance` the active one and returns the interrupted one.
	pub fn play(&mut self, utterance: Utterance) -> Option<Utterance> {
		self.active.replace(utterance)
	}

	/// Stops playback, returning what was playing.
	pub fn stop(&mut self) -> Option<Utterance> {
		self.active.take()
	}
}
