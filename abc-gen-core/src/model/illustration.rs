use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::alphabet::Alphabet;
use super::composer::capitalize;
use super::generator::GenerationResult;

/// Image search endpoint, 384x384 thumbnails.
pub const IMAGE_ENDPOINT: &str = "https://source.unsplash.com/384x384/?";

/// Share of cards getting a second ("art") illustration.
pub const EXTRA_RATIO: f64 = 0.35;

/// Search text for one card: `"{Theme} {illustration word} {letter}"`.
pub fn illustration_query(theme: &str, alphabet: Alphabet, letter: char) -> String {
	format!("{} {} {}", capitalize(theme), alphabet.illustration_word(), letter)
}

/// Image URL for a search text (query percent-encoded).
pub fn illustration_url(query: &str) -> String {
	format!("{IMAGE_ENDPOINT}{}", urlencoding::encode(query))
}

/// Whether the card at `index` gets a second illustration.
///
/// Deterministic: one draw from a `StdRng` seeded with the theme length
/// (UTF-16 units) and the card index.
pub fn wants_extra(theme: &str, index: usize) -> bool {
	let seed = ((theme.encode_utf16().count() as u64) << 32) | index as u64;
	StdRng::seed_from_u64(seed).random_bool(EXTRA_RATIO)
}

/// Image lookup to perform for one card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IllustrationRequest {
	pub letter: char,
	pub query: String,
	pub url: String,
	/// Second, "art" flavoured lookup for some cards.
	pub extra_url: Option<String>,
}

/// One request per card of `result`, in card order.
pub fn plan(result: &GenerationResult, theme: &str, alphabet: Alphabet) -> Vec<IllustrationRequest> {
	result
		.entries()
		.iter()
		.enumerate()
		.map(|(index, entry)| {
			let query = illustration_query(theme, alphabet, entry.letter);
			let extra_url = wants_extra(theme, index).then(|| illustration_url(&format!("{query} art")));
			IllustrationRequest { letter: entry.letter, url: illustration_url(&query), query, extra_url }
		})
		.collect()
}
