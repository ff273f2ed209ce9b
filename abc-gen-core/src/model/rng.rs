use rand::RngCore;

/// A source of values in `[0, 1)` used as list-index selectors.
///
/// The generator only ever asks for the next unit value, so any
/// deterministic stream (or a test double) can be injected.
pub trait UnitSource {
	/// Returns the next value in `[0, 1)`.
	fn next_unit(&mut self) -> f64;

	/// Picks an index in `0..len` as `floor(next_unit() * len)`.
	///
	/// Always consumes one value, even when `len` is 0 (then returns 0).
	fn next_index(&mut self, len: usize) -> usize {
		let unit = self.next_unit();
		(unit * len as f64).floor() as usize
	}
}

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const MODULUS: f64 = 4_294_967_296.0; // 2^32

/// 32-bit linear congruential generator.
///
/// `state = state * 1664525 + 1013904223 (mod 2^32)`, each draw yields
/// `state / 2^32`. The seed is a small structural integer (see
/// [`Lcg::for_generation`]), so identical inputs replay identical draws.
/// Not suitable for anything security related.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
	state: u32,
}

impl Lcg {
	pub fn new(seed: u32) -> Self {
		Self { state: seed }
	}

	/// Seed derived from one generation call: letter count plus theme
	/// length in UTF-16 code units.
	pub fn for_generation(letter_count: usize, theme: &str) -> Self {
		let theme_len = theme.encode_utf16().count();
		Self::new(letter_count.wrapping_add(theme_len) as u32)
	}

	/// Current internal state (the last emitted raw value).
	pub fn state(&self) -> u32 {
		self.state
	}

	fn step(&mut self) -> u32 {
		self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
		self.state
	}
}

impl UnitSource for Lcg {
	fn next_unit(&mut self) -> f64 {
		self.step() as f64 / MODULUS
	}
}

impl RngCore for Lcg {
	fn next_u32(&mut self) -> u32 {
		self.step()
	}

	fn next_u64(&mut self) -> u64 {
		let low = self.step() as u64;
		let high = self.step() as u64;
		(high << 32) | low
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		for chunk in dst.chunks_mut(4) {
			let bytes = self.step().to_le_bytes();
			chunk.copy_from_slice(&bytes[..chunk.len()]);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::Rng;

	#[test]
	fn test_known_sequence() {
		// 26 letters + "no theme"
		let mut rng = Lcg::for_generation(26, "no theme");
		assert_eq!(rng.state(), 34);
		assert_eq!(rng.next_u32(), 1_070_498_073);
		assert_eq!(rng.next_u32(), 1_556_903_844);
		assert_eq!(rng.next_u32(), 427_843_251);
		assert_eq!(rng.next_u32(), 3_978_957_942);
	}

	#[test]
	fn test_units_in_range() {
		let mut rng = Lcg::new(0);
		for _ in 0..10_000 {
			let unit = rng.next_unit();
			assert!((0.0..1.0).contains(&unit));
		}
	}

	#[test]
	fn test_reproducible() {
		let mut a = Lcg::for_generation(33, "космос");
		let mut b = Lcg::for_generation(33, "космос");
		let draws_a: Vec<usize> = (0..50).map(|_| a.next_index(3)).collect();
		let draws_b: Vec<usize> = (0..50).map(|_| b.next_index(3)).collect();
		assert_eq!(draws_a, draws_b);
	}

	#[test]
	fn test_theme_length_is_utf16() {
		// Cyrillic letters are one UTF-16 unit each, two UTF-8 bytes
		assert_eq!(Lcg::for_generation(33, "космос").state(), 39);
		// Astral characters count twice
		assert_eq!(Lcg::for_generation(0, "🚀").state(), 2);
	}

	#[test]
	fn test_drives_rand_api() {
		let mut rng = Lcg::new(7);
		let value: u8 = rng.random_range(0..10);
		assert!(value < 10);
	}
}
