use super::alphabet::Alphabet;

fn is_cyrillic(c: char) -> bool {
	c.to_lowercase().any(|lower| matches!(lower, 'а'..='я' | 'ё'))
}

/// Infers the alphabet a theme is written in.
///
/// Presence based, Cyrillic checked first:
/// - any Cyrillic letter → `Cyrillic` (even if Latin letters dominate)
/// - else any ASCII Latin letter → `Latin`
/// - else `current`, unchanged
pub fn detect(text: &str, current: Alphabet) -> Alphabet {
	if text.chars().any(is_cyrillic) {
		Alphabet::Cyrillic
	} else if text.chars().any(|c| c.is_ascii_alphabetic()) {
		Alphabet::Latin
	} else {
		current
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cyrillic() {
		assert_eq!(detect("космос", Alphabet::Latin), Alphabet::Cyrillic);
		assert_eq!(detect("ЁЛКА", Alphabet::Latin), Alphabet::Cyrillic);
	}

	#[test]
	fn test_latin() {
		assert_eq!(detect("Space Opera", Alphabet::Cyrillic), Alphabet::Latin);
	}

	#[test]
	fn test_mixed_prefers_cyrillic() {
		assert_eq!(detect("cyberpunk cuisine и", Alphabet::Latin), Alphabet::Cyrillic);
	}

	#[test]
	fn test_no_letters_keeps_current() {
		assert_eq!(detect("1234 !?", Alphabet::Latin), Alphabet::Latin);
		assert_eq!(detect("", Alphabet::Cyrillic), Alphabet::Cyrillic);
		// Non-Russian scripts are not inferred either
		assert_eq!(detect("Ωμέγα", Alphabet::Latin), Alphabet::Latin);
	}
}
