/// Trims `theme` and upper-cases its first character.
///
/// The rest of the string is left untouched. An empty (or whitespace only)
/// theme yields an empty string.
pub fn capitalize(theme: &str) -> String {
	let mut chars = theme.trim().chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Builds one display line.
///
/// - `compose('A', "space", "astral beacons", None)` → `A — Space: astral beacons`
/// - with `Some("bold")` → `A — Space: astral beacons • bold`
pub fn compose(letter: char, theme: &str, fragment: &str, adjective: Option<&str>) -> String {
	let theme = capitalize(theme);
	match adjective {
		Some(adjective) => format!("{letter} — {theme}: {fragment} • {adjective}"),
		None => format!("{letter} — {theme}: {fragment}"),
	}
}
