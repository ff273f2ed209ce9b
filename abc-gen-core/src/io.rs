use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::io;

/// Reads a bank file and returns all its lines.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Strips a leading UTF-8 byte order mark
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds a sibling path with another extension.
///
/// Example:
/// `data/en.dat` + `"bin"` → `data/en.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_output_path() {
		let output = build_output_path("data/en.dat", "bin").unwrap();
		assert_eq!(output, PathBuf::from("data/en.bin"));
		assert!(build_output_path("", "bin").is_err());
	}

	#[test]
	fn test_read_file_strips_bom() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("ru.dat");
		std::fs::write(&path, "\u{feff}А: арбузы\r\n*: всё\n").unwrap();
		assert_eq!(read_file(&path).unwrap(), vec!["А: арбузы", "*: всё"]);
	}
}
