use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::io::{build_output_path, read_file};
use super::alphabet::Alphabet;

/// Key used for the wildcard list in bank files.
pub const WILDCARD: &str = "*";

const BUILTIN_RU: &[(char, &[&str])] = &[
	('А', &["астероиды", "артефакты", "алхимия"]),
	('Б', &["баллисты", "барды", "бейджи пилотов"]),
	('В', &["варпы", "врата", "выстрел плазмой"]),
	('Г', &["гравитация", "гобелены", "гагаринский дух"]),
	('Д', &["дроны", "доспехи", "двигатели"]),
	('Е', &["единороги (кибер)", "экзоскелеты"]),
	('Ё', &["ёлки на Марсе"]),
	('Ж', &["жезлы", "журналы бортовые"]),
	('З', &["звёзды", "зелья", "зиккураты"]),
	('И', &["искры гипера", "инквизиция лора"]),
	('Й', &["йод в аптечке корабля"]),
	('К', &["квинты квестов", "космопорты", "катапульты"]),
	('Л', &["лучи", "летописи", "линейные крейсеры"]),
	('М', &["магия", "модули", "метеоры"]),
	('Н', &["нейтрино", "некроманты", "навигаторы"]),
	('О', &["обсерватории", "оккультизм", "орбитальные кольца"]),
	('П', &["порталы", "планерки команды", "повозки"]),
	('Р', &["радар", "руны", "рынки дроидов"]),
	('С', &["сабли света", "снаряжение", "стражи"]),
	('Т', &["транспорт", "тролли мостов", "тёмная материя"]),
	('У', &["ускорители", "умбра магии"]),
	('Ф', &["фрегаты", "филактерии"]),
	('Х', &["хрономантия", "хабы связи"]),
	('Ц', &["цитадели", "циклотрон"]),
	('Ч', &["чертоги", "червоточины"]),
	('Ш', &["шлюзы", "шаманы"]),
	('Щ', &["щиты фазовые"]),
	('Ъ', &["твёрдый знак — твёрдая броня"]),
	('Ы', &["ыкающие ящеры"]),
	('Ь', &["мягкий ход шафт-лифта"]),
	('Э', &["энергокристаллы", "эманации"]),
	('Ю', &["юстировка лазеров"]),
	('Я', &["якоря орбитальные", "ядра кораблей"]),
];
const BUILTIN_RU_WILDCARD: &[&str] = &["детали мира", "ключевые образы", "герои и артефакты"];

const BUILTIN_EN: &[(char, &[&str])] = &[
	('A', &["astral beacons", "ancient artifacts", "arcane armor"]),
	('B', &["bastions", "blacksmiths", "biome domes"]),
	('C', &["celestial charts", "catapults", "cryocores"]),
	('D', &["dwarven doors", "drone docks", "dark matter"]),
	('E', &["ether engines", "enchanted elixirs"]),
	('F', &["forges", "frigates", "floating markets"]),
	('G', &["gates", "galleons", "golems"]),
	('H', &["hyperlanes", "heralds", "harbors"]),
	('I', &["invokers", "ion thrusters", "ice moons"]),
	('J', &["jump points", "jade runes"]),
	('K', &["keystones", "knightly orders"]),
	('L', &["leviathans", "lore libraries", "laser lances"]),
	('M', &["mana wells", "meteor fields", "map rooms"]),
	('N', &["nav beacons", "necromancers", "nebulae"]),
	('O', &["oracles", "orbital rings"]),
	('P', &["portals", "paladins", "plasma"]),
	('Q', &["quantum quarries", "quest givers"]),
	('R', &["ramparts", "runes", "reactors"]),
	('S', &["starports", "spellbooks", "signal towers"]),
	('T', &["teleports", "triremes", "timekeepers"]),
	('U', &["uplinks", "undercities"]),
	('V', &["vessels", "vaults", "vortexes"]),
	('W', &["waystones", "warlocks", "workshops"]),
	('X', &["xeno gardens", "xiphos racks"]),
	('Y', &["yonder yards", "yew bows"]),
	('Z', &["zephyr sails", "zenith towers"]),
];
const BUILTIN_EN_WILDCARD: &[&str] = &["core motifs", "key artifacts", "heroes & hubs"];

fn owned(fragments: &[&str]) -> Vec<String> {
	fragments.iter().map(|s| (*s).to_owned()).collect()
}

/// Candidate phrase fragments for every letter of one alphabet.
///
/// # Invariants
/// - `wildcard` is non-empty
/// - every list in `entries` is non-empty and holds no blank fragment
/// - every key of `entries` is a letter of `alphabet`
///
/// Read-only once built.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AlphabetBank {
	alphabet: Alphabet,
	entries: HashMap<char, Vec<String>>,
	wildcard: Vec<String>,
}

impl AlphabetBank {
	/// Builds a bank and checks its invariants.
	///
	/// # Errors
	/// - `MissingWildcard` if `wildcard` has no usable fragment
	/// - `EmptyEntry` if a letter list has no usable fragment
	/// - `BankFormat` if a key is not a letter of `alphabet`
	pub fn new(alphabet: Alphabet, entries: HashMap<char, Vec<String>>, wildcard: Vec<String>) -> Result<Self> {
		let bank = Self { alphabet, entries, wildcard };
		bank.validate()?;
		Ok(bank)
	}

	/// The table shipped with the crate.
	pub fn builtin(alphabet: Alphabet) -> Self {
		let (table, wildcard) = match alphabet {
			Alphabet::Cyrillic => (BUILTIN_RU, BUILTIN_RU_WILDCARD),
			Alphabet::Latin => (BUILTIN_EN, BUILTIN_EN_WILDCARD),
		};
		Self {
			alphabet,
			entries: table.iter().map(|(letter, fragments)| (*letter, owned(fragments))).collect(),
			wildcard: owned(wildcard),
		}
	}

	fn validate(&self) -> Result<()> {
		let usable = |fragments: &Vec<String>| !fragments.is_empty() && fragments.iter().all(|f| !f.trim().is_empty());

		if !usable(&self.wildcard) {
			return Err(GenError::MissingWildcard(self.alphabet));
		}
		for (letter, fragments) in &self.entries {
			if !self.alphabet.contains(*letter) {
				return Err(GenError::BankFormat {
					line: 0,
					reason: format!("'{letter}' is not a letter of {}", self.alphabet),
				});
			}
			if !usable(fragments) {
				return Err(GenError::EmptyEntry { alphabet: self.alphabet, letter: letter.to_string() });
			}
		}
		Ok(())
	}

	/// Parses a bank from its text form.
	///
	/// One entry per line, `<key>: <fragment> | <fragment> ...`, where the key
	/// is a single letter of the alphabet (case-insensitive) or `*`.
	/// Blank lines and lines starting with `#` are ignored. Repeated keys
	/// append to the existing list.
	///
	/// # Errors
	/// Returns `BankFormat` with the 1-based line number for malformed lines,
	/// and the `new` errors for invariant violations.
	pub fn parse(alphabet: Alphabet, lines: &[String]) -> Result<Self> {
		let mut entries: HashMap<char, Vec<String>> = HashMap::new();
		let mut wildcard: Vec<String> = Vec::new();

		for (index, raw) in lines.iter().enumerate() {
			let line_number = index + 1;
			let line = raw.trim();
			if line.is_empty() || line.starts_with('#') {
				continue;
			}

			let (key, values) = line.split_once(':').ok_or_else(|| GenError::BankFormat {
				line: line_number,
				reason: "expected '<letter>: <fragments>'".to_owned(),
			})?;

			let fragments: Vec<String> = values
				.split('|')
				.map(str::trim)
				.filter(|f| !f.is_empty())
				.map(str::to_owned)
				.collect();
			if fragments.is_empty() {
				return Err(GenError::BankFormat { line: line_number, reason: format!("no fragment for '{}'", key.trim()) });
			}

			let key = key.trim();
			if key == WILDCARD {
				wildcard.extend(fragments);
				continue;
			}

			let mut upper = key.chars().flat_map(char::to_uppercase);
			let letter = match (upper.next(), upper.next()) {
				(Some(letter), None) if alphabet.contains(letter) => letter,
				_ => {
					return Err(GenError::BankFormat {
						line: line_number,
						reason: format!("'{key}' is not a letter of {alphabet}"),
					});
				}
			};
			entries.entry(letter).or_default().extend(fragments);
		}

		Self::new(alphabet, entries, wildcard)
	}

	/// Loads a bank from a `.dat` file, using a sibling `.bin` cache.
	///
	/// - If `<name>.bin` exists it is decoded with `postcard`.
	/// - Otherwise the text file is parsed and the cache is written.
	///
	/// # Errors
	/// I/O, parse and cache errors. A cache written for another alphabet
	/// is rejected as a format error.
	pub fn load<P: AsRef<Path>>(alphabet: Alphabet, filepath: P) -> Result<Self> {
		let cache_path = build_output_path(&filepath, "bin")?;
		if cache_path.exists() {
			let bytes = std::fs::read(&cache_path)?;
			let bank: Self = postcard::from_bytes(&bytes)?;
			if bank.alphabet != alphabet {
				return Err(GenError::BankFormat {
					line: 0,
					reason: format!("cache {} holds a {} bank", cache_path.display(), bank.alphabet),
				});
			}
			bank.validate()?;
			debug!("Loaded {} bank from cache {}", alphabet, cache_path.display());
			return Ok(bank);
		}

		let bank = Self::parse(alphabet, &read_file(&filepath)?)?;
		let bytes = postcard::to_stdvec(&bank)?;
		std::fs::write(&cache_path, bytes)?;
		debug!("Parsed {} bank from {}", alphabet, filepath.as_ref().display());
		Ok(bank)
	}

	pub fn alphabet(&self) -> Alphabet {
		self.alphabet
	}

	/// Fragments for `letter`, or the wildcard list when it has no entry.
	///
	/// Never empty.
	pub fn lookup(&self, letter: char) -> &[String] {
		self.entries.get(&letter).unwrap_or(&self.wildcard)
	}

	pub fn wildcard(&self) -> &[String] {
		&self.wildcard
	}
}

/// Fragment tables for both alphabets.
#[derive(Clone, Debug, PartialEq)]
pub struct LetterBank {
	cyrillic: AlphabetBank,
	latin: AlphabetBank,
}

impl Default for LetterBank {
	fn default() -> Self {
		Self::builtin()
	}
}

impl LetterBank {
	pub fn builtin() -> Self {
		Self {
			cyrillic: AlphabetBank::builtin(Alphabet::Cyrillic),
			latin: AlphabetBank::builtin(Alphabet::Latin),
		}
	}

	/// Built-in tables, overridden by `<code>.dat` files found in `folder`.
	///
	/// Example: `data/en.dat` replaces the Latin table, the Cyrillic one
	/// stays built-in if `data/ru.dat` is absent. A bank file that fails to
	/// load is logged and its alphabet keeps the built-in table.
	///
	/// # Errors
	/// Returns an error if `folder` is not a directory.
	pub fn load_dir<P: AsRef<Path>>(folder: P) -> Result<Self> {
		let folder = folder.as_ref();
		if !folder.is_dir() {
			return Err(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("Expected a directory, got: {}", folder.display()),
			)
			.into());
		}

		let mut bank = Self::builtin();
		for alphabet in Alphabet::ALL {
			let path = folder.join(format!("{}.dat", alphabet.code()));
			if !path.is_file() {
				continue;
			}
			match AlphabetBank::load(alphabet, &path) {
				Ok(loaded) => {
					bank.replace(loaded);
					info!("Using {} bank from {}", alphabet, path.display());
				}
				Err(e) => warn!("Ignoring {}, keeping built-in {} bank: {e}", path.display(), alphabet),
			}
		}
		Ok(bank)
	}

	/// Replaces the table of the bank's alphabet.
	pub fn replace(&mut self, bank: AlphabetBank) {
		match bank.alphabet {
			Alphabet::Cyrillic => self.cyrillic = bank,
			Alphabet::Latin => self.latin = bank,
		}
	}

	pub fn get(&self, alphabet: Alphabet) -> &AlphabetBank {
		match alphabet {
			Alphabet::Cyrillic => &self.cyrillic,
			Alphabet::Latin => &self.latin,
		}
	}

	/// Fragments for `letter` in `alphabet`. Never empty.
	pub fn lookup(&self, alphabet: Alphabet, letter: char) -> &[String] {
		self.get(alphabet).lookup(letter)
	}
}
