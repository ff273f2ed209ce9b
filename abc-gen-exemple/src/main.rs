use abc_gen_core::model::alphabet::Alphabet;
use abc_gen_core::model::config::Tone;
use abc_gen_core::model::generator::{Generator, Policy};
use abc_gen_core::model::illustration::plan;
use abc_gen_core::model::letter_bank::LetterBank;
use abc_gen_core::model::session::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load bank overrides from "./data" (en.dat / ru.dat) if the folder exists,
    // otherwise use the built-in tables
    let bank = match LetterBank::load_dir("./data") {
        Ok(bank) => bank,
        Err(_) => LetterBank::builtin(),
    };
    let mut session = Session::new(Generator::new(bank));

    // Select the alphabet explicitly
    // Detection will override it anyway if the theme is written in the other one
    session.select_alphabet(Alphabet::Latin);

    // Positional policy: i-th letter takes fragment i mod n, no randomness
    let generation = session.submit("", Policy::Positional);
    println!("Theme: {}", generation.theme);
    for entry in generation.result.entries().iter().take(3) {
        println!("{}", entry.line);
    }

    // A Cyrillic theme switches the alphabet back to Cyrillic
    // Seeded policy: same theme and alphabet always give the same lines
    let generation = session.submit("космос", Policy::Seeded);
    println!("\nAlphabet: {} ({} letters)", generation.config.alphabet, generation.result.len());
    for entry in generation.result.entries().iter().take(3) {
        println!("{}", entry.line);
    }

    // Hard tone forces the model tier to 2.0 (text + illustrations)
    if let Some(status) = session.select_tone(Tone::Hard) {
        println!("\n{status}");
    }
    println!("Model: {}", session.config().model);

    let generation = session.submit("dark fantasy", Policy::Seeded);
    let requests = plan(&generation.result, &generation.theme, generation.config.alphabet);
    for (entry, request) in generation.result.entries().iter().zip(&requests).take(3) {
        println!("{}\n    {}", entry.line, request.url);
    }

    // Export format: one line per letter
    if let Some(text) = session.export_text() {
        println!("\nExported {} lines", text.lines().count());
    }

    Ok(())
}
