use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use abc_gen_core::model::alphabet::Alphabet;
use abc_gen_core::model::config::{ready_status, Config, ModelTier, Tone};
use abc_gen_core::model::generator::{Entry, Generator, Policy};
use abc_gen_core::model::illustration::plan;
use abc_gen_core::model::letter_bank::LetterBank;
use abc_gen_core::model::session::{Generation, Session};
use abc_gen_core::model::speech::{SpeechDesk, Utterance};

mod illustrate;
mod settings;

use illustrate::{illustrate, Generations, Illustration, UnsplashSource};
use settings::Settings;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	theme: Option<String>,
	policy: Option<String> // -> seeded (default) or positional
}

impl GenerateParams {
	fn policy(&self) -> Result<Policy, String> {
		match self.policy.as_deref().map(str::to_lowercase).as_deref() {
			None | Some("seeded") => Ok(Policy::Seeded),
			Some("positional") => Ok(Policy::Positional),
			Some(_) => Err("Policy must be 'seeded' or 'positional'".into()),
		}
	}
}

/// Single `value` parameter of the mode selection endpoints
#[derive(Deserialize)]
struct ValueQuery {
	value: Option<String>
}

impl ValueQuery {
	fn parse<T: std::str::FromStr<Err = abc_gen_core::GenError>>(&self) -> Result<T, String> {
		match &self.value {
			Some(v) if !v.trim().is_empty() => v.parse().map_err(|e: abc_gen_core::GenError| e.to_string()),
			_ => Err("Missing or empty value".into()),
		}
	}
}

#[derive(Deserialize)]
struct LetterQuery {
	letter: Option<String>
}

#[derive(Serialize, Deserialize, Debug)]
struct GenerateResponse {
	theme: String,
	config: Config,
	items: Vec<Entry>,
	illustrations: Option<Vec<Illustration>>,
	speech_language: Option<String>,
	status: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct ModeResponse {
	config: Config,
	status: Option<String>,
}

struct AppState {
	session: Mutex<Session>,
	speech: Mutex<SpeechDesk>,
	generations: Generations,
	source: UnsplashSource,
	image_workers: usize,
}

impl AppState {
	fn new(session: Session, source: UnsplashSource, image_workers: usize) -> Self {
		Self {
			session: Mutex::new(session),
			speech: Mutex::new(SpeechDesk::default()),
			generations: Generations::default(),
			source,
			image_workers,
		}
	}

	/// Generates under the session lock and takes the generation id there too,
	/// so ids follow the order in which results were stored.
	fn start_generation(&self, theme: &str, policy: Policy) -> Result<(Generation, u64), String> {
		let mut session = self.session.lock().map_err(|_| "Session lock failed".to_owned())?;
		let generation = session.submit(theme, policy).clone();
		Ok((generation, self.generations.begin()))
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Resolves the theme, lets alphabet detection update the mode state,
/// generates the cards and, from tier 2.0 on, their illustrations.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<AppState>, query: web::Query<GenerateParams>) -> impl Responder {
	let policy = match query.policy() {
		Ok(p) => p,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let (generation, id) = match data.start_generation(query.theme.as_deref().unwrap_or(""), policy) {
		Ok(started) => started,
		Err(e) => return HttpResponse::InternalServerError().body(e),
	};
	let config = generation.config;

	let illustrations = if config.model.includes_images() {
		let requests = plan(&generation.result, &generation.theme, config.alphabet);
		Some(illustrate(&requests, &data.source, data.image_workers, &data.generations, id).await)
	} else {
		None
	};

	HttpResponse::Ok().json(GenerateResponse {
		status: ready_status(generation.result.len(), config.model),
		items: generation.result.entries().to_vec(),
		speech_language: config.model.includes_speech().then(|| config.alphabet.speech_language().to_owned()),
		theme: generation.theme,
		config,
		illustrations,
	})
}

#[get("/v1/config")]
async fn get_config(data: web::Data<AppState>) -> impl Responder {
	let config = match data.session.lock() {
		Ok(session) => session.config(),
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};
	HttpResponse::Ok().json(config)
}

/// Applies one mode selection and answers with the new configuration.
fn select<T, F>(data: &AppState, query: &ValueQuery, apply: F) -> HttpResponse
where
	T: std::str::FromStr<Err = abc_gen_core::GenError>,
	F: FnOnce(&mut Session, T) -> Option<&'static str>,
{
	let value = match query.parse::<T>() {
		Ok(v) => v,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};
	let mut session = match data.session.lock() {
		Ok(s) => s,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};
	let status = apply(&mut session, value).map(str::to_owned);
	HttpResponse::Ok().json(ModeResponse { config: session.config(), status })
}

#[put("/v1/alphabet")]
async fn put_alphabet(data: web::Data<AppState>, query: web::Query<ValueQuery>) -> impl Responder {
	select(&data, &query, |session, alphabet: Alphabet| {
		session.select_alphabet(alphabet);
		None
	})
}

#[put("/v1/model")]
async fn put_model(data: web::Data<AppState>, query: web::Query<ValueQuery>) -> impl Responder {
	select(&data, &query, |session, model: ModelTier| Some(session.select_model(model)))
}

#[put("/v1/tone")]
async fn put_tone(data: web::Data<AppState>, query: web::Query<ValueQuery>) -> impl Responder {
	select(&data, &query, |session, tone: Tone| session.select_tone(tone))
}

/// HTTP GET endpoint `/v1/export`
///
/// Last result as a plain text download, 204 before the first generation.
#[get("/v1/export")]
async fn get_export(data: web::Data<AppState>) -> impl Responder {
	let text = match data.session.lock() {
		Ok(session) => session.export_text(),
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};
	match text {
		Some(text) => HttpResponse::Ok()
			.content_type("text/plain; charset=utf-8")
			.insert_header(("Content-Disposition", "attachment; filename=\"alphabet.txt\""))
			.body(text),
		None => HttpResponse::NoContent().finish(),
	}
}

/// HTTP PUT endpoint `/v1/speech/play`
///
/// Starts the utterance of one card of the last result, stopping any other.
#[put("/v1/speech/play")]
async fn put_speech_play(data: web::Data<AppState>, query: web::Query<LetterQuery>) -> impl Responder {
	let mut chars = query.letter.as_deref().unwrap_or("").trim().chars().flat_map(char::to_uppercase);
	let letter = match (chars.next(), chars.next()) {
		(Some(c), None) => c,
		_ => return HttpResponse::BadRequest().body("Letter must be a single character"),
	};

	let utterance = {
		let session = match data.session.lock() {
			Ok(s) => s,
			Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
		};
		let Some(generation) = session.last() else {
			return HttpResponse::NotFound().body("Nothing generated yet");
		};
		if !generation.config.model.includes_speech() {
			return HttpResponse::Conflict().body("Speech requires model 2.5");
		}
		let utterance = match generation.result.get(letter) {
			Some(entry) => Utterance::new(entry, generation.config.alphabet),
			None => return HttpResponse::NotFound().body(format!("No card for '{letter}'")),
		};
		utterance
	};

	let mut desk = match data.speech.lock() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Speech lock failed"),
	};
	desk.play(utterance.clone());
	HttpResponse::Ok().json(utterance)
}

#[put("/v1/speech/stop")]
async fn put_speech_stop(data: web::Data<AppState>) -> impl Responder {
	let mut desk = match data.speech.lock() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Speech lock failed"),
	};
	desk.stop();
	HttpResponse::Ok().body("Stopped")
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_config)
		.service(put_alphabet)
		.service(put_model)
		.service(put_tone)
		.service(get_export)
		.service(put_speech_play)
		.service(put_speech_stop);
}

/// Main entry point for the server.
///
/// Loads letter banks from the data directory (built-in tables otherwise),
/// wraps the session in a `Mutex` and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let settings = Settings::from_env();
	let bank = if settings.data_dir.is_dir() {
		LetterBank::load_dir(&settings.data_dir).unwrap_or_else(|e| {
			warn!("Bank directory unreadable, using built-in banks: {e}");
			LetterBank::builtin()
		})
	} else {
		info!("No bank directory at {}, using built-in banks", settings.data_dir.display());
		LetterBank::builtin()
	};

	let source = UnsplashSource::new().map_err(std::io::Error::other)?;
	let state = web::Data::new(AppState::new(Session::new(Generator::new(bank)), source, settings.image_workers));

	info!("Listening on {}", settings.addr);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "PUT"]))
			.app_data(state.clone())
			.configure(routes)
	})
		.bind(settings.addr.as_str())?
		.run()
		.await
}
