use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use abc_gen_core::model::illustration::IllustrationRequest;

/// Resolved images for one card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Illustration {
	pub letter: char,
	pub url: String,
	pub extra_url: Option<String>,
}

/// Turns an image search URL into a displayable image URL.
pub trait IllustrationSource {
	async fn resolve(&self, url: &str) -> Result<String, String>;
}

/// Follows the image service redirect and returns the final image URL.
pub struct UnsplashSource {
	client: Client,
}

impl UnsplashSource {
	/// Creates a source with a 5 seconds timeout per lookup.
	pub fn new() -> reqwest::Result<Self> {
		let client = Client::builder()
			.timeout(Duration::new(5, 0))
			.build()?;
		Ok(Self { client })
	}
}

impl IllustrationSource for UnsplashSource {
	async fn resolve(&self, url: &str) -> Result<String, String> {
		let response = self.client
			.get(url)
			.send()
			.await
			.and_then(|response| response.error_for_status())
			.map_err(|e| e.to_string())?;
		Ok(response.url().to_string())
	}
}

/// Generation counter used to abandon stale illustration work.
///
/// Every generation request takes a new id; fan-out workers stop pulling
/// cards as soon as their id is no longer the latest.
#[derive(Debug, Default)]
pub struct Generations {
	latest: AtomicU64,
}

impl Generations {
	/// Starts a new generation and returns its id.
	pub fn begin(&self) -> u64 {
		self.latest.fetch_add(1, Ordering::SeqCst) + 1
	}

	pub fn is_current(&self, id: u64) -> bool {
		self.latest.load(Ordering::SeqCst) == id
	}
}

struct Pool<'a, S> {
	requests: &'a [IllustrationRequest],
	source: &'a S,
	generations: &'a Generations,
	id: u64,
	cursor: AtomicUsize,
	done: Mutex<Vec<Option<Illustration>>>,
}

async fn worker<S: IllustrationSource>(pool: &Pool<'_, S>) {
	loop {
		if !pool.generations.is_current(pool.id) {
			debug!("Generation {} superseded, worker stops", pool.id);
			break;
		}
		let index = pool.cursor.fetch_add(1, Ordering::SeqCst);
		let Some(request) = pool.requests.get(index) else {
			break;
		};

		let url = match pool.source.resolve(&request.url).await {
			Ok(url) => url,
			Err(e) => {
				// A missing picture never fails the generation
				warn!("Illustration for '{}' failed: {e}", request.letter);
				continue;
			}
		};
		let extra_url = match &request.extra_url {
			Some(extra) => match pool.source.resolve(extra).await {
				Ok(url) => Some(url),
				Err(e) => {
					warn!("Extra illustration for '{}' failed: {e}", request.letter);
					None
				}
			},
			None => None,
		};

		if let Ok(mut done) = pool.done.lock() {
			done[index] = Some(Illustration { letter: request.letter, url, extra_url });
		}
	}
}

/// Resolves `requests` with at most `workers` lookups in flight.
///
/// Each worker pulls the next unprocessed index from a shared cursor.
/// Failed cards are skipped; the output keeps card order.
pub async fn illustrate<S: IllustrationSource>(
	requests: &[IllustrationRequest],
	source: &S,
	workers: usize,
	generations: &Generations,
	id: u64,
) -> Vec<Illustration> {
	let pool = Pool {
		requests,
		source,
		generations,
		id,
		cursor: AtomicUsize::new(0),
		done: Mutex::new(vec![None; requests.len()]),
	};

	join_all((0..workers.max(1)).map(|_| worker(&pool))).await;

	match pool.done.into_inner() {
		Ok(done) => done.into_iter().flatten().collect(),
		Err(_) => Vec::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use abc_gen_core::model::alphabet::Alphabet;
	use abc_gen_core::model::generator::Generator;
	use abc_gen_core::model::illustration::plan;
	use actix_web::rt::time::sleep;

	/// Echoes the URL back after a short pause, tracking concurrency.
	#[derive(Default)]
	struct Echo {
		in_flight: AtomicUsize,
		max_in_flight: AtomicUsize,
		calls: AtomicUsize,
		fail_suffix: Option<&'static str>,
		supersede_after: Option<(usize, &'static Generations)>,
	}

	impl IllustrationSource for Echo {
		async fn resolve(&self, url: &str) -> Result<String, String> {
			let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
			self.max_in_flight.fetch_max(now, Ordering::SeqCst);
			let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
			sleep(Duration::from_millis(2)).await;
			self.in_flight.fetch_sub(1, Ordering::SeqCst);

			if let Some((after, generations)) = self.supersede_after {
				if calls == after {
					generations.begin();
				}
			}
			match self.fail_suffix {
				Some(suffix) if url.ends_with(suffix) => Err("not found".to_owned()),
				_ => Ok(url.to_owned()),
			}
		}
	}

	fn requests() -> Vec<IllustrationRequest> {
		let result = Generator::default().positional("sea", Alphabet::Latin);
		plan(&result, "sea", Alphabet::Latin)
	}

	#[actix_web::test]
	async fn test_all_cards_bounded() {
		let requests = requests();
		let generations = Generations::default();
		let id = generations.begin();
		let source = Echo::default();

		let illustrations = illustrate(&requests, &source, 4, &generations, id).await;

		assert_eq!(illustrations.len(), 26);
		assert_eq!(illustrations[0].letter, 'A');
		assert_eq!(illustrations[25].url, requests[25].url);
		assert!(source.max_in_flight.load(Ordering::SeqCst) <= 4);
	}

	#[actix_web::test]
	async fn test_failures_are_skipped() {
		let requests = requests();
		let generations = Generations::default();
		let id = generations.begin();
		let source = Echo { fail_suffix: Some("%20B"), ..Default::default() };

		let illustrations = illustrate(&requests, &source, 4, &generations, id).await;

		assert_eq!(illustrations.len(), 25);
		assert!(illustrations.iter().all(|i| i.letter != 'B'));
	}

	#[actix_web::test]
	async fn test_superseded_generation_stops() {
		let requests = requests();
		let generations: &'static Generations = Box::leak(Box::new(Generations::default()));
		let id = generations.begin();
		let source = Echo { supersede_after: Some((1, generations)), ..Default::default() };

		let illustrations = illustrate(&requests, &source, 2, generations, id).await;

		assert!(!generations.is_current(id));
		assert!(illustrations.len() < requests.len());
	}
}
