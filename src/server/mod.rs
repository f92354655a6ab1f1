//! HTTP JSON API
//!
//! Two routes: `POST /` scores a detection request, `GET /languages` lists
//! what the loaded store can score. The engine is shared across requests
//! behind an `Arc`; profiles are immutable once loaded, so handlers run
//! without locking.

use std::convert::Infallible;
use std::sync::Arc;

use tracing::info;
use warp::{Filter, Rejection, Reply};

use crate::detector::Detector;
use crate::models::DetectRequest;

/// Build the route tree for one engine instance.
pub fn routes(
    detector: Arc<Detector>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let detect = warp::path::end()
        .and(warp::post())
        .and(warp::body::json())
        .and(with_detector(detector.clone()))
        .and_then(handle_detect);

    let languages = warp::path("languages")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_detector(detector))
        .and_then(handle_languages);

    detect.or(languages)
}

fn with_detector(
    detector: Arc<Detector>,
) -> impl Filter<Extract = (Arc<Detector>,), Error = Infallible> + Clone {
    warp::any().map(move || detector.clone())
}

async fn handle_detect(
    request: DetectRequest,
    detector: Arc<Detector>,
) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&detector.detect(&request)))
}

async fn handle_languages(detector: Arc<Detector>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&detector.languages()))
}

/// Serve until the process is stopped.
pub async fn run(detector: Arc<Detector>, port: u16) {
    info!(
        "serving detection for {} languages on 0.0.0.0:{}",
        detector.languages().len(),
        port
    );
    warp::serve(routes(detector)).run(([0, 0, 0, 0], port)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Detection;
    use crate::profile::{LanguageProfile, ProfileStore};
    use crate::text::{normalize, tokenize};

    fn test_detector() -> Arc<Detector> {
        let mut en = LanguageProfile::new();
        en.train(&tokenize(&normalize(
            "the quick brown fox jumps over the lazy dog",
        )));
        let mut xx = LanguageProfile::new();
        xx.train(&tokenize(&normalize("zzzz qqqq jjjj wwww")));

        let mut store = ProfileStore::new();
        store.insert("en", en);
        store.insert("xx", xx);
        Arc::new(Detector::new(store))
    }

    #[tokio::test]
    async fn test_detect_route_round_trips() {
        let routes = routes(test_detector());
        let request = DetectRequest::new("the quick brown fox").with_seed(1);

        let response = warp::test::request()
            .method("POST")
            .path("/")
            .json(&request)
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 200);
        let detection: Detection = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(detection.lang, "en");
        assert!(detection.tokens_total > 0);
    }

    #[tokio::test]
    async fn test_languages_route_lists_store() {
        let routes = routes(test_detector());

        let response = warp::test::request()
            .method("GET")
            .path("/languages")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 200);
        let langs: Vec<String> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(langs, vec!["en", "xx"]);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let routes = routes(test_detector());

        let response = warp::test::request()
            .method("POST")
            .path("/")
            .body("{ not json")
            .reply(&routes)
            .await;

        assert_ne!(response.status(), 200);
    }
}
