//! Canned detection service for the flow and session tests.
//!
//! Serves both conversation shapes the client speaks: the annotated route
//! with its side-channel header and JSON fallback, and the one-shot upload
//! route with a processed-image link. Hit counters let tests assert how many
//! round-trips each flow makes.

use dermacore::detection::{Detection, DetectionsPayload, UploadPayload};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use warp::http::Response;
use warp::{Filter, Reply};

use crate::submission::settings::ClientSettings;

/// What the stub replies with on each route.
pub struct Scenario {
    /// Raw side-channel header value; `None` omits the header entirely.
    pub side_channel: Option<String>,
    /// Status for the annotated route; anything non-2xx simulates an outage.
    pub annotated_status: u16,
    pub annotated_body: Vec<u8>,
    pub fallback_detections: Vec<Detection>,
    /// Raw fallback body served as-is when set; `None` encodes
    /// `fallback_detections` as JSON.
    pub fallback_body: Option<Vec<u8>>,
    pub upload_detections: Vec<Detection>,
    /// `image_url` the upload route reports; `None` means no processed image.
    pub upload_image_url: Option<String>,
    pub image_body: Vec<u8>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            side_channel: None,
            annotated_status: 200,
            annotated_body: b"annotated-jpeg".to_vec(),
            fallback_detections: Vec::new(),
            fallback_body: None,
            upload_detections: Vec::new(),
            upload_image_url: None,
            image_body: b"predict-jpeg".to_vec(),
        }
    }
}

#[derive(Default)]
struct Hits {
    annotated: AtomicUsize,
    fallback: AtomicUsize,
    upload: AtomicUsize,
    image: AtomicUsize,
}

pub struct StubService {
    addr: SocketAddr,
    hits: Arc<Hits>,
}

impl StubService {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client settings pointed at this stub, with a short timeout.
    pub fn settings(&self) -> ClientSettings {
        ClientSettings {
            api_base: self.base_url(),
            request_timeout_secs: 5,
        }
    }

    pub fn annotated_hits(&self) -> usize {
        self.hits.annotated.load(Ordering::SeqCst)
    }

    pub fn fallback_hits(&self) -> usize {
        self.hits.fallback.load(Ordering::SeqCst)
    }

    pub fn upload_hits(&self) -> usize {
        self.hits.upload.load(Ordering::SeqCst)
    }

    pub fn image_hits(&self) -> usize {
        self.hits.image.load(Ordering::SeqCst)
    }
}

/// Binds the stub on an ephemeral port and serves it on the current runtime.
pub async fn spawn(scenario: Scenario) -> StubService {
    let scenario = Arc::new(scenario);
    let hits = Arc::new(Hits::default());

    let scenario_filter = {
        let scenario = scenario.clone();
        warp::any().map(move || scenario.clone())
    };
    let hits_filter = {
        let hits = hits.clone();
        warp::any().map(move || hits.clone())
    };

    let detect = warp::post()
        .and(warp::path("detect"))
        .and(
            warp::query::raw()
                .or(warp::any().map(String::new))
                .unify(),
        )
        .and(scenario_filter.clone())
        .and(hits_filter.clone())
        .map(|query: String, scenario: Arc<Scenario>, hits: Arc<Hits>| {
            if query.contains("return_annotated=true") {
                hits.annotated.fetch_add(1, Ordering::SeqCst);
                annotated_response(&scenario).into_response()
            } else {
                hits.fallback.fetch_add(1, Ordering::SeqCst);
                match &scenario.fallback_body {
                    Some(body) => Response::builder()
                        .status(200)
                        .header("content-type", "application/json")
                        .body(body.clone())
                        .unwrap()
                        .into_response(),
                    None => warp::reply::json(&DetectionsPayload {
                        detections: scenario.fallback_detections.clone(),
                    })
                    .into_response(),
                }
            }
        });

    let upload = warp::post()
        .and(warp::path("upload"))
        .and(scenario_filter.clone())
        .and(hits_filter.clone())
        .map(|scenario: Arc<Scenario>, hits: Arc<Hits>| {
            hits.upload.fetch_add(1, Ordering::SeqCst);
            warp::reply::json(&UploadPayload {
                detections: scenario.upload_detections.clone(),
                image_url: scenario.upload_image_url.clone(),
            })
        });

    let image = warp::get()
        .and(warp::path("predict"))
        .and(scenario_filter)
        .and(hits_filter)
        .map(|scenario: Arc<Scenario>, hits: Arc<Hits>| {
            hits.image.fetch_add(1, Ordering::SeqCst);
            Response::builder()
                .status(200)
                .header("content-type", "image/jpeg")
                .body(scenario.image_body.clone())
                .unwrap()
        });

    let routes = detect.or(upload).or(image);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    StubService { addr, hits }
}

fn annotated_response(scenario: &Scenario) -> Response<Vec<u8>> {
    let mut builder = Response::builder()
        .status(scenario.annotated_status)
        .header("content-type", "image/jpeg");
    if let Some(value) = &scenario.side_channel {
        builder = builder.header("x-detections", value.as_str());
    }
    let body = if (200..300).contains(&scenario.annotated_status) {
        scenario.annotated_body.clone()
    } else {
        Vec::new()
    };
    builder.body(body).unwrap()
}

/// Two detections with distinct classes, matching the service's wire shape.
pub fn sample_detections() -> Vec<Detection> {
    vec![
        Detection::new(10.0, 12.0, 40.0, 44.0, 0.91, 0, "Whiteheads"),
        Detection::new(60.0, 20.0, 90.0, 52.0, 0.78, 1, "Blackheads"),
    ]
}

/// Encodes detections the way the service writes its side-channel header.
pub fn encode_header(detections: &[Detection]) -> String {
    serde_json::to_string(&DetectionsPayload {
        detections: detections.to_vec(),
    })
    .unwrap()
}

/// Runs an async test body on a fresh current-thread runtime.
pub fn run_async<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("building test runtime")
        .block_on(future)
}
