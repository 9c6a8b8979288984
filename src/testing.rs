// src/testing.rs
// Recording fakes for the gateway collaborators and a tiny local HTTP server

use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::error::TransportError;
use crate::game_state::GameStateStore;
use crate::gateway::PlayerGateway;
use crate::notifier::Notifier;
use crate::session::Profile;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// What the player saw and what the store was asked to do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Success(String),
    Error(String),
    Refresh(String),
}

/// Answers requests from a script; once it runs dry every request gets `200 null`
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn scripted(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(status: u16, data: Value) -> Self {
        Self::scripted(vec![Ok(HttpResponse::new(status, data))])
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, Value::Null)))
    }
}

pub struct RecordingNotifier {
    events: EventLog,
}

impl RecordingNotifier {
    pub fn new(events: EventLog) -> Self {
        Self { events }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.events.lock().unwrap().push(Event::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(Event::Error(message.to_string()));
    }
}

pub struct RecordingStore {
    events: EventLog,
}

impl RecordingStore {
    pub fn new(events: EventLog) -> Self {
        Self { events }
    }
}

impl GameStateStore for RecordingStore {
    fn refresh(&self, game_id: &str) {
        self.events.lock().unwrap().push(Event::Refresh(game_id.to_string()));
    }
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// Gateway over `transport` with recording notifier and store, acting as player `p1`
pub fn wired_gateway(base_url: &str, transport: Arc<dyn Transport>) -> (PlayerGateway, EventLog) {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let gateway = PlayerGateway::new(
        base_url,
        transport,
        Arc::new(RecordingNotifier::new(Arc::clone(&events))),
        Arc::new(RecordingStore::new(Arc::clone(&events))),
        Arc::new(Profile::new("p1", "shervin")),
    );
    (gateway, events)
}

/// A gateway wired to recording fakes against `http://civ/api`
pub struct Harness {
    pub transport: Arc<RecordingTransport>,
    pub gateway: PlayerGateway,
    events: EventLog,
}

impl Harness {
    pub fn new(transport: RecordingTransport) -> Self {
        let transport = Arc::new(transport);
        let (gateway, events) = wired_gateway("http://civ/api", Arc::clone(&transport) as Arc<dyn Transport>);
        Self { transport, gateway, events }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn refreshes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Refresh(game_id) => Some(game_id),
                _ => None,
            })
            .collect()
    }
}

/// A request as it arrived on the wire
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// HTTP/1 server on an ephemeral port answering every request with the same status and body
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(status: u16, reply: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests: Arc<Mutex<Vec<CapturedRequest>>> = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = Arc::clone(&requests);

        let handle = tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(_) => break,
                };
                let io = TokioIo::new(stream);
                let requests = Arc::clone(&requests_clone);

                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let requests = Arc::clone(&requests);
                        async move {
                            let (parts, incoming) = req.into_parts();
                            let body = match incoming.collect().await {
                                Ok(collected) => collected.to_bytes().to_vec(),
                                Err(_) => Vec::new(),
                            };
                            requests.lock().unwrap().push(CapturedRequest {
                                method: parts.method.to_string(),
                                path: parts.uri.path().to_string(),
                                query: parts.uri.query().map(str::to_string),
                                content_type: parts
                                    .headers
                                    .get("content-type")
                                    .and_then(|v| v.to_str().ok())
                                    .map(str::to_string),
                                body,
                            });

                            let response = Response::builder()
                                .status(status)
                                .header("content-type", "application/json")
                                .body(Full::new(Bytes::from_static(reply.as_bytes())))
                                .unwrap();
                            Ok::<_, Infallible>(response)
                        }
                    });

                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        Self { base_url: format!("http://{addr}"), requests, handle }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
