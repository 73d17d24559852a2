//! A real HTTP server standing in for the cowbull game engine.
//!
//! Binds `127.0.0.1:0` and serves the engine's three operations:
//!
//! | request                       | route         |
//! |-------------------------------|---------------|
//! | `GET …/modes`                 | `ListModes`   |
//! | `GET …/game` with empty mode  | `ListModes`   |
//! | `GET …/game?mode=…`           | `StartGame`   |
//! | `POST …/game`                 | `SubmitGuess` |
//!
//! Anything else gets a 404. Each route answers with a scripted status and
//! body (a playable default until scripted) and every hit is recorded.
//! Must be started from inside an actix system (`#[actix_web::test]`).

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, StatusCode};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const FAKE_KEY: &str = "0f1e2d3c-fake-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineRoute {
    ListModes,
    StartGame,
    SubmitGuess,
}

/// One request the fake engine received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub route: EngineRoute,
    pub query: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
struct Scripted {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct Shared {
    scripts: Mutex<HashMap<EngineRoute, Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct FakeEngine {
    origin: String,
    shared: Arc<Shared>,
    handle: ServerHandle,
}

impl FakeEngine {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let data = web::Data::from(shared.clone());

        let listener =
            TcpListener::bind("127.0.0.1:0").expect("fake engine should bind an ephemeral port");
        let addr = listener.local_addr().expect("bound listener has an address");

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .disable_signals()
        .shutdown_timeout(0)
        .listen(listener)
        .expect("fake engine should listen")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            origin: format!("http://{addr}"),
            shared,
            handle,
        }
    }

    /// `COWBULL_URL` in template form: `http://127.0.0.1:PORT/v1/{}`.
    pub fn template_url(&self) -> String {
        format!("{}/v1/{{}}", self.origin)
    }

    /// `COWBULL_URL` in plain form: `http://127.0.0.1:PORT/v1/game`.
    pub fn plain_url(&self) -> String {
        format!("{}/v1/game", self.origin)
    }

    /// Answer `route` with `status` and a raw body from now on.
    pub fn script(&self, route: EngineRoute, status: u16, body: impl Into<String>) {
        self.shared.scripts.lock().insert(
            route,
            Scripted {
                status,
                body: body.into(),
                delay: None,
            },
        );
    }

    pub fn script_json(&self, route: EngineRoute, status: u16, body: &Value) {
        self.script(route, status, body.to_string());
    }

    /// Hold every answer on `route` for `delay` before replying.
    pub fn delay(&self, route: EngineRoute, delay: Duration) {
        let mut scripts = self.shared.scripts.lock();
        let entry = scripts
            .entry(route)
            .or_insert_with(|| default_script(route));
        entry.delay = Some(delay);
    }

    pub fn hits(&self, route: EngineRoute) -> usize {
        self.shared
            .requests
            .lock()
            .iter()
            .filter(|r| r.route == route)
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.shared.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn respond(req: HttpRequest, body: web::Bytes, shared: web::Data<Shared>) -> HttpResponse {
    let Some(route) = route_of(&req) else {
        return HttpResponse::NotFound().finish();
    };

    shared.requests.lock().push(RecordedRequest {
        route,
        query: req.query_string().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let scripted = shared
        .scripts
        .lock()
        .get(&route)
        .cloned()
        .unwrap_or_else(|| default_script(route));

    if let Some(delay) = scripted.delay {
        actix_web::rt::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(scripted.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status)
        .content_type("application/json")
        .body(scripted.body)
}

fn route_of(req: &HttpRequest) -> Option<EngineRoute> {
    let path = req.path();
    let method = req.method();

    if *method == Method::GET && path.ends_with("/modes") {
        return Some(EngineRoute::ListModes);
    }
    if !path.ends_with("/game") {
        return None;
    }
    if *method == Method::POST {
        return Some(EngineRoute::SubmitGuess);
    }
    if *method != Method::GET {
        return None;
    }

    let mode = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .ok()
        .and_then(|q| q.get("mode").cloned())
        .unwrap_or_default();
    if mode.is_empty() {
        Some(EngineRoute::ListModes)
    } else {
        Some(EngineRoute::StartGame)
    }
}

fn default_script(route: EngineRoute) -> Scripted {
    let body = match route {
        EngineRoute::ListModes => modes_body(&["easy", "normal", "hard"]),
        EngineRoute::StartGame => new_game_body(FAKE_KEY, 4, 10),
        EngineRoute::SubmitGuess => guess_body("playing", 9, ""),
    };
    Scripted {
        status: 200,
        body: body.to_string(),
        delay: None,
    }
}

pub fn modes_body(modes: &[&str]) -> Value {
    Value::Array(modes.iter().map(|m| json!({ "mode": m })).collect())
}

pub fn new_game_body(key: &str, digits: usize, guesses: u32) -> Value {
    json!({
        "key": key,
        "digits": digits,
        "guesses": guesses,
        "served-by": "fake-engine"
    })
}

/// A four digit guess result: first digit a bull, second a cow.
pub fn guess_body(status: &str, guesses_remaining: u32, message: &str) -> Value {
    json!({
        "game": { "status": status, "guesses_remaining": guesses_remaining },
        "outcome": {
            "message": message,
            "cows": 1,
            "bulls": 1,
            "analysis": [
                { "digit": 1, "match": true,  "in_word": true,  "multiple": false },
                { "digit": 2, "match": false, "in_word": true,  "multiple": false },
                { "digit": 3, "match": false, "in_word": false, "multiple": false },
                { "digit": 4, "match": false, "in_word": false, "multiple": false }
            ]
        }
    })
}
