//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling; one spawned task per
//! connection, routing via a method/path match.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::Args;
use crate::db::{ChallengeLedger, MongoClient};
use crate::routes;
use crate::types::PortalError;

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Document store; `None` only in dev mode (submissions answer with the
    /// error envelope until it connects)
    pub mongo: Option<MongoClient>,
    /// Challenge ledger handle; existence is checked per request, failures
    /// degrade rather than error
    pub ledger: ChallengeLedger,
}

impl AppState {
    pub fn new(args: Args, mongo: Option<MongoClient>, ledger: ChallengeLedger) -> Self {
        Self {
            args,
            mongo,
            ledger,
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), PortalError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Portal API listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    if state.args.dev_mode {
        warn!("Development mode enabled - document store connection is optional");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    debug!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Liveness probe - returns 200 if the service is running
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state))
        }

        // Readiness probe - returns 200 only if the document store is connected
        (Method::GET, "/ready") | (Method::GET, "/readyz") => {
            routes::readiness_check(Arc::clone(&state))
        }

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // The aggregated submissions/leaderboard view
        (Method::GET, "/submissions") => {
            routes::handle_submissions(Arc::clone(&state), query.as_deref()).await
        }

        // CORS preflight
        (Method::OPTIONS, _) => preflight_response(),

        _ => not_found_response(&path),
    };

    Ok(response)
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// 404 response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = format!(r#"{{"success":false,"error":"Not found: {}"}}"#, path);
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}
