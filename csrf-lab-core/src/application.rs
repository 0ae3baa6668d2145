// Application bootstrapper and HTTP server

use crate::{Error, HttpMethod, HttpRequest, HttpResponse, Router};
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, body::Incoming as IncomingBody};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// The main application struct
pub struct Application {
    router: Arc<Router>,
}

impl Application {
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    pub fn router(&self) -> Arc<Router> {
        self.router.clone()
    }

    /// Serve until Ctrl-C.
    pub async fn listen(self, addr: SocketAddr) -> Result<(), Error> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "server listening on http://{}", addr);
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve connections from `listener` until `shutdown` resolves.
    ///
    /// In-flight connections are left to finish on their own tasks.
    pub async fn serve<S>(self, listener: TcpListener, shutdown: S) -> Result<(), Error>
    where
        S: std::future::Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => accepted?,
                _ = &mut shutdown => {
                    info!("shutdown signal received, no longer accepting connections");
                    return Ok(());
                }
            };

            let io = TokioIo::new(stream);
            let router = self.router.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<IncomingBody>| {
                    let router = router.clone();
                    async move { handle_request(req, router).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    debug!(%peer, "error serving connection: {:?}", err);
                }
            });
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Turn a routing or handler error into a JSON error response
pub fn error_response(err: &Error) -> HttpResponse {
    let status = err.status_code();
    let body = serde_json::json!({
        "error": err.to_string(),
        "status": status,
    });
    HttpResponse::new(status)
        .with_json(&body)
        .unwrap_or_else(|_| HttpResponse::internal_server_error())
}

/// Route a request, converting errors into responses
pub async fn dispatch(router: &Router, request: HttpRequest) -> HttpResponse {
    let method = request.method;
    let path = request.path.clone();

    let response = match router.route(request).await {
        Ok(resp) => resp,
        Err(err) => {
            if err.is_server_error() {
                error!(%method, %path, "request failed: {}", err);
            } else {
                debug!(%method, %path, "request rejected: {}", err);
            }
            error_response(&err)
        }
    };

    info!(%method, %path, status = response.status, "handled request");
    response
}

/// Handle an incoming HTTP request
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
) -> Result<Response<Full<bytes::Bytes>>, hyper::Error> {
    let Some(method) = HttpMethod::from_str(req.method().as_str()) else {
        warn!(method = %req.method(), "unsupported method");
        return Ok(into_hyper(HttpResponse::new(405)));
    };

    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut request = HttpRequest::new(method, target);

    for (name, value) in req.headers() {
        if let Ok(value_str) = value.to_str() {
            request
                .headers
                .insert(name.as_str().to_string(), value_str.to_string());
        }
    }

    let body_bytes = req.collect().await?.to_bytes();
    request.body = body_bytes.to_vec();

    let response = dispatch(&router, request).await;
    Ok(into_hyper(response))
}

fn into_hyper(response: HttpResponse) -> Response<Full<bytes::Bytes>> {
    let mut builder = Response::builder().status(response.status);

    for (key, value) in response.headers {
        builder = builder.header(key, value);
    }

    builder
        .body(Full::new(bytes::Bytes::from(response.body)))
        .unwrap_or_else(|e| {
            error!("failed to build response: {}", e);
            let mut fallback = Response::new(Full::new(bytes::Bytes::new()));
            *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_body() {
        let response = error_response(&Error::RouteNotFound("GET /x".to_string()));
        assert_eq!(response.status, 404);

        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["status"], 404);
        assert!(body["error"].as_str().unwrap().contains("GET /x"));
    }

    #[tokio::test]
    async fn test_dispatch_converts_errors() {
        let router = Router::new();
        let response = dispatch(&router, HttpRequest::new(HttpMethod::GET, "/missing")).await;
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_into_hyper_keeps_headers() {
        let response = into_hyper(HttpResponse::redirect("/safe"));
        assert_eq!(response.status(), 302);
        assert_eq!(response.headers().get("Location").unwrap(), "/safe");
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let app = Application::new(Router::new());
        app.serve(listener, async {}).await.unwrap();
    }
}
