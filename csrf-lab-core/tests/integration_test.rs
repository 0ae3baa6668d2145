//! Integration tests for csrf-lab-core: a real socket round trip.

use csrf_lab_core::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

fn demo_router() -> Router {
    let mut router = Router::new();
    router
        .get("/hello", |req: HttpRequest| async move {
            let name = req.query("name").cloned().unwrap_or_else(|| "world".to_string());
            Ok::<_, Error>(HttpResponse::html(format!("<p>hello {}</p>", name)))
        })
        .unwrap();
    router
        .post("/echo-form", |req: HttpRequest| async move {
            let form = req.form()?;
            let token = form.get("csrf_token").cloned().unwrap_or_default();
            Ok::<_, Error>(HttpResponse::ok().with_body(token.into_bytes()))
        })
        .unwrap();
    router
}

async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}

#[tokio::test]
async fn test_server_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        Application::new(demo_router())
            .serve(listener, async {
                let _ = rx.await;
            })
            .await
    });

    let response = raw_request(
        addr,
        "GET /hello?name=alice HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("<p>hello alice</p>"));

    let body = "csrf_token=abc123&email=x%40y.z";
    let response = raw_request(
        addr,
        &format!(
            "POST /echo-form HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("abc123"));

    let response = raw_request(
        addr,
        "GET /echo-form HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 405"));

    tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
