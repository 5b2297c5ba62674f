//! Minimal HTTP/1.1 server for integration tests: static routes, everything else 404.
//!
//! Routes can be added after start, so a manifest can embed the server's own
//! base URL in its image locations.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
struct Route {
    status: u32,
    content_type: &'static str,
    body: Vec<u8>,
}

type Routes = Arc<Mutex<HashMap<String, Route>>>;

#[derive(Clone)]
pub struct IiifServer {
    pub base: String,
    routes: Routes,
    hits: Arc<Mutex<Vec<String>>>,
}

impl IiifServer {
    /// Bind to an ephemeral port and serve in a background thread until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Routes = Arc::new(Mutex::new(HashMap::new()));
        let hits = Arc::new(Mutex::new(Vec::new()));
        let server = IiifServer {
            base: format!("http://127.0.0.1:{}", port),
            routes: Arc::clone(&routes),
            hits: Arc::clone(&hits),
        };
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&hits);
                thread::spawn(move || handle(stream, &routes, &hits));
            }
        });
        server
    }

    pub fn serve(&self, path: &str, content_type: &'static str, body: Vec<u8>) {
        self.insert(path, 200, content_type, body);
    }

    pub fn fail(&self, path: &str, status: u32) {
        self.insert(path, status, "text/plain", b"error".to_vec());
    }

    fn insert(&self, path: &str, status: u32, content_type: &'static str, body: Vec<u8>) {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            Route {
                status,
                content_type,
                body,
            },
        );
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Paths requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn handle(mut stream: TcpStream, routes: &Routes, hits: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("").to_string();
    hits.lock().unwrap().push(path.clone());

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    let route = routes.lock().unwrap().get(&path).cloned().unwrap_or(Route {
        status: 404,
        content_type: "text/plain",
        body: b"not found".to_vec(),
    });
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.content_type,
        route.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
}
