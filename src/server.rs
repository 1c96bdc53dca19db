use anyhow::{anyhow, Result};
use log::{debug, warn};
use std::io::Read;
use std::net::ToSocketAddrs;
use tiny_http::{Header, Request, Response};

use crate::api::{Body, GameController, Reply};

/// Serves one request at a time; the controller, and the match it owns,
/// never sees two requests at once.
pub struct Server {
    http: tiny_http::Server,
    controller: GameController,
}

impl Server {
    pub fn bind<A: ToSocketAddrs>(addr: A, controller: GameController) -> Result<Self> {
        let http = tiny_http::Server::http(addr).map_err(|e| anyhow!("failed to bind: {}", e))?;
        Ok(Self { http, controller })
    }

    pub fn run_loop(&mut self) {
        for mut request in self.http.incoming_requests() {
            let mut body = String::new();
            if let Err(e) = request.as_reader().read_to_string(&mut body) {
                warn!("Failed to read request body: {}", e);
                body.clear();
            }
            let method = request.method().to_string().to_uppercase();
            debug!("{} {}", method, request.url());
            let reply = self.controller.handle(&method, request.url(), &body);
            respond(request, reply);
        }
    }
}

fn respond(request: Request, reply: Reply) {
    let (text, content_type) = match reply.body {
        Body::Json(v) => (v.to_string(), "application/json; charset=utf-8"),
        Body::Markdown(s) => (s, "text/markdown; charset=utf-8"),
    };
    let mut response = Response::from_string(text).with_status_code(reply.status);
    if let Ok(h) = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()) {
        response = response.with_header(h);
    }
    if let Err(e) = request.respond(response) {
        warn!("Failed to send response: {}", e);
    }
}
