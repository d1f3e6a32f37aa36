use crate::body::{self, ResponseBody};
use crate::stream;
use headers::{Allow, HeaderMapExt};
use hyper::body::Incoming;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use std::path::{Path, PathBuf};

const STREAM_PATH: &str = "/api/stream";

pub struct State {
    root: PathBuf,
}

impl State {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

pub async fn respond_to_request(req: Request<Incoming>, state: &State) -> Response<ResponseBody> {
    // request bodies are never read
    let (parts, _) = req.into_parts();
    route(&parts, state).await
}

async fn route(req: &Parts, state: &State) -> Response<ResponseBody> {
    match req.method {
        Method::GET | Method::HEAD if req.uri.path() == STREAM_PATH => {
            stream::get(req, state.root()).await
        }
        _ if req.uri.path() == STREAM_PATH => {
            log::warn!("{} {} -> [method not allowed]", req.method, req.uri);
            let mut resp = Response::new(body::empty());
            *resp.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
            resp.headers_mut()
                .typed_insert([Method::GET, Method::HEAD].into_iter().collect::<Allow>());
            resp
        }
        _ => {
            log::info!("{} {} -> [no route]", req.method, req.uri);
            let mut resp = Response::new(body::empty());
            *resp.status_mut() = StatusCode::NOT_FOUND;
            resp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::ALLOW;
    use std::fs;

    fn parts(method: Method, uri: &str) -> Parts {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    fn state_with_track() -> (tempfile::TempDir, State) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("track1.mp3"), vec![7u8; 1000]).unwrap();
        let state = State::new(dir.path().to_path_buf());
        (dir, state)
    }

    #[tokio::test]
    async fn stream_route() {
        let (_dir, state) = state_with_track();
        let resp = route(&parts(Method::GET, "/api/stream?song=track1.mp3"), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = route(&parts(Method::HEAD, "/api/stream?song=track1.mp3"), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn other_methods_not_allowed() {
        let (_dir, state) = state_with_track();
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let resp = route(&parts(method, "/api/stream?song=track1.mp3"), &state).await;
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
            let allow = resp.headers()[ALLOW].to_str().unwrap();
            assert!(allow.contains("GET") && allow.contains("HEAD"), "{}", allow);
        }
    }

    #[tokio::test]
    async fn unknown_paths() {
        let (_dir, state) = state_with_track();
        for uri in ["/", "/track1.mp3", "/api/stream/track1.mp3", "/api"] {
            let resp = route(&parts(Method::GET, uri), &state).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }
}
