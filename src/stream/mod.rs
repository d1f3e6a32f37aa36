use crate::body::{self, ResponseBody};
use crate::err::StreamError;
use headers::{AcceptRanges, ContentLength, ContentRange, HeaderMapExt, LastModified};
use http_body_util::BodyExt;
use hyper::header::{HeaderValue, CONTENT_TYPE, RANGE};
use hyper::http::request::Parts;
use hyper::{Method, Response, StatusCode, Uri};
use std::borrow::Cow;
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncSeekExt;

mod conditional;
mod path;
mod range;

#[allow(clippy::declare_interior_mutable_const)]
const AUDIO_MPEG: HeaderValue = HeaderValue::from_static("audio/mpeg");

pub async fn get(req: &Parts, root: &Path) -> Response<ResponseBody> {
    match serve(req, root).await {
        Ok(resp) => resp,
        Err(e) => {
            match &e {
                StreamError::NotFound { .. } | StreamError::NotAFile(_) => {
                    log::info!("{} {} -> [not found] {}", req.method, req.uri, e)
                }
                StreamError::PathTraversal(_) => {
                    log::warn!("{} {} -> [rejected] {}", req.method, req.uri, e)
                }
                StreamError::Io(_) => {
                    log::error!("{} {} -> [file error] {}", req.method, req.uri, e)
                }
                _ => log::info!("{} {} -> [{}]", req.method, req.uri, e),
            }
            error_response(&e)
        }
    }
}

fn error_response(e: &StreamError) -> Response<ResponseBody> {
    let mut resp = match e.public_message() {
        Some(message) => Response::new(body::text(message)),
        None => Response::new(body::empty()),
    };
    *resp.status_mut() = e.status();
    match *e {
        StreamError::RangeNotSatisfiable { size } => {
            resp.headers_mut()
                .typed_insert(ContentRange::unsatisfied_bytes(size));
        }
        StreamError::NotModified(modified) => {
            resp.headers_mut()
                .typed_insert(LastModified::from(modified));
        }
        _ => {}
    }
    resp
}

/// First `song` value of the query string, percent-decoded.
fn song_param(uri: &Uri) -> Option<Cow<'_, str>> {
    url::form_urlencoded::parse(uri.query()?.as_bytes())
        .find(|(key, _)| key == "song")
        .map(|(_, value)| value)
}

async fn serve(req: &Parts, root: &Path) -> Result<Response<ResponseBody>, StreamError> {
    let song = match song_param(&req.uri) {
        Some(song) if !song.is_empty() => song,
        _ => return Err(StreamError::BadRequest),
    };

    let path = path::resolve(root, &song)?;
    let mut file = match File::open(&path).await {
        Ok(file) => file,
        Err(source) => return Err(StreamError::NotFound { path, source }),
    };
    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(StreamError::NotAFile(path));
    }
    let size = metadata.len();
    let modified = metadata.modified().ok();

    conditional::check(&req.headers, &req.method, modified)?;

    let range = match req
        .headers
        .get(RANGE)
        .and_then(|h| h.to_str().ok())
        .and_then(range::parse)
    {
        Some(spec) if conditional::range_allowed(&req.headers, modified) => {
            match spec.resolve(size) {
                Some(range) => Some(range),
                None => return Err(StreamError::RangeNotSatisfiable { size }),
            }
        }
        _ => None,
    };

    let mut resp = Response::new(body::empty());
    resp.headers_mut().insert(CONTENT_TYPE, AUDIO_MPEG);
    resp.headers_mut().typed_insert(AcceptRanges::bytes());
    if let Some(modified) = modified {
        resp.headers_mut()
            .typed_insert(LastModified::from(modified));
    }

    let len = match range {
        Some(range) => {
            let content_range = ContentRange::bytes(range.start..=range.end, size)
                .map_err(|_| StreamError::RangeNotSatisfiable { size })?;
            if range.start > 0 {
                file.seek(SeekFrom::Start(range.start)).await?;
            }
            log::info!(
                "{} {} -> [found range {}..={} bytes of {}]",
                req.method,
                req.uri,
                range.start,
                range.end,
                size
            );
            *resp.status_mut() = StatusCode::PARTIAL_CONTENT;
            resp.headers_mut().typed_insert(content_range);
            range.len()
        }
        None => {
            log::info!("{} {} -> [found {} bytes]", req.method, req.uri, size);
            size
        }
    };
    resp.headers_mut().typed_insert(ContentLength(len));

    if req.method != Method::HEAD {
        *resp.body_mut() = body::from_file(file, len).boxed();
    }

    Ok(resp)
}
