use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Body, Bytes, Frame};
use std::io;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

pub type ResponseBody = BoxBody<Bytes, io::Error>;

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

pub fn text(message: &'static str) -> ResponseBody {
    Full::new(Bytes::from_static(message.as_bytes()))
        .map_err(|never| match never {})
        .boxed()
}

/// Streams at most `len` bytes from the file's current position.
/// The file is closed when the body is finished or dropped.
pub fn from_file(file: File, len: u64) -> impl Body<Data = Bytes, Error = io::Error> {
    let stream = ReaderStream::with_capacity(file.take(len), 64 * 1024);
    StreamBody::new(stream.map_ok(Frame::data))
}
