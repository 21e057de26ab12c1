//! One-off background download of the cube texture.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use spincube_engine::world::{TextureError, TextureImage};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] TextureError),

    #[error("fetch thread exited without a result")]
    Disconnected,
}

/// Handle to a texture being fetched on a worker thread.
///
/// `http(s)://` URLs are downloaded with a blocking `reqwest` client;
/// `file://` URLs and bare paths are read from disk.
pub struct TextureFetch {
    url: String,
    rx: Receiver<Result<TextureImage, FetchError>>,
}

impl TextureFetch {
    pub fn spawn(url: impl Into<String>) -> std::io::Result<Self> {
        let url = url.into();
        let (tx, rx) = mpsc::channel();

        let worker_url = url.clone();
        thread::Builder::new().name("texture-fetch".to_string()).spawn(move || {
            // The receiver may be gone if the window already closed.
            let _ = tx.send(load(&worker_url));
        })?;

        log::debug!("fetching texture {url}");
        Ok(Self { url, rx })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Non-blocking check for the result. Drop the handle after the first
    /// `Some`; later polls report `Disconnected`.
    pub fn poll(&self) -> Option<Result<TextureImage, FetchError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(FetchError::Disconnected)),
        }
    }
}

/// Loads and decodes the image at `url`, blocking the caller.
pub fn load(url: &str) -> Result<TextureImage, FetchError> {
    let bytes = if url.starts_with("http://") || url.starts_with("https://") {
        let response = reqwest::blocking::get(url)?.error_for_status()?;
        response.bytes()?.to_vec()
    } else {
        let path = url.strip_prefix("file://").unwrap_or(url);
        std::fs::read(path).map_err(|source| FetchError::Io { path: path.to_string(), source })?
    };
    Ok(TextureImage::decode(&bytes)?)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load("file:///definitely/not/here/star.png").unwrap_err();
        assert!(matches!(err, FetchError::Io { ref path, .. } if path == "/definitely/not/here/star.png"));
    }

    #[test]
    fn undecodable_bytes_are_a_decode_error() {
        let path = std::env::temp_dir().join(format!("spincube-bad-{}.png", std::process::id()));
        std::fs::write(&path, b"not an image").unwrap();

        let err = load(path.to_str().unwrap()).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn worker_result_arrives_through_poll() {
        let fetch = TextureFetch::spawn("file:///definitely/not/here/star.png").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let result = loop {
            if let Some(result) = fetch.poll() {
                break result;
            }
            assert!(Instant::now() < deadline, "fetch never finished");
            std::thread::sleep(Duration::from_millis(5));
        };
        assert!(result.is_err());
        assert_eq!(fetch.url(), "file:///definitely/not/here/star.png");
    }
}
