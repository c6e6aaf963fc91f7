use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::{self, RecvTimeoutError, TrySendError};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use super::RenderSink;
use crate::pixel::Pixel;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);
const IO_TIMEOUT: Duration = Duration::from_secs(2);
/// How long dropping the sink waits for the worker before detaching it.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);
/// Frames waiting for the worker; beyond this new frames are dropped.
const FRAME_QUEUE_DEPTH: usize = 8;
const DEFAULT_HTTP_PORT: u16 = 80;

/// Plain `http://host[:port][/path]` target.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Endpoint {
    host: String,
    port: u16,
    path: String,
}

impl Endpoint {
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EndpointError {
    #[error("endpoint {0:?} must start with http://")]
    UnsupportedScheme(String),

    #[error("endpoint {0:?} has no host")]
    MissingHost(String),

    #[error("endpoint {0:?} has an invalid port")]
    InvalidPort(String),
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let rest = raw
            .strip_prefix("http://")
            .ok_or_else(|| EndpointError::UnsupportedScheme(raw.to_owned()))?;

        let (authority, path) = match rest.find('/') {
            Some(index) => rest.split_at(index),
            None => (rest, "/"),
        };

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|_| EndpointError::InvalidPort(raw.to_owned()))?;
                (host, port)
            }
            None => (authority, DEFAULT_HTTP_PORT),
        };

        if host.is_empty() {
            return Err(EndpointError::MissingHost(raw.to_owned()));
        }

        Ok(Self {
            host: host.to_owned(),
            port,
            path: path.to_owned(),
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}{}", self.host, self.port, self.path)
    }
}

#[derive(Serialize)]
struct FramePayload<'a> {
    cells: &'a [Pixel],
}

#[derive(Debug, Error)]
enum PostError {
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Request(#[from] Box<ureq::Error>),
}

/// Posts every frame as `{"cells": [...]}` JSON to an HTTP endpoint.
///
/// Requests go out from a worker thread in the order frames were drawn;
/// `draw` only queues and never blocks. When the server falls behind, the
/// worker skips to the newest queued frame and frames drawn into a full
/// queue are dropped. Failed requests are logged and dropped.
pub struct HttpSink {
    sender: Option<mpsc::SyncSender<Vec<Pixel>>>,
    stopped: mpsc::Receiver<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl HttpSink {
    /// Starts the worker thread for `endpoint`.
    #[must_use]
    pub fn spawn(endpoint: Endpoint) -> Self {
        let (tx, rx) = mpsc::sync_channel::<Vec<Pixel>>(FRAME_QUEUE_DEPTH);
        let (stopped_tx, stopped) = mpsc::channel();
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(IO_TIMEOUT)
            .timeout_write(IO_TIMEOUT)
            .build();

        let handle = thread::spawn(move || {
            let url = endpoint.to_string();
            let mut sent = 0_u64;
            while let Ok(mut pixels) = rx.recv() {
                while let Ok(newer) = rx.try_recv() {
                    pixels = newer;
                }
                match post_frame(&agent, &url, &pixels) {
                    Ok(()) => sent += 1,
                    Err(e) => warn!("failed to post frame to {url}: {e}"),
                }
            }
            debug!("http sink stopped after {sent} frames");
            let _ = stopped_tx.send(());
        });

        Self {
            sender: Some(tx),
            stopped,
            handle: Some(handle),
        }
    }
}

impl RenderSink for HttpSink {
    fn draw(&mut self, pixels: Vec<Pixel>) {
        let Some(ref tx) = self.sender else {
            return;
        };
        if let Err(TrySendError::Full(_)) = tx.try_send(pixels) {
            debug!("display server is behind, dropping frame");
        }
    }
}

impl Drop for HttpSink {
    /// Closes the queue and gives the worker `SHUTDOWN_GRACE` to finish the
    /// frame in flight. A worker still stuck after that is detached.
    fn drop(&mut self) {
        self.sender.take();
        match self.stopped.recv_timeout(SHUTDOWN_GRACE) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(handle) = self.handle.take() {
                    let _ = handle.join();
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("display server did not answer in time, abandoning queued frames");
            }
        }
    }
}

fn post_frame(agent: &ureq::Agent, url: &str, pixels: &[Pixel]) -> Result<(), PostError> {
    let body = serde_json::to_vec(&FramePayload { cells: pixels })?;

    agent
        .post(url)
        .set("Content-Type", "application/json")
        .send_bytes(&body)
        .map_err(Box::new)?;

    Ok(())
}
