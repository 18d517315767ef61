use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(5);
const MAX_HEAD_BYTES: usize = 16_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ServerMode {
    /// Answers every request with `200 OK`.
    Ok,
    /// Reads the request and never answers until the server is dropped.
    Hang,
}

/// Method and headers of one received request. Header names are lowercased.
#[derive(Debug, Clone)]
pub(super) struct SeenRequest {
    pub(super) method: String,
    headers: BTreeMap<String, String>,
}

impl SeenRequest {
    pub(super) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

pub(super) struct TestServer {
    pub(super) url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TestServer {
    pub(super) fn seen(&self) -> Result<Vec<SeenRequest>, String> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .map_err(|err| format!("seen lock poisoned: {}", err))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

pub(super) fn spawn_server(mode: ServerMode) -> Result<TestServer, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let stop = Arc::new(AtomicBool::new(false));
    let thread_seen = Arc::clone(&seen);
    let thread_stop = Arc::clone(&stop);

    let handle = thread::spawn(move || {
        while !thread_stop.load(Ordering::SeqCst) {
            match listener.accept() {
                Ok((stream, _)) => {
                    let seen = Arc::clone(&thread_seen);
                    let stop = Arc::clone(&thread_stop);
                    thread::spawn(move || handle_client(stream, mode, &seen, &stop));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(POLL_INTERVAL);
                }
                Err(_) => break,
            }
        }
    });

    Ok(TestServer {
        url: format!("http://{}/", addr),
        seen,
        stop,
        thread: Some(handle),
    })
}

/// URL of a local port with nothing listening on it.
pub(super) fn refused_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

fn handle_client(
    mut stream: TcpStream,
    mode: ServerMode,
    seen: &Mutex<Vec<SeenRequest>>,
    stop: &AtomicBool,
) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    if let Ok(mut seen) = seen.lock() {
        seen.push(request);
    }

    match mode {
        ServerMode::Ok => {
            if stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK")
                .is_err()
            {
                return;
            }
            drop(stream.flush());
        }
        ServerMode::Hang => {
            while !stop.load(Ordering::SeqCst) {
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: &mut TcpStream) -> Option<SeenRequest> {
    let mut head = Vec::new();
    let mut buffer = [0u8; 1024];
    let head_end = loop {
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 {
            return None;
        }
        head.extend_from_slice(buffer.get(..read)?);
        if let Some(pos) = head.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos;
        }
        if head.len() > MAX_HEAD_BYTES {
            return None;
        }
    };

    let text = String::from_utf8_lossy(head.get(..head_end)?).into_owned();
    let mut lines = text.lines();
    let method = lines.next()?.split_whitespace().next()?.to_owned();
    let mut headers = BTreeMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_owned());
        }
    }
    let content_length = headers
        .get("content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end.saturating_add(4);
    let mut remaining = content_length.saturating_sub(head.len().saturating_sub(body_start));
    while remaining > 0 {
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 {
            break;
        }
        remaining = remaining.saturating_sub(read);
    }

    Some(SeenRequest { method, headers })
}
