//! Loopback archive server and fixture helpers shared by refresh tests.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use zip::write::SimpleFileOptions;

/// Response the loopback server returns for every request.
#[derive(Clone)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
    /// Whether to announce `Content-Length`.
    pub content_length: bool,
}

impl Reply {
    /// 200 response carrying `body` with a content length.
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            content_length: true,
        }
    }
}

/// Build an in-memory zip from `(name, contents)` pairs.
pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, body) in files {
        zip.start_file(*name, options).expect("start file");
        zip.write_all(body.as_bytes()).expect("write entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

/// Write an archive built by [`zip_bytes`] to `path`.
pub fn write_zip(path: &Path, files: &[(&str, &str)]) {
    std::fs::write(path, zip_bytes(files)).expect("write zip");
}

/// GitHub-style archive: wrapper folder, bare English pages, a translation and clutter.
pub fn sample_archive() -> Vec<u8> {
    zip_bytes(&[
        ("tldr-main/README.md", "# tldr\n"),
        ("tldr-main/pages/common/git.md", "# git\n\n- Show version:\n\n`git {{[-v|--version]}}`\n"),
        ("tldr-main/pages/common/tar.md", "# tar\n"),
        ("tldr-main/pages/linux/ls.md", "# ls\n"),
        ("tldr-main/pages/osx/open.md", "# open\n"),
        ("tldr-main/pages.de/common/git.md", "# git\n\nDeutsch\n"),
        ("tldr-main/scripts/build.py", "print('x')\n"),
    ])
}

/// Consume the request head.
async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Error",
    }
}

async fn respond(mut stream: TcpStream, reply: Reply) {
    read_request(&mut stream).await;
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/zip\r\nConnection: close\r\n",
        reply.status,
        reason(reply.status)
    );
    if reply.content_length {
        head.push_str(&format!("Content-Length: {}\r\n", reply.body.len()));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes()).await;
    // Several writes so the client sees more than one chunk.
    for part in reply.body.chunks(512) {
        if stream.write_all(part).await.is_err() {
            return;
        }
        let _ = stream.flush().await;
    }
    let _ = stream.shutdown().await;
}

/// What: Serve `reply` on a loopback port until the test ends.
///
/// Inputs:
/// - `gate`: When set, each response waits until the channel holds `true`.
///
/// Output:
/// - URL of the archive.
pub async fn serve(reply: Reply, gate: Option<watch::Receiver<bool>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let reply = reply.clone();
            let gate = gate.clone();
            tokio::spawn(async move {
                if let Some(mut gate) = gate {
                    let _ = gate.wait_for(|open| *open).await;
                }
                respond(stream, reply).await;
            });
        }
    });
    format!("http://{addr}/tldr.zip")
}

/// What: Accept connections and never answer.
///
/// Output:
/// - URL whose requests stall until the client gives up.
pub async fn serve_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://{addr}/tldr.zip")
}

/// URL of a loopback port nobody listens on.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/tldr.zip")
}
