use tokio::net::{UnixListener, UnixStream};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use std::future::Future;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::{bail, Result};
use draftseal_core::KeyVault;
use crate::handler::RequestHandler;
use crate::protocol::{Request, Response};

/// Longest request line accepted before the connection is dropped
pub const DEFAULT_MAX_REQUEST_LEN: usize = 8 * 1024 * 1024;

pub struct DaemonServer {
    socket_path: PathBuf,
    handler: RequestHandler,
    max_request_len: usize,
}

impl DaemonServer {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            handler: RequestHandler::new(Arc::new(KeyVault::new())),
            max_request_len: DEFAULT_MAX_REQUEST_LEN,
        }
    }

    pub fn with_max_request_len(mut self, max_request_len: usize) -> Self {
        self.max_request_len = max_request_len;
        self
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> Result<()> {
        self.run_until(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await
    }

    /// Serve until `shutdown` resolves, then remove the socket file
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        remove_stale_socket(&self.socket_path)?;

        let listener = UnixListener::bind(&self.socket_path)?;
        tracing::info!("Daemon listening on {}", self.socket_path.display());

        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down...");
                    break Ok(());
                }
                accepted = listener.accept() => {
                    let stream = match accepted {
                        Ok((stream, _)) => stream,
                        Err(e) => break Err(e.into()),
                    };
                    let handler = self.handler.clone();
                    let max_len = self.max_request_len;

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, handler, max_len).await {
                            tracing::error!("Connection handler error: {}", e);
                        }
                    });
                }
            }
        };

        if let Err(e) = std::fs::remove_file(&self.socket_path) {
            tracing::warn!("Failed to remove socket {}: {}", self.socket_path.display(), e);
        }

        result
    }
}

/// Remove a socket left behind by an earlier run. Anything other than a
/// socket at that path is left alone.
fn remove_stale_socket(path: &Path) -> Result<()> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if !metadata.file_type().is_socket() {
        bail!(
            "{} exists and is not a socket; refusing to remove it",
            path.display()
        );
    }

    tracing::debug!("Removing stale socket {}", path.display());
    std::fs::remove_file(path)?;
    Ok(())
}

async fn handle_connection(
    stream: UnixStream,
    handler: RequestHandler,
    max_len: usize,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    tracing::debug!("Client connected");

    loop {
        let limit = u64::try_from(max_len).unwrap_or(u64::MAX).saturating_add(1);
        if (&mut reader).take(limit).read_line(&mut line).await? == 0 {
            break;
        }

        // A complete line may use the extra byte for its newline
        if line.len() > max_len && !line.ends_with('\n') {
            tracing::warn!("Request exceeds {} bytes, closing connection", max_len);
            let response = Response::invalid_request(format!(
                "Request exceeds {} bytes",
                max_len
            ));
            let json = serde_json::to_string(&response)?;
            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            break;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let response = handler.handle(request);
                if let Some(kind) = &response.error_kind {
                    tracing::warn!("Request failed: {}", kind);
                }
                response
            }
            Err(e) => Response::invalid_request(format!("Invalid request: {}", e)),
        };

        let json = serde_json::to_string(&response)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;

        line.clear();
    }

    tracing::debug!("Client disconnected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ResponseResult;
    use tokio::sync::oneshot;

    async fn exchange(
        reader: &mut BufReader<tokio::net::unix::OwnedReadHalf>,
        writer: &mut tokio::net::unix::OwnedWriteHalf,
        request: &str,
    ) -> Response {
        writer.write_all(request.as_bytes()).await.unwrap();
        writer.write_all(b"\n").await.unwrap();

        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        serde_json::from_str(&line).unwrap()
    }

    async fn connect(path: &Path) -> UnixStream {
        for _ in 0..50 {
            if let Ok(stream) = UnixStream::connect(path).await {
                return stream;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("daemon did not start listening on {}", path.display());
    }

    #[tokio::test]
    async fn test_socket_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("draftseal.sock");

        let server = DaemonServer::new(&socket);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            server
                .run_until(async {
                    stop_rx.await.ok();
                })
                .await
        });

        let (reader, mut writer) = connect(&socket).await.into_split();
        let mut reader = BufReader::new(reader);

        let response = exchange(&mut reader, &mut writer, r#"{"operation":"generateKey"}"#).await;
        let key = match response.result {
            Some(ResponseResult::GenerateKey { key }) => key,
            other => panic!("unexpected result: {:?}", other),
        };

        let request = serde_json::json!({
            "operation": "encrypt",
            "data": { "plaintext": "hello world", "key": key },
        });
        let response = exchange(&mut reader, &mut writer, &request.to_string()).await;
        let envelope = match response.result {
            Some(ResponseResult::Encrypt { envelope }) => envelope,
            other => panic!("unexpected result: {:?}", other),
        };

        let request = serde_json::json!({
            "operation": "decrypt",
            "data": { "key": key, "envelope": envelope },
        });
        let response = exchange(&mut reader, &mut writer, &request.to_string()).await;
        match response.result {
            Some(ResponseResult::Decrypt { plaintext }) => assert_eq!(plaintext, "hello world"),
            other => panic!("unexpected result: {:?}", other),
        }

        // Garbage does not end the connection
        let response = exchange(&mut reader, &mut writer, "{not json").await;
        assert!(!response.success);
        assert_eq!(response.error_kind.as_deref(), Some("invalid_request"));

        let response = exchange(&mut reader, &mut writer, r#"{"operation":"generateKey"}"#).await;
        assert!(response.success);

        stop_tx.send(()).unwrap();
        task.await.unwrap().unwrap();
        assert!(!socket.exists());
    }

    #[tokio::test]
    async fn test_replaces_stale_socket() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("stale.sock");
        drop(std::os::unix::net::UnixListener::bind(&socket).unwrap());
        assert!(socket.exists());

        let server = DaemonServer::new(&socket);
        server.run_until(async {}).await.unwrap();

        assert!(!socket.exists());
    }

    #[tokio::test]
    async fn test_refuses_to_remove_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.key");
        std::fs::write(&path, b"not a socket").unwrap();

        let server = DaemonServer::new(&path);
        let err = server.run_until(async {}).await.unwrap_err();

        assert!(err.to_string().contains("not a socket"));
        assert_eq!(std::fs::read(&path).unwrap(), b"not a socket");
    }

    #[tokio::test]
    async fn test_oversized_request_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("limit.sock");

        let server = DaemonServer::new(&socket).with_max_request_len(64);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            server
                .run_until(async {
                    stop_rx.await.ok();
                })
                .await
        });

        let (reader, mut writer) = connect(&socket).await.into_split();
        let mut reader = BufReader::new(reader);

        // Requests under the limit are still served
        let response = exchange(&mut reader, &mut writer, r#"{"operation":"generateKey"}"#).await;
        assert!(response.success);

        let oversized = "x".repeat(1024);
        let response = exchange(&mut reader, &mut writer, &oversized).await;
        assert!(!response.success);
        assert_eq!(response.error_kind.as_deref(), Some("invalid_request"));

        // The connection is closed after the rejection
        let mut rest = String::new();
        assert_eq!(reader.read_line(&mut rest).await.unwrap(), 0);

        stop_tx.send(()).unwrap();
        task.await.unwrap().unwrap();
    }
}
