//! Free-text console channel over an arbitrary byte stream
//!
//! Operator chat alongside the keyed signal; not part of the timing engine.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Write one operator message, CRLF-terminated
pub async fn send_line<W>(writer: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await
}

/// Forward incoming text chunks until the stream ends.
///
/// Chunks arrive as they are read, not line-buffered, matching how a serial
/// console delivers partial lines.
pub fn spawn_read_task<R>(mut reader: R) -> (mpsc::UnboundedReceiver<String>, JoinHandle<()>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        let mut buf = [0u8; 256];
        let mut pending: Vec<u8> = Vec::new();
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    pending.extend_from_slice(&buf[..n]);
                    let cut = complete_utf8_len(&pending);
                    if cut == 0 {
                        continue;
                    }
                    let chunk = String::from_utf8_lossy(&pending[..cut]).into_owned();
                    pending.drain(..cut);
                    if tx.send(chunk).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "console read failed");
                    break;
                }
            }
        }
        if !pending.is_empty() {
            // truncated trailing sequence at EOF
            let _ = tx.send(String::from_utf8_lossy(&pending).into_owned());
        }
        debug!("console read task finished");
    });
    (rx, handle)
}

/// Length of the prefix that ends on a UTF-8 character boundary. A
/// multi-byte sequence still missing its continuation bytes is held back
/// so a later read can complete it.
fn complete_utf8_len(buf: &[u8]) -> usize {
    for i in (buf.len().saturating_sub(3)..buf.len()).rev() {
        let lead = buf[i];
        let need = match lead {
            0xF0..=0xF7 => 4,
            0xE0..=0xEF => 3,
            0xC0..=0xDF => 2,
            0x80..=0xBF => continue,
            _ => break,
        };
        if buf.len() - i < need {
            return i;
        }
        break;
    }
    buf.len()
}
