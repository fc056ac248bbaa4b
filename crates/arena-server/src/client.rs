// crates/arena-server/src/client.rs
// Per-connection I/O: JSON lines or the terse text protocol, picked per client.

use anyhow::Result;
use arena_core::{ConnectionId, InputMessage, OutputMessage};
use arena_protocol::{csv_codec, json_codec};
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::types::{ClientRegistry, EngineRequest, EngineTx, OutboundRx};

/// Longest line we are willing to buffer before giving up on a client.
const MAX_LINE_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireFormat {
    Json,
    Text,
}

impl WireFormat {
    /// JSON messages always open with `{`; anything else is the text codec.
    fn detect(first_byte: u8) -> Self {
        if first_byte == b'{' {
            WireFormat::Json
        } else {
            WireFormat::Text
        }
    }

    fn decode(self, line: &str) -> Option<InputMessage> {
        match self {
            WireFormat::Json => match json_codec::decode_input(line) {
                Ok(msg) => Some(msg),
                Err(e) => {
                    warn!("dropping malformed JSON line {:?}: {}", line, e);
                    None
                }
            },
            WireFormat::Text => {
                let msg = csv_codec::parse_input_line(line);
                if msg.is_none() && !line.starts_with('#') {
                    warn!("dropping malformed text line {:?}", line);
                }
                msg
            }
        }
    }

    fn encode(self, msg: &OutputMessage) -> Result<String> {
        match self {
            WireFormat::Json => Ok(json_codec::encode_output(msg)?),
            WireFormat::Text => Ok(csv_codec::format_output(msg)),
        }
    }
}

/// Run the client I/O loop for a single connection.
///
/// Returns once the peer goes away; by then the client has been removed
/// from the registry and the engine has been told about the disconnect.
pub async fn run_client(
    connection_id: ConnectionId,
    stream: TcpStream,
    engine_tx: EngineTx,
    out_rx: OutboundRx,
    clients: ClientRegistry,
) -> Result<()> {
    let (mut read_half, write_half) = stream.into_split();

    // Peek at the first byte to pick the codec for both directions.
    let mut first_byte = [0u8; 1];
    let format = match read_half.peek(&mut first_byte).await {
        Ok(n) if n > 0 => WireFormat::detect(first_byte[0]),
        _ => WireFormat::Text,
    };
    debug!(connection = %connection_id, ?format, "protocol selected");

    tokio::spawn(run_writer(connection_id, write_half, out_rx, format));

    let result = run_reader(connection_id, &mut read_half, &engine_tx, format).await;

    // Deregister first so nothing more is routed to this client, then let
    // the engine clean up its queue slot or session.
    {
        let mut guard = clients.write().await;
        guard.remove(&connection_id);
    }
    let _ = engine_tx.send(EngineRequest {
        connection_id,
        msg: InputMessage::Disconnect,
    });

    result
}

async fn run_reader(
    connection_id: ConnectionId,
    read_half: &mut OwnedReadHalf,
    engine_tx: &EngineTx,
    format: WireFormat,
) -> Result<()> {
    let mut buffer = BytesMut::with_capacity(1024);

    loop {
        let n = read_half.read_buf(&mut buffer).await?;
        if n == 0 {
            // EOF - client disconnected
            return Ok(());
        }

        // Process complete lines
        while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
            let line = buffer.split_to(newline_pos + 1);
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            debug!(connection = %connection_id, "recv {}", line);

            if let Some(msg) = format.decode(line) {
                let req = EngineRequest { connection_id, msg };
                if engine_tx.send(req).is_err() {
                    warn!("Engine channel closed");
                    return Ok(());
                }
            }
        }

        if buffer.len() > MAX_LINE_LEN {
            anyhow::bail!("line exceeds {} bytes without a newline", MAX_LINE_LEN);
        }
    }
}

/// Consume `OutputMessage`s for this client and write them as lines.
///
/// Ends when the registry drops the sender or the socket fails.
async fn run_writer(
    connection_id: ConnectionId,
    mut write_half: OwnedWriteHalf,
    mut out_rx: OutboundRx,
    format: WireFormat,
) {
    while let Some(msg) = out_rx.recv().await {
        if let Err(e) = write_line(&mut write_half, &msg, format).await {
            warn!(connection = %connection_id, "write error: {:?}", e);
            break;
        }
    }
    info!(connection = %connection_id, "writer closed");
}

async fn write_line(stream: &mut OwnedWriteHalf, msg: &OutputMessage, format: WireFormat) -> Result<()> {
    let mut data = format.encode(msg)?;
    data.push('\n');

    stream.write_all(data.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
