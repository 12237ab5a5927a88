//! Newline-delimited JSON-RPC loop.
//!
//! Reads one message per line, answers on the writer, and stops at end of
//! input. Blank lines are ignored; a line that is not UTF-8 gets a parse
//! error like any other malformed message. Responses are flushed one by one so a
//! client waiting on a reply never stalls behind buffering.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::dispatcher::Dispatcher;
use crate::error::ServerError;
use crate::protocol::{Response, RpcError};

/// Serves requests from `reader` until it is exhausted.
///
/// # Examples
///
/// ```
/// use cm_catalog::PatternRegistry;
/// use cm_server::{Dispatcher, serve};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut dispatcher = Dispatcher::new(PatternRegistry::builtin()?, "/nonexistent");
/// let input: &[u8] = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
/// let mut output = Vec::new();
///
/// serve(&mut dispatcher, input, &mut output).await?;
/// assert_eq!(output, b"{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{}}\n");
/// # Ok(())
/// # }
/// ```
pub async fn serve<R, W>(
    dispatcher: &mut Dispatcher,
    mut reader: R,
    mut writer: W,
) -> Result<(), ServerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut handled = 0_u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                handled += 1;
                dispatcher.handle_message(line).await
            }
            Err(e) => {
                handled += 1;
                warn!(error = %e, "message is not valid UTF-8");
                Some(Response::failure(None, RpcError::parse_error(e)))
            }
        };
        let Some(response) = response else {
            continue;
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');

        if let Err(e) = write_all_flush(&mut writer, &payload).await {
            let error = ServerError::from(e);
            if error.is_disconnect() {
                debug!("client disconnected");
                break;
            }
            return Err(error);
        }
    }

    info!(messages = handled, "input closed, stopping server");
    Ok(())
}

async fn write_all_flush<W>(writer: &mut W, payload: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(payload).await?;
    writer.flush().await
}

/// Serves requests over the process's stdin and stdout.
///
/// Logging must not go to stdout while this runs.
pub async fn serve_stdio(dispatcher: &mut Dispatcher) -> Result<(), ServerError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    info!(framework = %dispatcher.framework(), "serving on stdio");
    serve(dispatcher, stdin, stdout).await
}
