use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::sync::Mutex;

type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;

/// Shared line reader over stdin.
///
/// The shell loop and the delete confirmation both read answers from the
/// same stream, so they share one buffered reader.
#[derive(Clone)]
pub struct LineSource {
    lines: Arc<Mutex<Lines<BufReader<BoxedReader>>>>,
}

impl LineSource {
    pub fn stdin() -> Self {
        Self::from_reader(tokio::io::stdin())
    }

    pub fn from_reader<R: AsyncRead + Send + Unpin + 'static>(reader: R) -> Self {
        let boxed: BoxedReader = Box::new(reader);
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(boxed).lines())),
        }
    }

    /// Next line without its terminator, or `None` at EOF or on a read error.
    pub async fn next_line(&self) -> Option<String> {
        self.lines.lock().await.next_line().await.ok().flatten()
    }
}
