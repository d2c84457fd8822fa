/// Receives the generator's diagnostic messages.
///
/// The generator reports initialization, every generated ID, counter overflow
/// and clock regression as plain text. Where the text goes is the sink's
/// business. Any `Fn(&str) + Send + Sync` closure is a sink:
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use distid::LogSink;
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let sink = {
///     let lines = Arc::clone(&lines);
///     move |msg: &str| lines.lock().unwrap().push(msg.to_owned())
/// };
/// sink.log("hello");
/// assert_eq!(lines.lock().unwrap().as_slice(), ["hello"]);
/// ```
///
/// A sink that panics propagates the panic to the caller of the generator.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Forwards messages as `INFO` events on the `distid` target.
///
/// This is the default sink. Install a `tracing` subscriber (for example
/// `tracing_subscriber::fmt`) to get timestamped lines on a terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::info!(target: "distid", "{message}");
    }
}

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log(&self, _message: &str) {}
}
