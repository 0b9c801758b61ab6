use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Optional log file shared between the subscriber and `set_log_file`.
///
/// Writes are dropped while no file is attached.
#[derive(Clone, Default)]
struct LogSink {
    file: Arc<Mutex<Option<File>>>,
}

impl LogSink {
    fn attach(&self, file: Option<File>) {
        if let Ok(mut slot) = self.file.lock() {
            *slot = file;
        }
    }
}

struct SinkWriter {
    sink: LogSink,
}

impl<'a> fmt::MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter { sink: self.clone() }
    }
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.sink.file.lock() {
            Ok(mut slot) => match slot.as_mut() {
                Some(file) => file.write(buf),
                None => Ok(buf.len()),
            },
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.sink.file.lock() {
            Ok(mut slot) => slot.as_mut().map_or(Ok(()), File::flush),
            Err(_) => Ok(()),
        }
    }
}

static LOG_SINK: OnceLock<LogSink> = OnceLock::new();

/// Installs the global subscriber: colored output on stderr plus a plain
/// copy for the log file. `RUST_LOG` overrides the `info` default.
pub fn init() {
    let _ = tracing_log::LogTracer::init();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let sink = LOG_SINK.get_or_init(LogSink::default).clone();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(sink))
        .try_init();
}

/// Points the file copy at `log_file`, or detaches it on `None`.
pub fn set_log_file(log_file: Option<&Path>) -> io::Result<()> {
    let file = log_file.map(open_log_file).transpose()?;
    LOG_SINK.get_or_init(LogSink::default).attach(file);
    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
