use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::{
    filter::{FromEnvError, ParseError},
    fmt::{MakeWriter, Subscriber},
    EnvFilter,
};

pub const LOG_ENV: &str = "TASKBOARD_LOG";
const DEFAULT_LOG_FILE: &str = "taskboard.log";

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum LogType {
    File { path: PathBuf },
    Stdout,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub level: String,
    pub structured: bool,
    pub backend: LogType,
}

// The terminal UI owns stdout, so logs go to a file unless told otherwise.
impl Default for Log {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: false,
            backend: LogType::File {
                path: PathBuf::from(DEFAULT_LOG_FILE),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid log level: {0}")]
    Filter(#[from] ParseError),
    #[error("setting tracing default subscriber failed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

#[derive(Clone)]
enum LogWriter {
    Stdout,
    File(Arc<File>),
}

impl MakeWriter for LogWriter {
    type Writer = LogWriter;

    fn make_writer(&self) -> Self::Writer {
        self.clone()
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::Stdout => io::stdout().write(buf),
            LogWriter::File(file) => (&**file).write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::Stdout => io::stdout().flush(),
            LogWriter::File(file) => (&**file).flush(),
        }
    }
}

/// setup log from an optional environment filter and the config file
///
/// if the environment filter is present, then the configured level is not used
pub fn setup(
    env_filter: Result<EnvFilter, FromEnvError>,
    config: &Option<Log>,
) -> Result<(), LogError> {
    let fallback = Log::default();
    let config = config.as_ref().unwrap_or(&fallback);

    let filter = match env_filter {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };
    let (writer, ansi) = match &config.backend {
        LogType::Stdout => (LogWriter::Stdout, true),
        LogType::File { path } => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (LogWriter::File(Arc::new(file)), false)
        }
    };

    let sbuilder = Subscriber::builder()
        .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc3339())
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);
    if config.structured {
        tracing::subscriber::set_global_default(sbuilder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(sbuilder.finish())?;
    }
    Ok(())
}
