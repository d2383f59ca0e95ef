//! Destinations of the structured sink.
//!
//! # Responsibilities
//! - Console output (stdout or an injected writer)
//! - Appending to a log file, flushed on close
//! - Shipping records to a remote log collector
//! - Turning a `TransportConfig` into transports

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use url::Url;

use crate::config::{CollectorConfig, TransportConfig};
use crate::error::{LoggerError, LoggerResult};
use crate::sink::output::LineOutput;
use crate::sink::Record;

/// A destination for rendered lines.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Deliver one record; `line` is its rendered form.
    fn log(&self, record: &Record, line: &str) -> io::Result<()>;

    /// Flush and release the destination.
    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each line to a console-like output.
#[derive(Debug)]
pub struct ConsoleTransport {
    out: LineOutput,
}

impl ConsoleTransport {
    pub fn stdout() -> Self {
        Self {
            out: LineOutput::stdout(),
        }
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: LineOutput::new(writer),
        }
    }
}

impl Transport for ConsoleTransport {
    fn log(&self, _record: &Record, line: &str) -> io::Result<()> {
        self.out.write_line(line)
    }

    fn close(&self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Appends lines to a file.
#[derive(Debug)]
pub struct FileTransport {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileTransport {
    /// Open (or create) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::debug!(path = ?path, "Log file opened");
        Ok(Self {
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transport for FileTransport {
    fn log(&self, _record: &Record, line: &str) -> io::Result<()> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("log file mutex poisoned"))?;
        match guard.as_mut() {
            Some(writer) => writeln!(writer, "{}", line),
            // Closed: the handle is gone, drop the line.
            None => Ok(()),
        }
    }

    fn close(&self) -> io::Result<()> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("log file mutex poisoned"))?;
        if let Some(mut writer) = guard.take() {
            writer.flush()?;
            tracing::debug!(path = ?self.path, "Log file closed");
        }
        Ok(())
    }
}

/// Posts each record as JSON to a remote collector.
#[derive(Debug)]
pub struct CollectorTransport {
    endpoint: Url,
    client: reqwest::blocking::Client,
}

impl CollectorTransport {
    pub fn new(config: &CollectorConfig) -> LoggerResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LoggerError::InvalidTransport(format!("collector client: {}", e)))?;
        Self::with_client(config, client)
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, timeouts).
    pub fn with_client(config: &CollectorConfig, client: reqwest::blocking::Client) -> LoggerResult<Self> {
        let endpoint = collector_url(config)?;
        tracing::debug!(endpoint = %endpoint, "Log collector transport created");
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for CollectorTransport {
    fn log(&self, record: &Record, _line: &str) -> io::Result<()> {
        self.client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .and_then(|res| res.error_for_status())
            .map(|_| ())
            .map_err(io::Error::other)
    }
}

fn collector_url(config: &CollectorConfig) -> LoggerResult<Url> {
    let scheme = if config.ssl { "https" } else { "http" };
    let mut url = Url::parse(&format!("{}://{}", scheme, config.host))
        .map_err(|e| LoggerError::InvalidTransport(format!("collector host '{}': {}", config.host, e)))?;
    url.set_path(&config.path);
    Ok(url)
}

/// Build the transports described by `config`.
pub fn build_transports(config: &TransportConfig) -> LoggerResult<Vec<Box<dyn Transport>>> {
    let mut transports = Vec::new();
    collect_transports(config, &mut transports)?;
    Ok(transports)
}

fn collect_transports(config: &TransportConfig, out: &mut Vec<Box<dyn Transport>>) -> LoggerResult<()> {
    match config {
        TransportConfig::Named(name) if name == "console" => {
            out.push(Box::new(ConsoleTransport::stdout()));
        }
        TransportConfig::Named(path) if path.contains('.') => {
            out.push(Box::new(FileTransport::open(path)?));
        }
        TransportConfig::Named(other) => {
            return Err(LoggerError::InvalidTransport(format!(
                "'{}' is neither 'console' nor a file path",
                other
            )));
        }
        TransportConfig::Collector { collector } => {
            out.push(Box::new(CollectorTransport::new(collector)?));
        }
        TransportConfig::List(items) => {
            for item in items {
                collect_transports(item, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    fn record() -> Record {
        Record::at("2024-01-01T00:00:00.000Z", "App", Severity::Info, "hello")
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("aio-logging-{}-{}.log", name, std::process::id()))
    }

    #[test]
    fn test_file_transport_appends_and_closes() {
        let path = temp_path("transport");
        let _ = std::fs::remove_file(&path);

        let transport = FileTransport::open(&path).unwrap();
        transport.log(&record(), "first").unwrap();
        transport.log(&record(), "second").unwrap();
        transport.close().unwrap();
        transport.close().unwrap();
        // Dropped after close.
        transport.log(&record(), "third").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_collector_url() {
        let config = CollectorConfig {
            host: "logs.example.com:8443".into(),
            path: "/ingest".into(),
            ssl: true,
        };
        assert_eq!(
            collector_url(&config).unwrap().as_str(),
            "https://logs.example.com:8443/ingest"
        );

        let plain = CollectorConfig {
            ssl: false,
            ..config
        };
        assert_eq!(collector_url(&plain).unwrap().scheme(), "http");
    }

    #[test]
    fn test_build_rejects_unknown_name() {
        let err = build_transports(&TransportConfig::Named("syslog".into())).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidTransport(_)));
    }

    #[test]
    fn test_build_list() {
        let path = temp_path("list");
        let config = TransportConfig::List(vec![
            TransportConfig::Named("console".into()),
            TransportConfig::Named(path.to_string_lossy().into_owned()),
        ]);
        let transports = build_transports(&config).unwrap();
        assert_eq!(transports.len(), 2);
        for t in &transports {
            t.close().unwrap();
        }
        std::fs::remove_file(&path).unwrap_or_default();
    }
}
