use std::io::{self, Write};

use fstream_fs::{FileKind, FsError, PathRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> Self {
        match s {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// What to show for each record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Print attached file contents after the path.
    pub contents: bool,
}

/// Totals for the closing summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub errors: usize,
}

/// Sink for pipeline output. Records go to stdout, errors and the summary
/// to stderr.
pub trait RecordPrinter {
    fn record(&mut self, rec: &PathRecord) -> io::Result<()>;
    fn error(&mut self, err: &FsError) -> io::Result<()>;
    fn finish(&mut self, summary: Summary) -> io::Result<()>;
}

pub fn kind_label(rec: &PathRecord) -> &'static str {
    let Some(stat) = rec.link_stat().filter(|s| s.is_symbolic_link()).or(rec.stat()) else {
        return "unknown";
    };
    match stat.kind {
        k if k == FileKind::FILE => "file",
        k if k == FileKind::DIRECTORY => "dir",
        k if k == FileKind::SYMLINK => "symlink",
        k if k == FileKind::SOCKET => "socket",
        k if k == FileKind::FIFO => "fifo",
        k if k == FileKind::BLOCK_DEVICE => "block",
        k if k == FileKind::CHAR_DEVICE => "char",
        _ => "other",
    }
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        // Generic writers can't be probed for a TTY; Auto means no color.
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    #[inline]
    fn format_path(&self, rec: &PathRecord) -> String {
        let path = rec.path().display().to_string();
        let is_dir = rec.stat().is_some_and(|s| s.is_directory());
        match (self.use_color, is_dir) {
            (true, true) => format!("\x1b[34m{}\x1b[0m", path),
            (true, false) => format!("\x1b[32m{}\x1b[0m", path),
            (false, _) => path,
        }
    }
}

impl<W: Write, E: Write> RecordPrinter for HumanPrinter<W, E> {
    fn record(&mut self, rec: &PathRecord) -> io::Result<()> {
        let path = self.format_path(rec);
        match rec.stat() {
            Some(stat) if stat.is_file() => {
                writeln!(self.out, "{:>10}  {}", stat.size, path)?
            }
            Some(_) => writeln!(self.out, "{:>10}  {}", "-", path)?,
            None => writeln!(self.out, "{}", path)?,
        }

        if self.cfg.contents {
            if let Some(bytes) = rec.contents() {
                self.out.write_all(bytes)?;
                if !bytes.ends_with(b"\n") {
                    writeln!(self.out)?;
                }
            }
        }
        Ok(())
    }

    fn error(&mut self, err: &FsError) -> io::Result<()> {
        writeln!(self.err, "[error] {err}")
    }

    fn finish(&mut self, summary: Summary) -> io::Result<()> {
        self.out.flush()?;
        writeln!(
            self.err,
            "[done] {} record(s), {} error(s)",
            summary.records, summary.errors
        )
    }
}

#[derive(Debug, Serialize)]
struct RecordLine<'a> {
    path: String,
    name: &'a str,
    extension: &'a str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mtime: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ErrorLine {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    op: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    /// Create a printer that writes to stdout and stderr.
    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> RecordPrinter for JsonPrinter<W, E> {
    fn record(&mut self, rec: &PathRecord) -> io::Result<()> {
        let line = RecordLine {
            path: rec.path().display().to_string(),
            name: rec.name(),
            extension: rec.extension(),
            kind: kind_label(rec),
            size: rec.stat().map(|s| s.size),
            mtime: rec.stat().map(|s| s.mtime_secs()),
            text: if self.cfg.contents { rec.text() } else { None },
        };
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)
    }

    fn error(&mut self, err: &FsError) -> io::Result<()> {
        let line = ErrorLine {
            error: err.to_string(),
            op: err.op().map(|op| op.to_string()),
            path: err.path().map(|p| p.display().to_string()),
        };
        serde_json::to_writer(&mut self.err, &line)?;
        writeln!(self.err)
    }

    fn finish(&mut self, _summary: Summary) -> io::Result<()> {
        self.out.flush()
    }
}

pub fn make_printer(cfg: PrinterConfig) -> Box<dyn RecordPrinter> {
    match cfg.format {
        OutputFormat::Human => Box::new(HumanPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
        OutputFormat::Json => Box::new(JsonPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
