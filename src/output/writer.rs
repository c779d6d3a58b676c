//! Diagnostic request/response blocks written to stderr

use std::io::{self, Write};

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::output::terminal;
use crate::sessions::headers::canonical_name;
use crate::sessions::HeaderSet;
use crate::strings::body_preview;

/// Width of the line separating the request from the response
pub const SEPARATOR_WIDTH: usize = 80;

/// Request bodies longer than this are cut in the preview
pub const BODY_PREVIEW_LIMIT: usize = 4096;

/// Writes the diagnostic block, optionally with ANSI colors
pub struct DiagnosticWriter<W: Write> {
    out: W,
    colors: bool,
}

impl<W: Write> DiagnosticWriter<W> {
    pub fn new(out: W, colors: bool) -> Self {
        Self { out, colors }
    }

    /// Request line, headers and body preview
    pub fn write_request(
        &mut self,
        method: &Method,
        url: &Url,
        headers: &HeaderSet,
        body: Option<&[u8]>,
    ) -> io::Result<()> {
        let method = if self.colors {
            terminal::http_method(method.as_str())
        } else {
            method.to_string()
        };
        writeln!(self.out, "{} {}", method, url)?;

        for (name, values) in headers.iter() {
            self.write_header(name, &values.join(" "))?;
        }

        if let Some(body) = body {
            writeln!(self.out)?;
            writeln!(self.out, "{}", body_preview(body, BODY_PREVIEW_LIMIT))?;
        }
        Ok(())
    }

    pub fn write_separator(&mut self) -> io::Result<()> {
        let line = "-".repeat(SEPARATOR_WIDTH);
        if self.colors {
            writeln!(self.out, "{}", terminal::muted(&line))
        } else {
            writeln!(self.out, "{}", line)
        }
    }

    /// Status line, then response headers in canonical form, then a blank line
    pub fn write_response(&mut self, status: StatusCode, headers: &HeaderMap) -> io::Result<()> {
        let line = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        if self.colors {
            writeln!(self.out, "{}", terminal::http_status(status.as_u16(), &line))?;
        } else {
            writeln!(self.out, "{}", line)?;
        }

        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            self.write_header(&canonical_name(name.as_str()), &value)?;
        }

        writeln!(self.out)?;
        self.out.flush()
    }

    /// Non-fatal problem, e.g. a JSON body that would not pretty-print
    pub fn write_warning(&mut self, message: &str) -> io::Result<()> {
        let message = format!("WARNING: {}", message);
        if self.colors {
            writeln!(self.out, "{}", terminal::warning(&message))
        } else {
            writeln!(self.out, "{}", message)
        }
    }

    /// Trailing newline after the body, for terminals that merge stdout and stderr
    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    fn write_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        if self.colors {
            writeln!(self.out, "{}: {}", terminal::label(name), value)
        } else {
            writeln!(self.out, "{}: {}", name, value)
        }
    }
}
