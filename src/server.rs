//! Single-threaded HTTP front end.
//!
//! One connection at a time: read the request head, render, write, close.
//! Reads and writes are bounded by the configured I/O timeout.
//!
//! Endpoints:
//!   GET /                - first page of the menu
//!   GET /pages/<slug>    - a specific page
//!   GET /api/health      - health check
//!   GET /api/artifacts   - status of every chart the pages reference

use anyhow::{Context, Result};
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Instant;
use url::Url;

const MAX_HEADER_LINES: usize = 100;

use crate::artifact::{ArtifactReader, ArtifactSource, FsSource};
use crate::config::DashboardConfig;
use crate::html::{render_document, DocumentMeta};
use crate::logging::{log, log_request, obj, v_str, Domain, Level};
use crate::nav::{NavigationShell, Session};
use crate::render::render_page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", body }
    }

    fn json(body: String) -> Self {
        Self { status: 200, content_type: "application/json", body }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            _ => "Internal Server Error",
        }
    }

    pub fn to_http(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            self.status,
            self.reason(),
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub struct Dashboard<S = FsSource> {
    config: DashboardConfig,
    shell: NavigationShell,
    reader: ArtifactReader<S>,
    session: Session,
}

impl Dashboard<FsSource> {
    pub fn from_config(config: DashboardConfig) -> Self {
        let reader = ArtifactReader::new(config.output_dir.clone());
        Self::new(config, NavigationShell::movielens(), reader)
    }
}

impl<S: ArtifactSource> Dashboard<S> {
    fn new(config: DashboardConfig, shell: NavigationShell, reader: ArtifactReader<S>) -> Self {
        Self {
            config,
            shell,
            reader,
            session: Session::default(),
        }
    }

    pub fn reader(&self) -> &ArtifactReader<S> {
        &self.reader
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Renders the page with `slug` as a full HTML document.
    /// `Ok(None)` means no such page.
    pub fn render_html(&mut self, slug: &str) -> Result<Option<String>> {
        let Some(entry) = self.shell.select(slug) else {
            return Ok(None);
        };
        let rendered = render_page(&entry.page, &mut self.reader)?;
        if let Some(previous) = self.session.select(&self.shell, slug) {
            log(
                Level::Debug,
                Domain::Render,
                "page_selected",
                obj(&[
                    ("page", v_str(slug)),
                    ("previous", previous.map(v_str).unwrap_or(serde_json::Value::Null)),
                ]),
            );
        }
        let meta = DocumentMeta {
            app_title: &self.config.title,
            layout: self.config.layout,
        };
        Ok(Some(render_document(&meta, &self.shell, &rendered)))
    }

    pub fn handle(&mut self, method: &str, target: &str) -> Response {
        if method != "GET" {
            return Response::text(405, "Method Not Allowed");
        }
        let Some(path) = request_path(target) else {
            return Response::text(400, "Bad Request");
        };

        match path.as_str() {
            "/api/health" => Response::json(json!({"status": "ok"}).to_string()),
            "/api/artifacts" => self.artifacts_response(),
            "/" => match self.shell.default_entry().map(|e| e.page.slug) {
                Some(slug) => self.page_response(slug),
                None => Response::text(404, "Not Found"),
            },
            other => match other.strip_prefix("/pages/") {
                Some(slug) if !slug.is_empty() => self.page_response(slug.trim_end_matches('/')),
                _ => Response::text(404, "Not Found"),
            },
        }
    }

    fn page_response(&mut self, slug: &str) -> Response {
        match self.render_html(slug) {
            Ok(Some(doc)) => Response::html(doc),
            Ok(None) => Response::text(404, "Not Found"),
            Err(err) => internal_error(&err),
        }
    }

    fn artifacts_response(&mut self) -> Response {
        let mut statuses = Vec::new();
        for name in self.shell.artifacts() {
            match self.reader.describe(name) {
                Ok(status) => statuses.push(status),
                Err(err) => return internal_error(&err),
            }
        }
        match serde_json::to_string(&statuses) {
            Ok(body) => Response::json(body),
            Err(err) => internal_error(&anyhow::Error::from(err)),
        }
    }

    pub fn serve(&mut self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind)
            .with_context(|| format!("failed to bind {}", self.config.bind))?;
        self.serve_on(listener)
    }

    /// Accept loop over an already bound listener.
    pub fn serve_on(&mut self, listener: TcpListener) -> Result<()> {
        let addr = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| self.config.bind.clone());
        log(
            Level::Info,
            Domain::System,
            "listening",
            obj(&[
                ("addr", v_str(&addr)),
                ("output_dir", v_str(&self.config.output_dir.display().to_string())),
            ]),
        );
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(err) = self.handle_connection(stream) {
                        log(
                            Level::Warn,
                            Domain::Http,
                            "connection_error",
                            obj(&[("error", v_str(&format!("{:#}", err)))]),
                        );
                    }
                }
                Err(_) => continue,
            }
        }
        Ok(())
    }

    fn handle_connection(&mut self, mut stream: TcpStream) -> Result<()> {
        let started = Instant::now();
        // an idle client must not hold the loop
        stream
            .set_read_timeout(Some(self.config.io_timeout))
            .context("failed to set read timeout")?;
        stream
            .set_write_timeout(Some(self.config.io_timeout))
            .context("failed to set write timeout")?;

        let mut request_line = String::new();
        {
            let mut reader = BufReader::new(&stream);
            reader
                .read_line(&mut request_line)
                .context("failed to read request line")?;
            drain_headers(&mut reader).context("failed to read request headers")?;
        }

        let mut parts = request_line.split_whitespace();
        let (method, target) = match (parts.next(), parts.next()) {
            (Some(m), Some(t)) => (m.to_string(), t.to_string()),
            _ => return Ok(()),
        };

        let response = self.handle(&method, &target);
        stream
            .write_all(response.to_http().as_bytes())
            .context("failed to write response")?;
        log_request(
            &method,
            &target,
            response.status,
            started.elapsed().as_secs_f64() * 1000.0,
        );
        Ok(())
    }
}

/// Consumes header lines up to the blank line ending the request head.
fn drain_headers<R: BufRead>(reader: &mut R) -> std::io::Result<()> {
    let mut line = String::new();
    for _ in 0..MAX_HEADER_LINES {
        line.clear();
        if reader.read_line(&mut line)? == 0 || line.trim_end().is_empty() {
            return Ok(());
        }
    }
    Ok(())
}

fn request_path(target: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    base.join(target).ok().map(|u| u.path().to_string())
}

fn internal_error(err: &anyhow::Error) -> Response {
    log(
        Level::Error,
        Domain::Render,
        "render_failed",
        obj(&[("error", v_str(&format!("{:#}", err)))]),
    );
    Response::text(500, &format!("Internal Server Error: {:#}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dashboard(dir: &TempDir) -> Dashboard {
        Dashboard::from_config(DashboardConfig::with_output_dir(dir.path()))
    }

    #[test]
    fn request_path_drops_query() {
        assert_eq!(request_path("/pages/tags?x=1").as_deref(), Some("/pages/tags"));
        assert_eq!(request_path("/").as_deref(), Some("/"));
    }

    #[test]
    fn routes() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&dir);
        assert_eq!(dash.handle("GET", "/api/health").status, 200);
        assert_eq!(dash.handle("GET", "/").status, 200);
        assert_eq!(dash.handle("GET", "/pages/films").status, 200);
        assert_eq!(dash.handle("GET", "/pages/films/").status, 200);
        assert_eq!(dash.handle("GET", "/pages/unknown").status, 404);
        assert_eq!(dash.handle("GET", "/pages/").status, 404);
        assert_eq!(dash.handle("GET", "/favicon.ico").status, 404);
        assert_eq!(dash.handle("POST", "/").status, 405);
    }

    #[test]
    fn root_renders_first_page_and_updates_session() {
        let dir = TempDir::new().unwrap();
        let mut dash = dashboard(&dir);
        assert_eq!(dash.session().current(), None);
        let resp = dash.handle("GET", "/");
        assert!(resp.body.contains("Analyse générale des films et évaluations"));
        assert_eq!(dash.session().current(), Some("vue-ensemble"));
        dash.handle("GET", "/pages/tags");
        assert_eq!(dash.session().current(), Some("tags"));
    }

    #[test]
    fn artifacts_endpoint_reports_presence() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("top_tags.html"), "<b>tags</b>").unwrap();
        let mut dash = dashboard(&dir);
        let resp = dash.handle("GET", "/api/artifacts");
        assert_eq!(resp.status, 200);
        let parsed: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[3]["name"], "top_tags");
        assert_eq!(items[3]["present"], true);
        assert_eq!(items[3]["bytes"], 11);
        assert_eq!(items[0]["present"], false);
        assert_eq!(dash.reader().cached("top_tags"), Some(Some("<b>tags</b>")));
    }

    #[test]
    fn drain_headers_stops_at_blank_line() {
        let raw = "Host: localhost\r\nAccept: */*\r\n\r\nbody";
        let mut reader = std::io::Cursor::new(raw.as_bytes());
        drain_headers(&mut reader).unwrap();
        let mut rest = String::new();
        std::io::Read::read_to_string(&mut reader, &mut rest).unwrap();
        assert_eq!(rest, "body");
    }

    #[test]
    fn http_framing() {
        let resp = Response::text(404, "Not Found");
        let raw = resp.to_http();
        assert!(raw.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(raw.contains("Content-Length: 9\r\n"));
        assert!(raw.ends_with("\r\n\r\nNot Found"));
    }
}
