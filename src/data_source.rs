use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::http_client::{get_text, http_client};

/// Something that can hand back a static document by its site-relative
/// path (`./data/serie-a-data.json`).
pub trait DataSource: Send {
    fn fetch_text(&self, path: &str) -> Result<String>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct LocalDir {
    root: PathBuf,
}

impl LocalDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(relative(path))
    }
}

impl DataSource for LocalDir {
    fn fetch_text(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);
        fs::read_to_string(&full).with_context(|| format!("failed reading {}", full.display()))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HttpBase {
    base: String,
    timeout: Duration,
}

impl HttpBase {
    pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base, relative(path))
    }
}

impl DataSource for HttpBase {
    fn fetch_text(&self, path: &str) -> Result<String> {
        let client = http_client(self.timeout)?;
        let url = self.url_for(path);
        get_text(client, &url).with_context(|| format!("fetch {url}"))
    }

    fn describe(&self) -> String {
        self.base.clone()
    }
}

/// Picks an HTTP source for `http://`/`https://` roots, a directory otherwise.
pub fn from_root(root: &str, timeout: Duration) -> Box<dyn DataSource> {
    let lower = root.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpBase::new(root, timeout))
    } else {
        Box::new(LocalDir::new(root))
    }
}

fn relative(path: &str) -> &str {
    path.trim_start_matches("./").trim_start_matches('/')
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use super::*;
    use crate::league::LEAGUES;
    use crate::provider::handle_command;
    use crate::state::{Delta, ProviderCommand};

    /// Answers the next `connections` requests with 404 and returns the base URL.
    fn serve_not_found(connections: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let addr = listener.local_addr().expect("listener address");
        thread::spawn(move || {
            for stream in listener.incoming().take(connections) {
                let Ok(mut stream) = stream else {
                    continue;
                };
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
                let mut line = String::new();
                while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
                    if line == "\r\n" {
                        break;
                    }
                    line.clear();
                }
                let _ = stream.write_all(
                    b"HTTP/1.1 404 Not Found\r\n\
                      Content-Length: 9\r\n\
                      Connection: close\r\n\r\n\
                      not found",
                );
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn local_dir_strips_dot_prefix() {
        let src = LocalDir::new("/srv/site");
        assert_eq!(
            src.resolve("./data/la-liga-data.json"),
            PathBuf::from("/srv/site/data/la-liga-data.json")
        );
    }

    #[test]
    fn http_base_joins_without_double_slash() {
        let src = HttpBase::new("https://stats.example.org/site/", Duration::from_secs(5));
        assert_eq!(
            src.url_for("./data/bundesliga-leaderboard.json"),
            "https://stats.example.org/site/data/bundesliga-leaderboard.json"
        );
    }

    #[test]
    fn from_root_picks_by_scheme() {
        let timeout = Duration::from_secs(5);
        assert_eq!(from_root("HTTPS://a.example", timeout).describe(), "HTTPS://a.example");
        assert_eq!(from_root("./public", timeout).describe(), "./public");
    }

    #[test]
    fn http_not_found_is_an_error() {
        let base = serve_not_found(1);
        let src = HttpBase::new(base, Duration::from_secs(5));
        let err = src
            .fetch_text("./data/serie-a-data.json")
            .expect_err("404 must fail");
        let msg = format!("{err:#}");
        assert!(msg.contains("404"), "{msg}");
        assert!(msg.contains("/data/serie-a-data.json"), "{msg}");
    }

    #[test]
    fn http_not_found_becomes_warning_logs() {
        let base = serve_not_found(2);
        let src = HttpBase::new(base, Duration::from_secs(5));
        let (tx, rx) = mpsc::channel();
        let cmd = ProviderCommand::FetchLeague {
            generation: 1,
            league: LEAGUES[0],
        };
        assert!(handle_command(&src, cmd, &tx));
        drop(tx);

        let logs = rx
            .into_iter()
            .map(|delta| match delta {
                Delta::Log(msg) => msg,
                other => panic!("expected only log deltas, got {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|l| l.starts_with("[WARN]") && l.contains("404")));
    }
}
