//! Worklog loader: one GET (or file read), decode, validate.

use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::config::DataSource;
use crate::error::LoadError;
use crate::models::{Roster, WorklogPayload};


/// Fetch the roster from a remote endpoint.
///
/// Exactly one attempt is made. Transport errors, non-2xx responses and
/// undecodable bodies are all reported as errors.
pub fn fetch_roster(url: &str, timeout: Duration) -> Result<Roster, LoadError> {
    debug!(url, ?timeout, "fetching worklog");

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;

    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status));
    }

    let body = response.text()?;
    let roster = parse_payload(&body)?;

    info!(url, developers = roster.len(), "worklog fetched");
    Ok(roster)
}


/// Read the roster from a JSON file with the same shape as the endpoint.
pub fn read_roster_file(path: &Path) -> Result<Roster, LoadError> {
    let body = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_payload(&body)
}


/// Decode and validate a `{ "AuthorWorklog": { "rows": [...] } }` body.
pub fn parse_payload(body: &str) -> Result<Roster, LoadError> {
    let payload: WorklogPayload = serde_json::from_str(body)?;
    let roster = payload.into_roster();
    validate_roster(&roster)?;
    Ok(roster)
}


/// Reject rosters containing count text that is not an integer.
pub fn validate_roster(roster: &Roster) -> Result<(), LoadError> {
    for developer in roster {
        for day in &developer.day_wise_activity {
            for item in day.metrics() {
                if item.parse_count().is_err() {
                    return Err(LoadError::InvalidCount {
                        developer: developer.name.clone(),
                        date: day.date.clone(),
                        label: item.label.clone(),
                        count: item.count.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}


/// Load the roster from whichever source is configured.
pub fn load(source: &DataSource) -> Result<Roster, LoadError> {
    match source {
        DataSource::Remote { url, timeout } => fetch_roster(url, *timeout),
        DataSource::File(path) => read_roster_file(path),
    }
}


/// Run [`load`] on a background thread.
///
/// The outcome is delivered once over the returned channel. If the receiver
/// has been dropped by the time the load finishes, the result is discarded.
pub fn spawn_load(source: DataSource) -> Receiver<Result<Roster, LoadError>> {
    spawn_load_worker(source).0
}


/// Background load whose handle reports whether the outcome was delivered.
fn spawn_load_worker(source: DataSource) -> (Receiver<Result<Roster, LoadError>>, JoinHandle<bool>) {
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let outcome = load(&source);
        if tx.send(outcome).is_err() {
            debug!("dashboard closed before the worklog arrived; dropping result");
            return false;
        }
        true
    });

    (rx, handle)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    const PAYLOAD: &str = r##"{
        "AuthorWorklog": {
            "rows": [
                {
                    "name": "alice",
                    "dayWiseActivity": [
                        {
                            "date": "2024-01-01",
                            "items": {
                                "children": [
                                    {"count": "5", "label": "Commits", "fillColor": "#FAC76E"},
                                    {"count": "2", "label": "PR Open", "fillColor": "#EF6B6B"}
                                ]
                            }
                        }
                    ]
                }
            ]
        }
    }"##;

    /// Serve a single canned HTTP response and return the URL to hit.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}/data", addr)
    }

    /// Like `serve_once`, but hold the response until `release` fires.
    fn serve_when_released(release: mpsc::Receiver<()>, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = release.recv();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}/data", addr)
    }

    #[test]
    fn test_parse_payload() {
        let roster = parse_payload(PAYLOAD).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].day_wise_activity[0].metrics().len(), 2);
    }

    #[test]
    fn test_parse_payload_missing_section() {
        let err = parse_payload(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_parse_payload_empty_rows() {
        let roster = parse_payload(r#"{"AuthorWorklog": {"rows": []}}"#).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_invalid_count_rejected() {
        let body = PAYLOAD.replace(r#""count": "5""#, r#""count": "lots""#);
        match parse_payload(&body) {
            Err(LoadError::InvalidCount { developer, label, count, .. }) => {
                assert_eq!(developer, "alice");
                assert_eq!(label, "Commits");
                assert_eq!(count, "lots");
            }
            other => panic!("expected InvalidCount, got {:?}", other),
        }
    }

    #[test]
    fn test_read_roster_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.json");
        std::fs::write(&path, PAYLOAD).unwrap();

        let roster = read_roster_file(&path).unwrap();
        assert_eq!(roster[0].name, "alice");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_roster_file(Path::new("/nonexistent/worklog.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_fetch_roster_success() {
        let url = serve_once("200 OK", PAYLOAD);
        let roster = fetch_roster(&url, Duration::from_secs(5)).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "alice");
    }

    #[test]
    fn test_fetch_roster_bad_status() {
        let url = serve_once("503 Service Unavailable", "{}");
        let err = fetch_roster(&url, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, LoadError::Status(status) if status.as_u16() == 503));
    }

    #[test]
    fn test_fetch_roster_bad_body() {
        let url = serve_once("200 OK", "<html>oops</html>");
        let err = fetch_roster(&url, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_fetch_roster_connection_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/data", port);

        let err = fetch_roster(&url, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, LoadError::Http(_)));
    }

    #[test]
    fn test_spawn_load_delivers_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.json");
        std::fs::write(&path, PAYLOAD).unwrap();

        let rx = spawn_load(DataSource::File(path));
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.unwrap().len(), 1);
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_spawn_load_discards_late_result() {
        let (release, gate) = mpsc::channel();
        let url = serve_when_released(gate, PAYLOAD);

        let (rx, handle) = spawn_load_worker(DataSource::remote(url));
        drop(rx);
        release.send(()).unwrap();

        let delivered = handle.join().expect("loader thread panicked");
        assert!(!delivered);
    }
}
