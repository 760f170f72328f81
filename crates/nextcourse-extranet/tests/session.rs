//! Session state-machine tests against a minimal in-process portal.
//!
//! The client is synchronous and single-connection, so a bare TCP stub that
//! answers one request per connection is enough: each test spawns a
//! listener, drives the session, and inspects the requests it received.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::NaiveDate;
use nextcourse_core::TimeWindow;
use nextcourse_extranet::{Credentials, ExtranetError, ExtranetSession, SessionState};

#[derive(Clone)]
struct StubOptions {
    issue_session_cookie: bool,
    issue_auth_cookie: bool,
    events_body: String,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            issue_session_cookie: true,
            issue_auth_cookie: true,
            events_body: "[]".to_string(),
        }
    }
}

struct StubPortal {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubPortal {
    /// Request targets (path + query) in arrival order.
    fn targets(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn paths(&self) -> Vec<String> {
        self.targets()
            .iter()
            .map(|t| t.split('?').next().unwrap_or("").to_string())
            .collect()
    }
}

fn spawn_portal(options: StubOptions) -> StubPortal {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            handle_request(stream, &options, &seen);
        }
    });

    StubPortal {
        base_url: format!("http://{addr}"),
        requests,
    }
}

fn handle_request(stream: TcpStream, options: &StubOptions, seen: &Arc<Mutex<Vec<String>>>) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        if line == "\r\n" || line == "\n" {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    if content_length > 0 {
        let mut body = vec![0u8; content_length];
        let _ = reader.read_exact(&mut body);
    }

    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("")
        .to_string();
    seen.lock().unwrap().push(target.clone());
    let path = target.split('?').next().unwrap_or("");

    let (body, set_cookie) = match path {
        "/" => (
            String::new(),
            options
                .issue_session_cookie
                .then_some("ASP.NET_SessionId=stub-session; Path=/"),
        ),
        "/Users/Account/DoLogin" => (
            String::new(),
            options
                .issue_auth_cookie
                .then_some("extranet_db=stub-auth; Path=/"),
        ),
        "/Student/Calendar/GetStudentEvents" => (options.events_body.clone(), None),
        _ => (String::new(), None),
    };

    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    if let Some(cookie) = set_cookie {
        response.push_str("Set-Cookie: ");
        response.push_str(cookie);
        response.push_str("\r\n");
    }
    response.push_str("\r\n");
    response.push_str(&body);

    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn credentials() -> Credentials {
    Credentials::new("student", "secret")
}

fn test_window() -> TimeWindow {
    TimeWindow::rolling_week(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap())
}

#[test]
fn connect_is_idempotent() {
    let portal = spawn_portal(StubOptions::default());
    let mut session = ExtranetSession::new(&portal.base_url, credentials()).unwrap();

    session.connect().unwrap();
    session.connect().unwrap();

    assert_eq!(session.state(), SessionState::Connected);
    assert_eq!(portal.paths(), vec!["/"]);
}

#[test]
fn missing_session_cookie_breaks_the_contract() {
    let portal = spawn_portal(StubOptions {
        issue_session_cookie: false,
        ..StubOptions::default()
    });
    let mut session = ExtranetSession::new(&portal.base_url, credentials()).unwrap();

    let err = session.connect().unwrap_err();
    assert!(matches!(err, ExtranetError::SessionContract));
    assert!(!err.is_retryable());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn rejected_login_leaves_the_session_connected() {
    let portal = spawn_portal(StubOptions {
        issue_auth_cookie: false,
        ..StubOptions::default()
    });
    let mut session = ExtranetSession::new(&portal.base_url, credentials()).unwrap();

    let err = session.login().unwrap_err();
    assert!(matches!(err, ExtranetError::Login));
    assert_eq!(session.state(), SessionState::Connected);
    assert_eq!(portal.paths(), vec!["/", "/Users/Account/DoLogin"]);
}

#[test]
fn login_sends_credentials_as_query_parameters() {
    let portal = spawn_portal(StubOptions::default());
    let mut session = ExtranetSession::new(&portal.base_url, credentials()).unwrap();

    session.login().unwrap();
    assert_eq!(session.state(), SessionState::Authenticated);

    let targets = portal.targets();
    let login = &targets[1];
    assert!(login.contains("username=student"), "got {login}");
    assert!(login.contains("password=secret"), "got {login}");
}

#[test]
fn fetch_auto_runs_the_missing_transitions() {
    let portal = spawn_portal(StubOptions {
        events_body: concat!(
            r#"[{"title":"Maths - Dupont - A101 ","start":"2026-03-02T10:00:00","#,
            r#""end":"2026-03-02T12:00:00","id":7}]"#
        )
        .to_string(),
        ..StubOptions::default()
    });
    let mut session = ExtranetSession::new(&portal.base_url, credentials()).unwrap();

    // A single data call from an idle session walks the whole chain.
    let courses = session.fetch_courses(&test_window()).unwrap();
    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(
        portal.paths(),
        vec!["/", "/Users/Account/DoLogin", "/Student/Calendar/GetStudentEvents"]
    );

    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Maths");
    assert_eq!(courses[0].teacher, "Dupont");
    assert_eq!(courses[0].room, "A101");
    assert_eq!(courses[0].extra["id"], serde_json::Value::from(7));

    let events = &portal.targets()[2];
    assert!(events.contains("start="), "got {events}");
    assert!(events.contains("end="), "got {events}");
}

#[test]
fn malformed_title_aborts_the_fetch() {
    let portal = spawn_portal(StubOptions {
        events_body: r#"[{"title":"no separators here","start":"2026-03-02T10:00:00","end":"2026-03-02T12:00:00"}]"#
            .to_string(),
        ..StubOptions::default()
    });
    let mut session = ExtranetSession::new(&portal.base_url, credentials()).unwrap();

    let err = session.fetch_courses(&test_window()).unwrap_err();
    assert!(matches!(err, ExtranetError::Normalization(_)));
}

#[test]
fn non_array_body_is_an_invalid_response() {
    let portal = spawn_portal(StubOptions {
        events_body: r#"{"oops": true}"#.to_string(),
        ..StubOptions::default()
    });
    let mut session = ExtranetSession::new(&portal.base_url, credentials()).unwrap();

    let err = session.fetch_courses(&test_window()).unwrap_err();
    assert!(matches!(err, ExtranetError::InvalidResponse(_)));
}

#[test]
fn unreachable_portal_is_a_retryable_connection_error() {
    // Bind and immediately drop a listener so the port is known-dead.
    let addr = TcpListener::bind("127.0.0.1:0")
        .expect("bind probe listener")
        .local_addr()
        .expect("probe local addr");
    let mut session = ExtranetSession::new(&format!("http://{addr}"), credentials()).unwrap();

    let err = session.connect().unwrap_err();
    assert!(matches!(err, ExtranetError::Connection(_)));
    assert!(err.is_retryable());
    assert_eq!(session.state(), SessionState::Idle);
}
