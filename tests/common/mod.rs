#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use kids_gaming_site::catalog::Launcher;
use kids_gaming_site::countdown::Clock;
use kids_gaming_site::render::{
    ContactLink, CountdownDisplay, FontRequest, GameCard, Image, Notice, RenderTarget, SocialLink,
};

pub fn fixture_dir(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

pub fn read_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("{}/{}", fixture_dir(""), path)).expect("failed to read fixture")
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that follows tokio's (pausable) time from a chosen origin.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    pub origin: DateTime<Utc>,
    pub started: tokio::time::Instant,
}

impl TokioClock {
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self { origin, started: tokio::time::Instant::now() }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = self.started.elapsed();
        self.origin + chrono::Duration::milliseconds(elapsed.as_millis() as i64)
    }
}

/// Render target that only counts countdown frames.
#[derive(Debug, Default)]
pub struct TickCounter {
    pub frames: Vec<CountdownDisplay>,
    pub expired: usize,
}

impl RenderTarget for TickCounter {
    fn set_document_title(&mut self, _: &str) {}
    fn set_hero_title(&mut self, _: &str) {}
    fn set_hero_tagline(&mut self, _: &str) {}
    fn set_slogan(&mut self, _: &str) {}
    fn set_logo(&mut self, _: &Image) {}
    fn set_favicon(&mut self, _: &str) {}
    fn set_footer(&mut self, _: &str, _: &str) {}
    fn set_contact_email(&mut self, _: &ContactLink) {}
    fn set_contact_phone(&mut self, _: &ContactLink) {}
    fn clear_social_links(&mut self) {}
    fn append_social_link(&mut self, _: SocialLink) {}
    fn set_style_variable(&mut self, _: &str, _: &str) {}
    fn request_font(&mut self, _: FontRequest) {}
    fn clear_cards(&mut self) {}
    fn append_card(&mut self, _: GameCard) {}
    fn set_countdown(&mut self, display: &CountdownDisplay) {
        self.frames.push(display.clone());
    }
    fn show_countdown_expired(&mut self, _: &str) {
        self.expired += 1;
    }
    fn show_notice(&mut self, _: Notice) {}
}

#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub opened: Vec<String>,
}

impl Launcher for RecordingLauncher {
    fn open_detached(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }
}

/// Serves `routes` (path, JSON body) over plain HTTP on an ephemeral port.
/// Any other path answers 404. Returns the base URL.
pub fn serve_documents(routes: Vec<(&'static str, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind test server");
    let addr = listener.local_addr().expect("test server address");
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            let routes = routes.clone();
            std::thread::spawn(move || answer(stream, &routes));
        }
    });
    format!("http://{}", addr)
}

fn answer(mut stream: TcpStream, routes: &[(&'static str, String)]) {
    let Ok(read_half) = stream.try_clone() else { return };
    let mut reader = BufReader::new(read_half);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) | Err(_) => break,
            Ok(_) if header.trim().is_empty() => break,
            Ok(_) => {}
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let (status, body) = match routes.iter().find(|(route, _)| *route == path) {
        Some((_, body)) => ("200 OK", body.as_str()),
        None => ("404 Not Found", "{}"),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Base URL of a local port nothing is listening on.
pub fn unreachable_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{}", addr)
}

/// Layer that records the level of every event emitted on this thread.
#[derive(Debug, Clone, Default)]
pub struct LevelRecorder {
    pub levels: Arc<Mutex<Vec<tracing::Level>>>,
}

impl LevelRecorder {
    pub fn count(&self, level: tracing::Level) -> usize {
        self.levels.lock().unwrap().iter().filter(|l| **l == level).count()
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelRecorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        self.levels.lock().unwrap().push(*event.metadata().level());
    }
}
