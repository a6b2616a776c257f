// In-process HTTP/1.1 server for exercising the transport without the network.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::utils::settings::Settings;

pub const SCHEDULE: &str = r#"{
    "corsoDiLaurea": {"codice": "0H0C"},
    "lezioniCalendario": {
        "2024-10-01": [{
            "descrizioneInsegnamento": "Matematica",
            "descrizioneAula": "A1",
            "oraInizio": "09:00",
            "oraFine": "11:00",
            "note": null
        }]
    }
}"#;

// Answers each connection with the next scripted response; the last one repeats.
pub struct StubServer {
    pub url: url::Url,
    pub hits: Arc<AtomicUsize>,
    pub bodies: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(Mutex::new(Vec::new()));

        let (task_hits, task_bodies) = (hits.clone(), bodies.clone());
        tokio::spawn(async move {
            loop {
                let (mut stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                let n = task_hits.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses[n.min(responses.len() - 1)];
                let request_body = read_request(&mut stream).await;
                task_bodies.lock().unwrap().push(request_body);
                let reply = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(reply.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            url: url::Url::parse(&format!("http://{}/didatticaweb2/ps/lezioni/", addr)).unwrap(),
            hits,
            bodies,
        }
    }
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&data);
        if let Some(split) = text.find("\r\n\r\n") {
            let length = text[..split]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= split + 4 + length {
                return String::from_utf8_lossy(&data[split + 4..split + 4 + length]).to_string();
            }
        }
    }
    String::new()
}

pub fn settings_for(server: &StubServer, max_retries: u32) -> Settings {
    let mut settings = Settings::from_lookup(|_| None).unwrap();
    settings.url = server.url.clone();
    settings.retry.max_retries = max_retries;
    settings.retry.backoff_factor = Duration::from_millis(1);
    settings.retry.max_backoff = Duration::from_millis(5);
    settings.retry.timeout = Duration::from_secs(5);
    settings
}
