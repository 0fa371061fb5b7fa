use std::fs::OpenOptions;
use std::io::Write;
use chrono::Utc;

pub fn log_request(
    request_id: &str,
    outcome: &str,
    prompt_bytes: usize,
    response_bytes: usize,
    elapsed_ms: u128,
) {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    let log_entry = format!(
        "{} | {} | {:16} | {:8} prompt bytes | {:8} response bytes | {:6} ms\n",
        timestamp, request_id, outcome, prompt_bytes, response_bytes, elapsed_ms
    );

    // Use /app/requests.log in Docker, ./requests.log locally
    let log_path = std::env::var("LOG_PATH")
        .unwrap_or_else(|_| "./requests.log".to_string());

    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(log_entry.as_bytes());
    } else {
        eprintln!("Failed to write to log file: {}", log_path);
    }
}
