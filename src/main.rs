//! LinkSaver RPC server, speaking JSON-RPC over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"link.add", "params":{"name":"...","link":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use log::{error, info};
use serde_json::{json, Value};

use linksaver::app::App;
use linksaver::rpc_handler::handle_method;

/// `$LINKSAVER_DATA_DIR`, else the platform data directory, else the working directory.
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LINKSAVER_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("linksaver"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn respond(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() -> ExitCode {
    env_logger::init();

    let dir = data_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        error!("Cannot create data directory {}: {}", dir.display(), e);
        return ExitCode::FAILURE;
    }
    let app = match App::new(&dir.join("linksaver.db"), None) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!("Failed to initialize LinkSaver: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("LinkSaver v{} listening on stdin", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if respond(&mut out, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).is_err() {
        return ExitCode::FAILURE;
    }

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));
                match handle_method(&app, method, &params) {
                    Ok(result) => json!({"id": id, "result": result}),
                    Err(err) => json!({"id": id, "error": err}),
                }
            }
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
        };

        if respond(&mut out, &response).is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
