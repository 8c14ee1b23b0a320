//! In-process vmrest stand-in for command tests. `vm-on` is running, `vm-off`
//! is not. The ip and params endpoints always fail.

use crate::context::Context;
use actix_web::rt::System;
use actix_web::web::{self, Bytes, Data};
use actix_web::{App, HttpResponse, HttpServer};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::channel;
use std::thread;
use tempfile::{TempDir, tempdir};
use vmws_config::VmwsConfig;

#[derive(Default)]
pub struct Calls {
    power_puts: AtomicUsize,
}

impl Calls {
    pub fn power_puts(&self) -> usize {
        self.power_puts.load(Ordering::SeqCst)
    }
}

fn broken(what: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "Code": 100,
        "Message": format!("unable to read {what}")
    }))
}

fn power_state(id: &str) -> Option<&'static str> {
    match id {
        "vm-on" => Some("poweredOn"),
        "vm-off" => Some("poweredOff"),
        _ => None,
    }
}

async fn list_vms() -> HttpResponse {
    HttpResponse::Ok().json(json!({"vms": [
        {"id": "vm-on", "path": "/vms/alpha-box.vmx"},
        {"id": "vm-off", "path": "/vms/beta.vmx"}
    ]}))
}

async fn get_power(id: web::Path<String>) -> HttpResponse {
    match power_state(&id) {
        Some(state) => HttpResponse::Ok().json(json!({"power_state": state})),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn put_power(calls: Data<Calls>, id: web::Path<String>, body: Bytes) -> HttpResponse {
    calls.power_puts.fetch_add(1, Ordering::SeqCst);
    let state = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|v| v["state"].as_str().map(str::to_string));
    match (power_state(&id), state.as_deref()) {
        (None, _) => HttpResponse::NotFound().finish(),
        (_, Some("on")) => HttpResponse::Ok().json(json!({"power_state": "poweredOn"})),
        (_, Some("off")) => HttpResponse::Ok().json(json!({"power_state": "poweredOff"})),
        _ => HttpResponse::BadRequest().finish(),
    }
}

async fn vm_settings(id: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "id": id.into_inner(),
        "cpu": {"processors": 2},
        "memory": 2048
    }))
}

async fn vm_nics() -> HttpResponse {
    HttpResponse::Ok().json(json!({"num": 1, "nics": [
        {"index": 1, "type": "nat", "vmnet": "vmnet8", "macAddress": "00:0c:29:aa:bb:cc"}
    ]}))
}

async fn vm_ip() -> HttpResponse {
    broken("ip address")
}

async fn vm_param() -> HttpResponse {
    broken("param")
}

/// Starts the stand-in on its own actix system and returns its base url
/// together with the call counters.
pub fn serve() -> (String, Arc<Calls>) {
    let calls = Data::new(Calls::default());
    let shared = calls.clone().into_inner();
    let (tx, rx) = channel();

    thread::spawn(move || {
        System::new().block_on(async move {
            let server = HttpServer::new(move || {
                App::new()
                    .app_data(calls.clone())
                    .route("/api/vms", web::get().to(list_vms))
                    .route("/api/vms/{id}", web::get().to(vm_settings))
                    .route("/api/vms/{id}/power", web::get().to(get_power))
                    .route("/api/vms/{id}/power", web::put().to(put_power))
                    .route("/api/vms/{id}/ip", web::get().to(vm_ip))
                    .route("/api/vms/{id}/nic", web::get().to(vm_nics))
                    .route("/api/vms/{id}/params/{name}", web::get().to(vm_param))
            })
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .unwrap();
            tx.send(server.addrs()[0]).unwrap();
            server.run().await
        })
    });

    let address = rx.recv().unwrap();
    (format!("http://{address}/api"), shared)
}

/// A non-interactive context whose config file points at `base_url`.
pub fn context(base_url: &str) -> (TempDir, Context) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    VmwsConfig {
        base_url: base_url.to_string(),
        username: "u".to_string(),
        password: "p".to_string(),
        vmrest_path: "/usr/bin/vmrest".to_string(),
    }
    .save(&path)
    .unwrap();
    (dir, Context::new(path, false))
}
