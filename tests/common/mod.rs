//! Utilidades compartidas para los tests de integración.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use fleet_vehicles::config::EnvironmentConfig;
use fleet_vehicles::models::{NewVehicle, Vehicle, VehiclePatch, VehicleStatus};
use fleet_vehicles::repositories::{InMemoryVehicleRepository, VehicleStore};
use fleet_vehicles::utils::errors::AppResult;
use fleet_vehicles::{create_app_router, AppState};
use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;

pub fn vehicle(id: i64, license_plate: &str, status: VehicleStatus) -> Vehicle {
    let now = Utc::now();
    Vehicle {
        id,
        license_plate: license_plate.to_string(),
        status,
        created_at: now,
        updated_at: now,
    }
}

/// Store en memoria que registra qué operaciones se llamaron
pub struct RecordingStore {
    inner: InMemoryVehicleRepository,
    calls: Mutex<Vec<&'static str>>,
    delay: Duration,
}

impl RecordingStore {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            inner: InMemoryVehicleRepository::with_vehicles(vehicles),
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Cada operación tarda `delay` antes de responder
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, call: &str) -> bool {
        self.calls().iter().any(|c| *c == call)
    }
}

#[async_trait]
impl VehicleStore for RecordingStore {
    async fn list_vehicles(&self, limit: i64) -> AppResult<Vec<Vehicle>> {
        self.record("list_vehicles").await;
        self.inner.list_vehicles(limit).await
    }

    async fn get_vehicle(&self, id: i64) -> AppResult<Option<Vehicle>> {
        self.record("get_vehicle").await;
        self.inner.get_vehicle(id).await
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        self.record("find_by_license_plate").await;
        self.inner.find_by_license_plate(license_plate).await
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        self.record("create_vehicle").await;
        self.inner.create_vehicle(vehicle).await
    }

    async fn update_vehicle(&self, id: i64, patch: VehiclePatch) -> AppResult<Vehicle> {
        self.record("update_vehicle").await;
        self.inner.update_vehicle(id, patch).await
    }

    async fn delete_vehicle(&self, id: i64) -> AppResult<u64> {
        self.record("delete_vehicle").await;
        self.inner.delete_vehicle(id).await
    }
}

/// Servidor de test sobre un puerto efímero
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<RecordingStore>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn(vehicles: Vec<Vehicle>) -> Self {
        Self::spawn_with(RecordingStore::new(vehicles), EnvironmentConfig::default()).await
    }

    pub async fn spawn_with(store: RecordingStore, config: EnvironmentConfig) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(store.clone(), config);
        let router = create_app_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        Self {
            addr,
            client: Client::new(),
            store,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        read(response).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        read(response).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        read(response).await
    }

    /// Enviar un cuerpo tal cual, con el `Content-Type` indicado (o ninguno)
    pub async fn send_raw(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &str,
        content_type: Option<&str>,
    ) -> (u16, Value) {
        let mut request = self.client.request(method, self.url(path)).body(body.to_string());
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        let response = request.send().await.unwrap();
        read(response).await
    }

    pub async fn delete(&self, path: &str) -> (u16, Value) {
        let response = self.client.delete(self.url(path)).send().await.unwrap();
        read(response).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn read(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}
