//! Machine HTTP Routes
//!
//! Endpoints for the machine inventory. The inventory core is blocking,
//! so every call runs on tokio's blocking pool.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::inventory::{Inventory, InventoryError, InventoryResult, ListRequest, MachineList};
use crate::machine::Machine;

use super::response::ApiResponse;

// ==================
// Shared State
// ==================

pub struct MachineState {
    pub inventory: Arc<Inventory>,
}

impl MachineState {
    pub fn new(inventory: Arc<Inventory>) -> Self {
        Self { inventory }
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: String,
}

// ==================
// Machine Routes
// ==================

pub fn machine_routes(state: Arc<MachineState>) -> Router {
    Router::new()
        .route("/get-machines", get(get_machines_handler))
        .route("/get-machine", get(get_machine_handler))
        .route("/add-machine", post(add_machine_handler))
        .route("/update-machine", post(update_machine_handler))
        .route("/delete-machine", post(delete_machine_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Run a blocking inventory call off the async executor
async fn blocking<T, F>(f: F) -> InventoryResult<T>
where
    F: FnOnce() -> InventoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .unwrap_or_else(|e| Err(InventoryError::Internal(format!("request task failed: {}", e))))
}

fn decode_machine(body: &Bytes) -> InventoryResult<Machine> {
    serde_json::from_slice(body).map_err(|e| InventoryError::InvalidBody(e.to_string()))
}

// ==================
// Read Handlers
// ==================

async fn get_machines_handler(
    State(state): State<Arc<MachineState>>,
    Query(request): Query<ListRequest>,
) -> ApiResponse {
    let inventory = state.inventory.clone();
    match blocking(move || inventory.get_machines(&request)).await {
        Ok(MachineList::All(machines)) => ApiResponse::ok(&machines),
        Ok(MachineList::Page { machines, total }) => ApiResponse::paged(&machines, total),
        Err(e) => e.into(),
    }
}

async fn get_machine_handler(
    State(state): State<Arc<MachineState>>,
    Query(query): Query<IdQuery>,
) -> ApiResponse {
    let inventory = state.inventory.clone();
    match blocking(move || inventory.get_machine(&query.id)).await {
        Ok(machine) => ApiResponse::ok(&machine),
        Err(e) => e.into(),
    }
}

// ==================
// Write Handlers
// ==================

async fn add_machine_handler(State(state): State<Arc<MachineState>>, body: Bytes) -> ApiResponse {
    let machine = match decode_machine(&body) {
        Ok(machine) => machine,
        Err(e) => return e.into(),
    };
    let inventory = state.inventory.clone();
    ApiResponse::action(blocking(move || inventory.add_machine(&machine)).await)
}

async fn update_machine_handler(
    State(state): State<Arc<MachineState>>,
    Query(query): Query<IdQuery>,
    body: Bytes,
) -> ApiResponse {
    let machine = match decode_machine(&body) {
        Ok(machine) => machine,
        Err(e) => return e.into(),
    };
    let inventory = state.inventory.clone();
    ApiResponse::action(blocking(move || inventory.update_machine(&query.id, &machine)).await)
}

async fn delete_machine_handler(State(state): State<Arc<MachineState>>, body: Bytes) -> ApiResponse {
    let machine = match decode_machine(&body) {
        Ok(machine) => machine,
        Err(e) => return e.into(),
    };
    let inventory = state.inventory.clone();
    ApiResponse::action(blocking(move || inventory.delete_machine(&machine)).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_machine() {
        let body = Bytes::from_static(br#"{"owner":"alice","name":"web-1","publicIp":"1.2.3.4"}"#);
        let machine = decode_machine(&body).unwrap();
        assert_eq!(machine.public_ip, "1.2.3.4");
    }

    #[test]
    fn test_decode_machine_rejects_garbage() {
        let err = decode_machine(&Bytes::from_static(b"{not json")).unwrap_err();
        assert_eq!(err.code(), "MACHINE_INVALID_BODY");
    }
}
