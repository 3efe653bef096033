use std::io::Cursor;
use tiny_http::{Request, Response};

use nn_playground::{Network, NetworkSpec};

use crate::routes::{error_response, ok_json, read_json};
use crate::state::{lock_state, SharedState};

// ---------------------------------------------------------------------------
// GET /network
// ---------------------------------------------------------------------------

/// Full node/link graph with every numeric field.
pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let st = lock_state(&state);
    ok_json(&st.network)
}

// ---------------------------------------------------------------------------
// GET /spec
// ---------------------------------------------------------------------------

pub fn handle_get_spec(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let st = lock_state(&state);
    ok_json(&serde_json::json!({
        "spec": st.spec,
        "config": st.config,
        "loss": st.network.loss_type(),
        "step": st.step,
        "loss_history": st.loss_history,
    }))
}

// ---------------------------------------------------------------------------
// POST /build
// ---------------------------------------------------------------------------

/// Rebuilds the network from a `NetworkSpec` body.
pub fn handle_build(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let spec: NetworkSpec = match read_json(request) {
        Ok(spec) => spec,
        Err(msg) => return error_response(400, &msg),
    };

    // Build before locking so a rejected spec never holds the lock.
    let network = match Network::build(&spec) {
        Ok(network) => network,
        Err(e) => return error_response(400, &e.to_string()),
    };

    let mut st = lock_state(&state);
    st.install(spec, network);
    log::info!("rebuilt network with shape {:?}", st.spec.shape);
    ok_json(&st.network)
}
