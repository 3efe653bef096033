use std::io::Cursor;
use serde::Deserialize;
use tiny_http::{Request, Response};

use nn_playground::{train_batch, TrainConfig};

use crate::routes::{error_response, ok_json, read_json};
use crate::state::{lock_state, SharedState};

#[derive(Deserialize)]
struct ForwardBody {
    input: Vec<f64>,
}

#[derive(Deserialize)]
struct StepBody {
    inputs: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
}

// ---------------------------------------------------------------------------
// POST /config
// ---------------------------------------------------------------------------

/// Replaces the learning and regularization rates. No rebuild needed.
pub fn handle_config(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let config: TrainConfig = match read_json(request) {
        Ok(c) => c,
        Err(msg) => return error_response(400, &msg),
    };
    if !(config.learning_rate >= 0.0) || !(config.regularization_rate >= 0.0) {
        return error_response(400, "rates must be non-negative numbers");
    }

    let mut st = lock_state(&state);
    st.config = config;
    ok_json(&st.config)
}

// ---------------------------------------------------------------------------
// POST /forward
// ---------------------------------------------------------------------------

pub fn handle_forward(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let body: ForwardBody = match read_json(request) {
        Ok(b) => b,
        Err(msg) => return error_response(400, &msg),
    };

    let mut st = lock_state(&state);
    match st.network.forward_prop(&body.input) {
        Ok(output) => ok_json(&serde_json::json!({ "output": output })),
        Err(e) => error_response(400, &e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// POST /step
// ---------------------------------------------------------------------------

/// Runs one mini-batch: forward and back for each example, one update.
pub fn handle_step(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let body: StepBody = match read_json(request) {
        Ok(b) => b,
        Err(msg) => return error_response(400, &msg),
    };

    let mut st = lock_state(&state);
    let config = st.config;
    match train_batch(&mut st.network, &body.inputs, &body.targets, &config) {
        Ok(loss) => {
            st.step += 1;
            st.loss_history.push(loss);
            ok_json(&serde_json::json!({ "loss": loss, "step": st.step }))
        }
        Err(e) => error_response(400, &e.to_string()),
    }
}
