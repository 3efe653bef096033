/// nn-playground HTTP boundary
///
/// Serves one shared network as JSON so a visualizer can rebuild it, drive
/// training steps, and read back every node and link.
///
/// Run with:
///   cargo run --bin playground -- [spec.json] [--addr 127.0.0.1:7878]
///
/// Endpoints:
///   GET  /network  — node/link graph
///   GET  /spec     — current spec, rates, step count, loss history
///   POST /build    — rebuild from a NetworkSpec
///   POST /config   — set learning / regularization rate
///   POST /forward  — { "input": [..] } → { "output": [..] }
///   POST /step     — { "inputs": [[..]], "targets": [[..]] } → { "loss", "step" }

mod state;
mod routes;
mod handlers;

use std::sync::{Arc, Mutex};
use tiny_http::Server;

use nn_playground::{ActivationFunction, NetworkSpec};
use state::PlaygroundState;

const DEFAULT_ADDR: &str = "127.0.0.1:7878";

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    let mut spec_path = None;
    let mut addr = DEFAULT_ADDR.to_owned();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--addr" => addr = args.next().ok_or("--addr needs a value")?,
            _ => spec_path = Some(arg),
        }
    }

    let spec = match spec_path {
        Some(path) => NetworkSpec::load_json(&path)?,
        None => NetworkSpec::new(vec![2, 4, 2, 1])
            .with_activation(ActivationFunction::Tanh)
            .with_output_activation(ActivationFunction::Tanh)
            .with_input_ids(["x", "y"]),
    };

    let shared_state = Arc::new(Mutex::new(PlaygroundState::new(spec)?));
    let server = Server::http(&addr)?;
    log::info!("playground listening on http://{addr}");

    // One thread per request; the state mutex keeps engine calls serial.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    Ok(())
}
