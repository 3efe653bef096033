use nn_playground::{train_batch, ActivationFunction, Network, NetworkSpec, TrainConfig};

// Fits XOR with a [2, 4, 1] tanh network and prints the result.
// The interactive HTTP boundary lives in the `playground` binary.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let spec = NetworkSpec::new(vec![2, 4, 1])
        .with_activation(ActivationFunction::Tanh)
        .with_output_activation(ActivationFunction::Tanh)
        .with_input_ids(["x1", "x2"]);
    let mut network = Network::build(&spec)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let targets = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let config = TrainConfig::new(0.1, 0.0);
    for step in 0..5000 {
        let loss = train_batch(&mut network, &inputs, &targets, &config)?;
        if step % 500 == 0 {
            println!("Step {step}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        let output = network.forward_prop(input)?;
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }
    Ok(())
}
