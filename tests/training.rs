use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, SeedableRng};

use nn_playground::{
    eval_loss, train_batch, train_step, ActivationFunction, LossType, Network, NetworkError,
    NetworkSpec, Regularization, TrainConfig,
};

fn linear(shape: Vec<usize>) -> NetworkSpec {
    NetworkSpec::new(shape)
        .with_activation(ActivationFunction::Linear)
        .with_output_activation(ActivationFunction::Linear)
}

fn parameters(net: &Network) -> Vec<f64> {
    let mut params: Vec<f64> = net.links().iter().map(|l| l.weight).collect();
    net.for_each_node(true, |n| params.push(n.bias));
    params
}

#[test]
fn l1_prunes_links_permanently() {
    let mut rng = StdRng::seed_from_u64(1);
    let spec = NetworkSpec::new(vec![2, 3, 1]).with_regularization(Some(Regularization::L1));
    let mut net = Network::build_with_rng(&spec, &mut rng).unwrap();
    let config = TrainConfig::new(0.1, 10.0);

    train_step(&mut net, &[0.5, -0.5], &[0.25], &config).unwrap();
    let dead: Vec<usize> = net.links().iter()
        .enumerate()
        .filter(|(_, l)| l.is_dead)
        .map(|(i, _)| i)
        .collect();
    assert!(!dead.is_empty());
    for &i in &dead {
        assert_eq!(net.links()[i].weight, 0.0);
    }

    for _ in 0..25 {
        net.forward_prop(&[0.9, 0.1]).unwrap();
        net.back_prop(&[-0.5]).unwrap();
        for &i in &dead {
            assert!(!net.links()[i].is_accumulating());
        }
        net.update_weights(0.1, 10.0);
        for &i in &dead {
            assert!(net.links()[i].is_dead);
            assert_eq!(net.links()[i].weight, 0.0);
        }
    }
}

#[test]
fn l2_never_kills_links() {
    let mut rng = StdRng::seed_from_u64(2);
    let spec = NetworkSpec::new(vec![2, 3, 1]).with_regularization(Some(Regularization::L2));
    let mut net = Network::build_with_rng(&spec, &mut rng).unwrap();
    let config = TrainConfig::new(0.1, 5.0);
    for _ in 0..20 {
        train_step(&mut net, &[0.5, -0.5], &[0.25], &config).unwrap();
    }
    assert!(net.links().iter().all(|l| !l.is_dead));
}

#[test]
fn batch_update_averages_gradients() {
    let mut net = Network::build(&linear(vec![1, 1]).with_randomize(false)).unwrap();
    let config = TrainConfig::new(1.0, 0.0);
    let loss = train_batch(&mut net, &[vec![1.0], vec![2.0]], &[vec![1.0], vec![0.0]], &config).unwrap();

    // errors before the update: ½·1² and ½·0²
    assert_abs_diff_eq!(loss, 0.25);
    assert_abs_diff_eq!(net.links()[0].weight, 0.5);
    net.for_each_node(true, |n| assert_abs_diff_eq!(n.bias, 0.5));
}

#[test]
fn duplicated_example_batch_matches_single_step() {
    let spec = NetworkSpec::new(vec![2, 4, 1]);
    let mut a = Network::build_with_rng(&spec, &mut StdRng::seed_from_u64(8)).unwrap();
    let mut b = Network::build_with_rng(&spec, &mut StdRng::seed_from_u64(8)).unwrap();
    let config = TrainConfig::new(0.3, 0.0);

    let step_loss = train_step(&mut a, &[0.4, 0.7], &[1.0], &config).unwrap();
    let batch_loss = train_batch(&mut b, &vec![vec![0.4, 0.7]; 3], &vec![vec![1.0]; 3], &config).unwrap();

    assert_abs_diff_eq!(step_loss, batch_loss, epsilon = 1e-12);
    for (x, y) in parameters(&a).iter().zip(parameters(&b)) {
        assert_abs_diff_eq!(*x, y, epsilon = 1e-12);
    }
}

#[test]
fn malformed_batch_leaves_network_untouched() {
    let mut net = Network::build_with_rng(&NetworkSpec::new(vec![2, 2, 1]), &mut StdRng::seed_from_u64(3)).unwrap();
    let before = parameters(&net);
    let config = TrainConfig::default();

    let err = train_batch(&mut net, &[vec![1.0, 0.0], vec![1.0]], &[vec![1.0], vec![0.0]], &config).unwrap_err();
    assert!(matches!(err, NetworkError::DimensionMismatch { .. }));
    assert!(matches!(
        train_batch(&mut net, &[], &[], &config),
        Err(NetworkError::Configuration(_))
    ));
    assert!(matches!(
        train_batch(&mut net, &[vec![1.0, 0.0]], &[], &config),
        Err(NetworkError::Configuration(_))
    ));

    assert_eq!(before, parameters(&net));
    net.for_each_node(true, |n| assert!(!n.is_accumulating()));
}

#[test]
fn linear_regression_converges() {
    let spec = linear(vec![2, 1]).with_loss(LossType::Mse);
    let mut net = Network::build_with_rng(&spec, &mut StdRng::seed_from_u64(12)).unwrap();
    let inputs: Vec<Vec<f64>> = (0..20)
        .map(|i| vec![i as f64 / 10.0 - 1.0, (i % 7) as f64 / 7.0])
        .collect();
    let targets: Vec<Vec<f64>> = inputs.iter().map(|x| vec![2.0 * x[0] - x[1] + 0.5]).collect();
    let config = TrainConfig::new(0.2, 0.0);

    let initial = eval_loss(&mut net, &inputs, &targets).unwrap();
    for _ in 0..5000 {
        train_batch(&mut net, &inputs, &targets, &config).unwrap();
    }
    let final_loss = eval_loss(&mut net, &inputs, &targets).unwrap();

    assert!(final_loss < initial);
    assert!(final_loss < 1e-6, "Failed to converge, loss was {}", final_loss);
    assert_abs_diff_eq!(net.links()[0].weight, 2.0, epsilon = 1e-3);
    assert_abs_diff_eq!(net.links()[1].weight, -1.0, epsilon = 1e-3);
}

#[test]
fn eval_loss_does_not_accumulate() {
    let mut net = Network::build(&NetworkSpec::new(vec![1, 2, 1])).unwrap();
    let loss = eval_loss(&mut net, &[vec![0.5]], &[vec![0.0]]).unwrap();
    assert!(loss >= 0.0);
    net.for_each_node(true, |n| assert!(!n.is_accumulating()));
    assert_eq!(eval_loss(&mut net, &[], &[]).unwrap(), 0.0);
}

#[test]
fn eval_loss_rejects_bad_target_before_forward_pass() {
    let mut net = Network::build(&linear(vec![1, 2]).with_randomize(false)).unwrap();
    let input_node = net.layers()[0][0];
    assert_eq!(net.node(input_node).output, 0.0);

    let err = eval_loss(&mut net, &[vec![7.0], vec![1.0]], &[vec![0.0, 0.0], vec![1.0]]).unwrap_err();
    assert!(matches!(err, NetworkError::DimensionMismatch { .. }));
    assert_eq!(net.node(input_node).output, 0.0);
    assert_eq!(input_node.index(), 0);

    let err = eval_loss(&mut net, &[vec![7.0]], &[vec![1.0]]).unwrap_err();
    assert!(matches!(err, NetworkError::DimensionMismatch { .. }));
    assert_eq!(net.node(input_node).output, 0.0);
}
