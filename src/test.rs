use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::{Batch, Dataloader, Dataset, LabeledSet, Stackable};
use crate::ml::config::TrainConfig;
use crate::ml::funcs::Activation;
use crate::ml::history::{LOSS, VALIDATION_LOSS};
use crate::ml::layers::{Layer, LayerKind};
use crate::ml::losses::Loss;
use crate::ml::metrics::accuracy;
use crate::ml::network::Network;
use crate::models::{LinearRegression, Neuron, Perceptron};
use crate::{sequential, LayerError};

fn regression_network(seed: u64) -> Network {
    sequential!(
        Layer::input(2),
        [
            Layer::dense_seeded(1, seed),
            Layer::loss(Loss::mean_squared_error()),
        ]
    )
    .unwrap()
}

fn names(chain: &Layer) -> Vec<&str> {
    chain.iter().map(Layer::name).collect()
}

fn random_rows(rng: &mut StdRng, n: usize, width: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| (0..width).map(|_| rng.random_range(-1.0..1.0)).collect())
        .collect()
}

#[test]
fn test_widths_propagate_through_the_chain() {
    let chain = Layer::input(2)
        .with_successor(Layer::dense(3))
        .and_then(|c| c.with_successor(Layer::loss(Loss::default())))
        .unwrap();

    assert_eq!(chain[1].input_width(), Some(2));
    assert_eq!(chain[1].output_width(), Some(3));
    assert_eq!(chain[2].input_width(), Some(3));
    assert_eq!(chain[2].output_width(), None);
    assert_eq!(chain.input_width(), None);
    assert_eq!(chain.len(), 3);
    assert!(chain.tail().is_loss());
}

#[test]
fn test_dense_shapes() {
    let network = sequential!(Layer::input(4), [Layer::dense(3)]).unwrap();
    let dense = network[1].as_dense().unwrap();
    assert_eq!(dense.weights().len(), 3);
    assert!(dense.weights().iter().all(|row| row.len() == 4));
    assert_eq!(dense.biases().len(), 3);

    let mut rng = StdRng::seed_from_u64(1);
    let xs = random_rows(&mut rng, 5, 4);
    let predictions = network.predict(&xs).unwrap();
    assert_eq!(predictions.len(), 5);
    assert!(predictions.iter().all(|row| row.len() == 3));
}

#[test]
fn test_softmax_network_outputs_distributions() {
    let network = sequential!(Layer::input(3), [Layer::softmax(3)]).unwrap();
    let xs = vec![
        vec![1000.0, 1000.0001, 999.0],
        vec![-1e6, 0.0, 1e6],
        vec![0.1, 0.2, 0.3],
    ];
    for row in network.predict(&xs).unwrap() {
        assert!(row.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p)));
        assert_abs_diff_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_input_layer_accepts_no_predecessor() {
    let mut dense = Layer::dense(2);
    assert_eq!(dense.push(Layer::input(2)), Err(LayerError::InputHasNoInputs));

    let mut chain = Layer::input(2);
    assert_eq!(chain.push(Layer::input(2)), Err(LayerError::InputHasNoInputs));
    assert_eq!(chain.len(), 1);
}

#[test]
fn test_append_after_loss_leaves_chain_unchanged() {
    let mut network = regression_network(1);
    let before = network.to_string();
    let weights = network[1].as_dense().unwrap().weights().to_vec();

    let err = network.push(Layer::dense(1)).unwrap_err();
    assert_eq!(
        err,
        LayerError::AppendAfterLoss {
            name: "LossLayer_1".to_string()
        }
    );
    assert!(network.concat(&Layer::dense(4)).is_err());
    assert_eq!(network.len(), 3);
    assert_eq!(network.to_string(), before);
    assert_eq!(network[1].as_dense().unwrap().weights(), weights.as_slice());
}

#[test]
fn test_activation_width_must_match() {
    let mut network = Network::with_input(2);
    let err = network
        .push(Layer::activation(3, Activation::relu()))
        .unwrap_err();
    assert_eq!(
        err,
        LayerError::DimensionMismatch {
            name: "ActivationLayer_1".to_string(),
            expected: 3,
            actual: 2
        }
    );
    assert_eq!(network.len(), 1);
}

#[test]
fn test_auto_names_count_per_kind() {
    let network = sequential!(
        Layer::input(2),
        [
            Layer::dense(3),
            Layer::activation(3, Activation::tanh()),
            Layer::dense(1),
            Layer::loss(Loss::default()),
        ]
    )
    .unwrap();
    assert_eq!(
        names(&network),
        vec![
            "InputLayer_1",
            "DenseLayer_1",
            "ActivationLayer_1",
            "DenseLayer_2",
            "LossLayer_1"
        ]
    );

    // a standalone node is the first of its kind
    assert_eq!(Layer::softmax(2).name(), "SoftmaxLayer_1");
}

#[test]
fn test_auto_names_skip_taken_names() {
    let network = sequential!(
        Layer::input(1),
        [Layer::dense(1).named("DenseLayer_2"), Layer::dense(1), Layer::dense(1)]
    )
    .unwrap();
    assert_eq!(
        names(&network),
        vec!["InputLayer_1", "DenseLayer_2", "DenseLayer_3", "DenseLayer_4"]
    );
}

#[test]
fn test_explicit_names_and_lookup() {
    let network = sequential!(
        Layer::input(2).named("features"),
        [
            Layer::dense(2).named("hidden"),
            Layer::loss(Loss::default()).named("objective"),
        ]
    )
    .unwrap();

    assert_eq!(network["hidden"].output_width(), Some(2));
    assert_eq!(network.get_named("objective").unwrap().input_width(), Some(2));
    assert_eq!(
        network.get_named("missing").unwrap_err(),
        LayerError::NameNotFound("missing".to_string())
    );
    assert_eq!(
        network.get(3).unwrap_err(),
        LayerError::IndexOutOfRange { index: 3, len: 3 }
    );
}

#[test]
fn test_duplicate_explicit_name_is_rejected() {
    let mut network = Network::with_input(2);
    network.push(Layer::dense(2).named("hidden")).unwrap();
    assert_eq!(
        network.push(Layer::dense(2).named("hidden")),
        Err(LayerError::DuplicateName("hidden".to_string()))
    );
    assert_eq!(
        network.push(Layer::dense(2).named("InputLayer_1")),
        Err(LayerError::DuplicateName("InputLayer_1".to_string()))
    );
    assert_eq!(network.len(), 2);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_index_past_the_end_panics() {
    let network = Network::with_input(1);
    let _ = &network[1];
}

#[test]
fn test_display_renders_the_chain() {
    let network = sequential!(
        Layer::input(2),
        [
            Layer::dense(3),
            Layer::activation(3, Activation::sigmoid()),
            Layer::loss(Loss::default()),
        ]
    )
    .unwrap();
    assert_eq!(
        network.to_string(),
        "InputLayer(num_outputs=2, name='InputLayer_1') + \
         DenseLayer(num_outputs=3, name='DenseLayer_1') + \
         ActivationLayer(num_outputs=3, name='ActivationLayer_1', activation='sigmoid') + \
         LossLayer(num_inputs=3, name='LossLayer_1', loss='mean_squared_error')"
    );
}

#[test]
fn test_concat_copies_both_chains() {
    let head = sequential!(Layer::input(2), [Layer::dense_seeded(2, 1)]).unwrap();
    let fragment = Layer::dense_seeded(1, 5)
        .with_successor(Layer::loss(Loss::default()))
        .unwrap();

    let mut joined = head.concat(&fragment).unwrap();
    assert_eq!(joined.len(), head.len() + fragment.len());
    assert_eq!(
        names(&joined),
        vec!["InputLayer_1", "DenseLayer_1", "DenseLayer_2", "LossLayer_1"]
    );

    let original = head[1].as_dense().unwrap();
    let copied = joined[1].as_dense().unwrap();
    assert_eq!(original.weights(), copied.weights());
    assert!(!std::ptr::eq(original.weights(), copied.weights()));

    let before = original.weights().to_vec();
    let xs = vec![vec![1.0, -1.0]];
    let ys = vec![vec![3.0]];
    joined.partial_fit(&xs, &ys, 0.5, None).unwrap();

    assert_ne!(joined[1].as_dense().unwrap().weights(), before.as_slice());
    assert_eq!(head[1].as_dense().unwrap().weights(), before.as_slice());
    assert_eq!(head.len(), 2);
    // the fragment never got an input width, so it is still uninitialized
    assert!(fragment.as_dense().unwrap().weights().is_empty());
    assert_eq!(fragment.input_width(), None);
}

#[test]
fn test_attached_fragment_keeps_its_parameters() {
    let source = regression_network(9);
    let tail = source.get(1).unwrap().clone();
    let weights = tail.as_dense().unwrap().weights().to_vec();

    let rebuilt = Network::with_input(2).then(tail).unwrap();
    assert_eq!(rebuilt[1].as_dense().unwrap().weights(), weights.as_slice());

    let err = Network::with_input(3)
        .then(source.get(1).unwrap().clone())
        .unwrap_err();
    assert_eq!(
        err,
        LayerError::DimensionMismatch {
            name: "DenseLayer_1".to_string(),
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn test_same_seed_same_network() {
    let a = regression_network(77);
    let b = regression_network(77);
    assert_eq!(a[1].as_dense(), b[1].as_dense());
    assert_eq!(a[1].as_dense().unwrap().seed(), 77);
}

#[test]
fn test_call_returns_what_was_asked_for() {
    let mut network = regression_network(3);
    let xs = vec![vec![0.5, -0.5], vec![1.0, 2.0]];
    let ys = vec![vec![1.0], vec![0.0]];

    let plain = network.call(&xs, None, None).unwrap();
    assert_eq!(plain.predictions.len(), 2);
    assert!(plain.losses.is_none());
    assert!(plain.gradients.is_none());

    let scored = network.call(&xs, Some(ys.as_slice()), None).unwrap();
    assert_eq!(scored.predictions, plain.predictions);
    assert_eq!(scored.losses.as_ref().map(Vec::len), Some(2));
    assert!(scored.gradients.is_none());

    let trained = network.call(&xs, Some(ys.as_slice()), Some(0.1)).unwrap();
    assert_eq!(trained.predictions, plain.predictions);
    let gradients = trained.gradients.unwrap();
    assert_eq!(gradients.len(), 2);
    assert!(gradients.iter().all(|g| g.len() == 2));

    // the update happened after the predictions above were made
    assert_ne!(network.predict(&xs).unwrap(), plain.predictions);
}

#[test]
fn test_rate_without_labels_changes_nothing() {
    let mut network = regression_network(4);
    let xs = vec![vec![1.0, 1.0]];
    let before = network.predict(&xs).unwrap();
    let outcome = network.call(&xs, None, Some(1.0)).unwrap();
    assert!(outcome.gradients.is_none());
    assert_eq!(network.predict(&xs).unwrap(), before);
}

#[test]
fn test_loss_is_summed_over_units() {
    let network = sequential!(Layer::input(2), [Layer::loss(Loss::mean_squared_error())]).unwrap();
    let xs = vec![vec![1.0, 2.0]];
    let ys = vec![vec![0.0, 0.0]];
    let outcome = network.infer(&xs, Some(ys.as_slice())).unwrap();
    assert_eq!(outcome.losses, Some(vec![5.0]));
    assert_eq!(outcome.predictions, xs);
}

#[test]
fn test_input_gradients_match_finite_differences() {
    let mut network = sequential!(
        Layer::input(2),
        [
            Layer::dense_seeded(3, 11),
            Layer::activation(3, Activation::tanh()),
            Layer::dense_seeded(2, 12),
            Layer::softmax(2),
            Layer::loss(Loss::mean_squared_error()),
        ]
    )
    .unwrap();
    let reference = network.clone();

    let xs = vec![vec![0.3, -0.7], vec![-1.2, 0.4]];
    let ys = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    let gradients = network
        .call(&xs, Some(ys.as_slice()), Some(0.01))
        .unwrap()
        .gradients
        .unwrap();

    let h = 1e-5;
    for (n, x) in xs.iter().enumerate() {
        for j in 0..x.len() {
            let mut plus = x.clone();
            let mut minus = x.clone();
            plus[j] += h;
            minus[j] -= h;
            let label = std::slice::from_ref(&ys[n]);
            let up = reference.infer(&[plus], Some(label)).unwrap().losses.unwrap()[0];
            let down = reference.infer(&[minus], Some(label)).unwrap().losses.unwrap()[0];
            assert_abs_diff_eq!(gradients[n][j], (up - down) / (2.0 * h), epsilon = 1e-6);
        }
    }
}

#[test]
fn test_numeric_derivative_activation_backpropagates() {
    let mut network = sequential!(
        Layer::input(2),
        [
            Layer::dense_seeded(2, 31),
            Layer::activation(2, Activation::swish(1.0)),
            Layer::dense_seeded(1, 32),
            Layer::loss(Loss::mean_squared_error()),
        ]
    )
    .unwrap();
    let reference = network.clone();

    let xs = vec![vec![0.8, -0.3]];
    let ys = vec![vec![0.5]];
    let gradients = network
        .call(&xs, Some(ys.as_slice()), Some(0.01))
        .unwrap()
        .gradients
        .unwrap();

    let h = 1e-5;
    for j in 0..2 {
        let mut plus = xs[0].clone();
        let mut minus = xs[0].clone();
        plus[j] += h;
        minus[j] -= h;
        let up = reference.infer(&[plus], Some(ys.as_slice())).unwrap().losses.unwrap()[0];
        let down = reference.infer(&[minus], Some(ys.as_slice())).unwrap().losses.unwrap()[0];
        assert_abs_diff_eq!(gradients[0][j], (up - down) / (2.0 * h), epsilon = 1e-4);
    }
}

#[test]
fn test_dense_update_follows_the_loss_gradient() {
    let mut network = regression_network(21);
    let before = network[1].as_dense().unwrap().clone();
    let x = vec![0.5, -2.0];
    let y = 1.5;

    let yhat = network.predict(&[x.clone()]).unwrap()[0][0];
    network
        .partial_fit(&[x.clone()], &[vec![y]], 0.25, None)
        .unwrap();

    let after = network[1].as_dense().unwrap();
    let slope = 2.0 * (yhat - y);
    for (i, v) in x.iter().enumerate() {
        assert_abs_diff_eq!(
            after.weights()[0][i],
            before.weights()[0][i] - 0.25 * slope * v,
            epsilon = 1e-12
        );
    }
    assert_abs_diff_eq!(after.biases()[0], -0.25 * slope, epsilon = 1e-12);
}

#[test]
fn test_fit_on_separable_data() {
    let mut network = sequential!(
        Layer::input(2),
        [Layer::dense(1), Layer::loss(Loss::default())]
    )
    .unwrap();
    let xs = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
    let ys = vec![vec![0.0], vec![1.0]];

    let history = network.fit(&xs, &ys, 0.1, 1000).unwrap();
    assert_eq!(history.epochs(), 1000);
    assert!(network.evaluate(&xs, &ys).unwrap() < 0.01);
    assert_abs_diff_eq!(
        history.last(LOSS).unwrap(),
        network.evaluate(&xs, &ys).unwrap()
    );
}

#[test]
fn test_fit_learns_xor() {
    let mut network = sequential!(
        Layer::input(2),
        [
            Layer::dense_seeded(4, 42),
            Layer::activation(4, Activation::tanh()),
            Layer::dense_seeded(1, 43),
            Layer::activation(1, Activation::tanh()),
            Layer::loss(Loss::mean_squared_error()),
        ]
    )
    .unwrap();
    let xs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let ys = vec![vec![-1.0], vec![1.0], vec![1.0], vec![-1.0]];

    let history = network.fit(&xs, &ys, 0.2, 2000).unwrap();
    assert!(history.last(LOSS).unwrap() < 0.01);
    assert_eq!(accuracy(&network.predict(&xs).unwrap(), &ys), 1.0);
}

#[test]
fn test_minibatches_with_validation() {
    let mut rng = StdRng::seed_from_u64(5);
    let target = |x: &Vec<f64>| vec![2.0 * x[0] - x[1] + 0.5];
    let xs = random_rows(&mut rng, 40, 2);
    let ys: Vec<Vec<f64>> = xs.iter().map(target).collect();
    let val_xs = random_rows(&mut rng, 10, 2);
    let val_ys: Vec<Vec<f64>> = val_xs.iter().map(target).collect();

    let config = TrainConfig::default()
        .learning_rate(0.05)
        .epochs(50)
        .batch_size(4)
        .shuffle(true)
        .seed(3);

    let mut a = regression_network(8);
    let mut b = regression_network(8);
    let history = a
        .fit_with(&xs, &ys, &config, Some((val_xs.as_slice(), val_ys.as_slice())))
        .unwrap();
    let again = b
        .fit_with(&xs, &ys, &config, Some((val_xs.as_slice(), val_ys.as_slice())))
        .unwrap();

    assert_eq!(history, again);
    let losses = history.get(LOSS).unwrap();
    let validation = history.get(VALIDATION_LOSS).unwrap();
    assert_eq!(losses.len(), 50);
    assert_eq!(validation.len(), 50);
    assert!(losses[49] < losses[0]);
    assert!(validation[49] < validation[0]);
}

#[test]
fn test_partial_fit_reports_the_pass_loss() {
    let mut network = regression_network(13);
    let xs = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
    let ys = vec![vec![1.0], vec![-1.0], vec![0.0]];

    let before = network.evaluate(&xs, &ys).unwrap();
    let full_batch = network.clone().partial_fit(&xs, &ys, 0.1, None).unwrap();
    assert_abs_diff_eq!(full_batch, before, epsilon = 1e-12);

    let pass = network.partial_fit(&xs, &ys, 0.1, Some(1)).unwrap();
    assert!(pass.is_finite());
    assert!(network.evaluate(&xs, &ys).unwrap() < before);
}

#[test]
fn test_training_errors() {
    let mut network = regression_network(2);
    let xs = vec![vec![1.0, 2.0]];
    let ys = vec![vec![1.0]];

    assert_eq!(
        network.partial_fit(&xs, &ys, 0.1, Some(0)),
        Err(LayerError::ZeroBatchSize)
    );
    assert_eq!(
        network.evaluate(&[], &[]),
        Err(LayerError::EmptyDataset("evaluate"))
    );
    assert_eq!(
        network.fit(&[], &[], 0.1, 3).unwrap_err(),
        LayerError::EmptyDataset("fit")
    );
    assert_eq!(
        network.evaluate(&[vec![1.0, 2.0], vec![0.0, 0.0]], &ys),
        Err(LayerError::LabelCountMismatch {
            instances: 2,
            labels: 1
        })
    );
    assert_eq!(
        network.evaluate(&xs, &[vec![1.0, 0.0]]),
        Err(LayerError::DimensionMismatch {
            name: "LossLayer_1".to_string(),
            expected: 1,
            actual: 2
        })
    );
    assert_eq!(
        network.predict(&[vec![1.0, 2.0, 3.0]]),
        Err(LayerError::DimensionMismatch {
            name: "InputLayer_1".to_string(),
            expected: 2,
            actual: 3
        })
    );

    let mut open_ended = sequential!(Layer::input(2), [Layer::dense(1)]).unwrap();
    let before = open_ended.predict(&xs).unwrap();
    assert_eq!(
        open_ended.partial_fit(&xs, &ys, 0.1, None),
        Err(LayerError::MissingLossLayer)
    );
    assert_eq!(open_ended.predict(&xs).unwrap(), before);
}

#[test]
fn test_failed_training_leaves_weights_untouched() {
    let mut network = regression_network(4);
    let weights = network[1].as_dense().unwrap().clone();
    let unchanged = |network: &Network| {
        let dense = network[1].as_dense().unwrap();
        dense.weights() == weights.weights() && dense.biases() == weights.biases()
    };

    // the bad row sits in the second batch
    let xs = vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0]];
    let ys = vec![vec![1.0], vec![0.0]];
    assert_eq!(
        network.partial_fit(&xs, &ys, 0.5, Some(1)),
        Err(LayerError::DimensionMismatch {
            name: "InputLayer_1".to_string(),
            expected: 2,
            actual: 3
        })
    );
    assert!(unchanged(&network));

    let xs = vec![vec![1.0, 2.0], vec![0.5, 0.5]];
    let wide_label = vec![vec![1.0], vec![0.0, 1.0]];
    assert_eq!(
        network.partial_fit(&xs, &wide_label, 0.5, Some(1)),
        Err(LayerError::DimensionMismatch {
            name: "LossLayer_1".to_string(),
            expected: 1,
            actual: 2
        })
    );
    assert!(unchanged(&network));

    let val_xs = vec![vec![1.0]];
    let val_ys = vec![vec![1.0]];
    let config = TrainConfig::default().epochs(3);
    assert_eq!(
        network
            .fit_with(&xs, &ys, &config, Some((val_xs.as_slice(), val_ys.as_slice())))
            .unwrap_err(),
        LayerError::DimensionMismatch {
            name: "InputLayer_1".to_string(),
            expected: 2,
            actual: 1
        }
    );
    assert!(unchanged(&network));
}

#[test]
fn test_structural_errors() {
    assert_eq!(
        Network::new(Layer::dense(2)).unwrap_err(),
        LayerError::NotAnInputLayer("DenseLayer".to_string())
    );
    assert!(Network::try_from(Layer::input(2)).is_ok());
    assert_eq!(
        Layer::dense(2).infer(&[vec![1.0]], None).unwrap_err(),
        LayerError::Detached {
            name: "DenseLayer_1".to_string()
        }
    );
    assert!(matches!(Layer::input(1).kind(), LayerKind::Input));
}

#[test]
fn test_perceptron_and_gate() {
    let xs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let ys = vec![-1.0, -1.0, -1.0, 1.0];

    let mut perceptron = Perceptron::new(2);
    let epochs = perceptron.fit(&xs, &ys, 100).unwrap();
    assert!(perceptron.is_fitted());
    assert!(epochs < 100);
    assert_eq!(perceptron.predict(&xs).unwrap(), ys);
    assert_eq!(perceptron.to_string(), "Perceptron(dim=2)");
}

#[test]
fn test_linear_regression_recovers_the_line() {
    let xs = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
    let ys = vec![1.0, 3.0, 5.0, 7.0];

    let mut model = LinearRegression::new(1);
    model
        .fit(
            &xs,
            &ys,
            LinearRegression::DEFAULT_ALPHA,
            LinearRegression::DEFAULT_EPOCHS,
        )
        .unwrap();
    assert_abs_diff_eq!(model.bias(), 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(model.weights()[0], 2.0, epsilon = 1e-3);
}

#[test]
fn test_default_neuron_is_linear_regression() {
    let xs = vec![vec![0.0, 1.0], vec![1.0, -1.0], vec![2.0, 0.5]];
    let ys = vec![0.5, -1.0, 2.0];

    // squared error doubles the slope, so half the learning rate matches
    let mut neuron = Neuron::new(2);
    let mut regression = LinearRegression::new(2);
    neuron.fit(&xs, &ys, 0.005, 200).unwrap();
    regression.fit(&xs, &ys, 0.01, 200).unwrap();

    assert_abs_diff_eq!(neuron.bias(), regression.bias(), epsilon = 1e-9);
    for (a, b) in neuron.weights().iter().zip(regression.weights()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
    assert_eq!(
        neuron.to_string(),
        "Neuron(dim=2, activation=linear, loss=mean_squared_error)"
    );
}

#[test]
fn test_sigmoid_neuron_separates_classes() {
    let xs = vec![vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]];
    let ys = vec![0.0, 0.0, 1.0, 1.0];

    let mut neuron = Neuron::new(1)
        .with_activation(Activation::sigmoid())
        .with_loss(Loss::binary_crossentropy());
    neuron.fit(&xs, &ys, 0.5, 500).unwrap();

    let predictions = neuron.predict(&xs).unwrap();
    for (p, y) in predictions.iter().zip(&ys) {
        assert!((p - y).abs() < 0.1, "{p} vs {y}");
    }
}

#[test]
fn test_single_neuron_models_check_their_input() {
    let mut perceptron = Perceptron::new(2);
    assert_eq!(
        perceptron.partial_fit(&[vec![1.0]], &[1.0]),
        Err(LayerError::DimensionMismatch {
            name: "Perceptron".to_string(),
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(
        LinearRegression::new(1).partial_fit(&[vec![1.0]], &[1.0, 2.0], 0.1),
        Err(LayerError::LabelCountMismatch {
            instances: 1,
            labels: 2
        })
    );
    assert!(Neuron::new(3).predict(&[vec![0.0; 2]]).is_err());
}

#[derive(Debug, PartialEq, Stackable)]
struct Pair(Vec<Vec<f64>>, Vec<Vec<f64>>);

#[test]
fn test_derived_stackable_merges_fields() {
    let pair = Pair::stack(vec![
        Pair(vec![vec![1.0]], vec![vec![2.0]]),
        Pair(vec![vec![3.0]], vec![vec![4.0]]),
    ]);
    assert_eq!(pair, Pair(vec![vec![1.0], vec![3.0]], vec![vec![2.0], vec![4.0]]));

    let batch = Batch::stack(vec![
        Batch {
            xs: vec![vec![0.0, 1.0]],
            ys: vec![vec![1.0]],
        },
        Batch {
            xs: vec![vec![1.0, 0.0]],
            ys: vec![vec![0.0]],
        },
    ]);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.ys, vec![vec![1.0], vec![0.0]]);
}

#[test]
fn test_dataloader_over_labeled_set() {
    let xs: Vec<Vec<f64>> = (0..7).map(|i| vec![i as f64, 0.0]).collect();
    let ys: Vec<Vec<f64>> = (0..7).map(|i| vec![i as f64]).collect();
    let set = LabeledSet::new(&xs, &ys).unwrap();
    assert_eq!(set.len(), 7);

    let loader = Dataloader::new(set, 3, false);
    let batches: Vec<Batch> = loader.iter_batch().collect();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[2].xs, vec![vec![6.0, 0.0]]);
    for batch in &batches {
        for (x, y) in batch.xs.iter().zip(&batch.ys) {
            assert_eq!(x[0], y[0]);
        }
    }
}

#[cfg(feature = "serialization")]
#[test]
fn test_history_and_config_serialize() {
    let mut network = regression_network(6);
    let xs = vec![vec![1.0, 0.0]];
    let ys = vec![vec![1.0]];
    let history = network.fit(&xs, &ys, 0.1, 3).unwrap();

    let json = history.to_json().unwrap();
    assert!(json.contains("\"loss\""));
    assert_eq!(crate::ml::history::History::from_json(&json).unwrap(), history);

    let config: TrainConfig = serde_json::from_str(r#"{"epochs": 5, "shuffle": true}"#).unwrap();
    assert_eq!(config.epochs, 5);
    assert!(config.shuffle);
    assert_eq!(config.learning_rate, TrainConfig::default().learning_rate);
}
