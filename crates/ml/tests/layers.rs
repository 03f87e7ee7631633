use ml::{Dense, Layer, Sequential, Sigmoid, Softmax, Tensor};

fn close(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (*x - *y).abs() < 1e-5)
}

#[test]
fn dense_forward_known_case() {
    let w = vec![1.0, -1.0, 0.2,
                 0.5, 2.0, 0.2];
    let b = vec![0.1, -0.1];
    let x = Tensor::from_vec(vec![3], vec![1.0, 2.0, 3.0]);
    let dense = Dense::new(w, b, 3, 2);
    let y = dense.forward(&x);
    assert!(close(&y.data, &[1.0 - 2.0 + 0.6 + 0.1, 0.5 + 4.0 + 0.6 - 0.1]));
}

#[test]
fn dense_backward_gradients() {
    let w = vec![1.0, 2.0,
                 -3.0, 0.5];
    let b = vec![0.1, -0.2];
    let x = Tensor::from_vec(vec![2], vec![0.5, -1.0]);
    let dense = Dense::new(w, b, 2, 2);
    let grad_out = Tensor::from_vec(vec![2], vec![1.0, -2.0]);
    let (dx, grads) = dense.backward(&x, &grad_out);
    let expected_dx = vec![1.0 * 1.0 + -3.0 * (-2.0), 2.0 * 1.0 + 0.5 * (-2.0)];
    let expected_dw = vec![0.5 * 1.0, -1.0 * 1.0,
                           0.5 * (-2.0), -1.0 * (-2.0)];
    assert!(close(&dx.data, &expected_dx));
    assert!(close(&grads[0].data, &expected_dw));
    assert!(close(&grads[1].data, &grad_out.data));
}

#[test]
fn dense_xavier_respects_glorot_limit() {
    let mut rng = fastrand::Rng::with_seed(42);
    let dense = Dense::xavier(5, 3, &mut rng);
    assert_eq!(dense.w.shape, vec![3, 5]);
    assert_eq!(dense.b.data, vec![0.0; 3]);
    let limit = (6.0f32 / 8.0).sqrt();
    assert!(dense.w.data.iter().all(|w| w.abs() <= limit));
}

#[test]
fn sigmoid_forward_backward() {
    let x = Tensor::from_vec(vec![2], vec![0.0, 1.0]);
    let y = Sigmoid.forward(&x);
    let expected = vec![0.5, 1.0 / (1.0 + (-1.0f32).exp())];
    assert!(close(&y.data, &expected));
    let grad_out = Tensor::from_vec(vec![2], vec![0.5, -0.5]);
    let (dx, params) = Sigmoid.backward(&x, &grad_out);
    assert!(params.is_empty());
    let exp_dx = vec![0.5 * 0.25, -0.5 * expected[1] * (1.0 - expected[1])];
    assert!(close(&dx.data, &exp_dx));
}

#[test]
fn softmax_is_a_distribution() {
    let x = Tensor::from_vec(vec![3], vec![1.0, 2.0, 3.0]);
    let y = Softmax.forward(&x);
    let sum: f32 = y.data.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    assert!(y.data[2] > y.data[1] && y.data[1] > y.data[0]);
}

#[test]
fn softmax_survives_large_logits() {
    let x = Tensor::from_vec(vec![2], vec![1000.0, 999.0]);
    let y = Softmax.forward(&x);
    assert!(y.is_finite());
}

#[test]
fn softmax_backward_matches_jacobian() {
    let x = Tensor::from_vec(vec![3], vec![0.3, -0.2, 0.9]);
    let s = Softmax.forward(&x).data;
    let grad_out = Tensor::from_vec(vec![3], vec![0.1, -0.1, 0.4]);
    let (dx, _) = Softmax.backward(&x, &grad_out);
    let mut expected = vec![0.0f32; 3];
    for i in 0..3 {
        for j in 0..3 {
            let delta = if i == j { 1.0 } else { 0.0 };
            expected[j] += grad_out.data[i] * s[i] * (delta - s[j]);
        }
    }
    assert!(close(&dx.data, &expected));
}

#[test]
fn sequential_gradients_follow_parameter_order() {
    let mut seq = Sequential::new();
    seq.push(Dense::new(vec![1.0], vec![0.0], 1, 1));
    seq.push(Sigmoid);
    seq.push(Dense::new(vec![0.5], vec![0.0], 1, 1));
    let x = Tensor::from_vec(vec![1], vec![2.0]);
    let (out, activations) = seq.forward(&x);
    let h = 1.0 / (1.0 + (-2.0f32).exp());
    assert!((out.data[0] - 0.5 * h).abs() < 1e-6);

    let grad_out = Tensor::from_vec(vec![1], vec![1.0]);
    let (_, grads) = seq.backward(&activations, &grad_out);
    let shapes: Vec<_> = seq.params().iter().map(|p| p.shape.clone()).collect();
    let grad_shapes: Vec<_> = grads.iter().map(|g| g.shape.clone()).collect();
    assert_eq!(shapes, grad_shapes);

    let dh = 0.5 * h * (1.0 - h);
    assert!(close(&grads[0].data, &[2.0 * dh]));
    assert!(close(&grads[1].data, &[dh]));
    assert!(close(&grads[2].data, &[h]));
    assert!(close(&grads[3].data, &[1.0]));
}
