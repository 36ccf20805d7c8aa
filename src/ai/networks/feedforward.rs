use std::sync::Arc;

use crate::algebra::{Matrix, Vector};
use crate::error::{NetworkError, ParameterKind};

use super::activation::{relu, relu_prime};

/// Fully connected feedforward network with ReLU activation on every layer.
///
/// ```text
/// layer_sizes = [8, 6, 6, 6, 2]
/// weights[i]: (layer_sizes[i + 1] x layer_sizes[i])
/// biases[i]:  layer_sizes[i + 1]
/// a_{i+1} = relu(weights[i] . a_i + biases[i])
/// ```
///
/// Cloning deep-copies every weight matrix and bias vector; the layer-size
/// sequence is shared because it never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layer_sizes: Arc<[usize]>,
    weights: Vec<Matrix>,
    biases: Vec<Vector>,
}

impl Network {
    /// Build a zero-initialised network for the given layer widths.
    pub fn new(layer_sizes: &[usize]) -> Result<Self, NetworkError> {
        if layer_sizes.len() < 2 {
            return Err(NetworkError::TooFewLayers(layer_sizes.len()));
        }
        if let Some(index) = layer_sizes.iter().position(|&w| w == 0) {
            return Err(NetworkError::EmptyLayer(index));
        }

        let (weights, biases): (Vec<Matrix>, Vec<Vector>) = layer_sizes
            .windows(2)
            .map(|pair| (Matrix::zeros(pair[1], pair[0]), Vector::zeros(pair[1])))
            .unzip();

        Ok(Network {
            layer_sizes: layer_sizes.into(),
            weights,
            biases,
        })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Vector] {
        &self.biases
    }

    /// Number of weight matrices (equal to the number of bias vectors).
    pub fn transition_count(&self) -> usize {
        self.weights.len()
    }

    /// Evaluate the network on `input`, returning the output layer activation.
    pub fn forward(&self, input: &Vector) -> Result<Vector, NetworkError> {
        let mut activation = input.clone();
        for (weights, bias) in self.weights.iter().zip(&self.biases) {
            activation = relu(&weights.transform(&activation)?.add(bias)?);
        }
        Ok(activation)
    }

    /// One step of mini-batch gradient descent on squared error.
    ///
    /// Gradients are summed over the batch, averaged, then applied as
    /// `w -= learning_rate * avg_grad`. The network is left untouched if any
    /// sample fails.
    pub fn train(
        &mut self,
        inputs: &[Vector],
        targets: &[Vector],
        learning_rate: f64,
    ) -> Result<(), NetworkError> {
        if inputs.len() != targets.len() {
            return Err(NetworkError::BatchMismatch {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        if inputs.is_empty() {
            return Err(NetworkError::EmptyBatch);
        }

        let mut weight_grads: Vec<Matrix> = self
            .weights
            .iter()
            .map(|w| Matrix::zeros(w.rows(), w.columns()))
            .collect();
        let mut bias_grads: Vec<Vector> = self.biases.iter().map(|b| Vector::zeros(b.len())).collect();

        for (input, target) in inputs.iter().zip(targets) {
            // activations[0] is the input; zs[k] is the pre-activation of layer k + 1.
            let mut activations = Vec::with_capacity(self.layer_sizes.len());
            let mut zs = Vec::with_capacity(self.weights.len());
            activations.push(input.clone());
            for (k, (weights, bias)) in self.weights.iter().zip(&self.biases).enumerate() {
                let z = weights.transform(&activations[k])?.add(bias)?;
                activations.push(relu(&z));
                zs.push(z);
            }

            let last = self.weights.len() - 1;
            let mut delta = activations[last + 1]
                .subtract(target)?
                .multiply(&relu_prime(&zs[last]))?;

            for k in (0..=last).rev() {
                weight_grads[k] = weight_grads[k].add(&Matrix::outer(&delta, &activations[k]))?;
                bias_grads[k] = bias_grads[k].add(&delta)?;

                if k > 0 {
                    delta = self.weights[k]
                        .transpose()
                        .transform(&delta)?
                        .multiply(&relu_prime(&zs[k - 1]))?;
                }
            }
        }

        let inv_batch = 1.0 / inputs.len() as f64;
        let mut new_weights = Vec::with_capacity(self.weights.len());
        let mut new_biases = Vec::with_capacity(self.biases.len());
        for k in 0..self.weights.len() {
            let avg_w = weight_grads[k].scale(inv_batch);
            let avg_b = bias_grads[k].scale(inv_batch);
            new_weights.push(self.weights[k].subtract(&avg_w.scale(learning_rate))?);
            new_biases.push(self.biases[k].subtract(&avg_b.scale(learning_rate))?);
        }
        self.weights = new_weights;
        self.biases = new_biases;
        Ok(())
    }

    /// Add `delta` to weight matrix `index`.
    pub fn perturb_weights(&mut self, index: usize, delta: &Matrix) -> Result<(), NetworkError> {
        let count = self.weights.len();
        let current = self.weights.get(index).ok_or(NetworkError::ParameterIndex {
            kind: ParameterKind::Weights,
            index,
            count,
        })?;
        let updated = current.add(delta)?;
        self.weights[index] = updated;
        Ok(())
    }

    /// Add `delta` to bias vector `index`.
    pub fn perturb_biases(&mut self, index: usize, delta: &Vector) -> Result<(), NetworkError> {
        let count = self.biases.len();
        let current = self.biases.get(index).ok_or(NetworkError::ParameterIndex {
            kind: ParameterKind::Biases,
            index,
            count,
        })?;
        let updated = current.add(delta)?;
        self.biases[index] = updated;
        Ok(())
    }
}
