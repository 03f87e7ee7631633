//! # Policy Networks
//!
//! Everything the driving policy needs to learn online: a plain [`Tensor`],
//! the [`Dense`], [`Sigmoid`] and [`Softmax`] layers with hand-written
//! backward passes, a [`Sequential`] container, [`Adam`]/[`Sgd`] optimisers
//! and categorical cross-entropy.
//!
//! Callers should program against [`Approximator`] rather than [`Mlp`]
//! directly; the trait is the seam where another numeric backend plugs in.

pub mod approximator;
pub mod error;
pub mod loss;
pub mod nn;
pub mod optim;
pub mod tensor;

pub use approximator::{Approximator, Mlp};
pub use error::MlError;
pub use loss::{categorical_cross_entropy, categorical_cross_entropy_grad};
pub use nn::{Dense, Layer, Sequential, Sigmoid, Softmax};
pub use optim::{Adam, Optimizer, Sgd};
pub use tensor::Tensor;
