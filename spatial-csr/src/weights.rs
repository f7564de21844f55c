//! Spatial weights from keyed neighbour lists
//!
//! A [`WeightsMatrix`] pairs an ordered list of observation keys with the
//! neighbours of each observation. The key order fixes the row and column
//! order of the dense and sparse representations.

use crate::sparse::CsrMatrix;
use crate::traits::RealField;
use ndarray::Array2;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A neighbour of an observation together with its weight
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<K, T = f64> {
    /// Key of the neighbouring observation
    pub id: K,
    /// Weight of the link
    pub weight: T,
}

impl<K, T> Neighbor<K, T> {
    /// Create a new neighbour
    pub fn new(id: K, weight: T) -> Self {
        Self { id, weight }
    }
}

/// Keyed neighbour lists defining a square weights matrix
#[derive(Debug, Clone)]
pub struct WeightsMatrix<K, T = f64> {
    keys: Vec<K>,
    weights: HashMap<K, Vec<Neighbor<K, T>>>,
}

impl<K, T> WeightsMatrix<K, T>
where
    K: Eq + Hash + Clone + Debug,
    T: RealField,
{
    /// Create a weights matrix from ordered keys and their neighbour lists
    ///
    /// Keys absent from `weights` have no neighbours.
    pub fn new(keys: Vec<K>, weights: HashMap<K, Vec<Neighbor<K, T>>>) -> Self {
        Self { keys, weights }
    }

    /// Observation keys, in row order
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Neighbour lists by key
    pub fn weights(&self) -> &HashMap<K, Vec<Neighbor<K, T>>> {
        &self.weights
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether there are no observations
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Dense n x n matrix ordered by [`keys`](Self::keys)
    ///
    /// Cell `(i, j)` holds the weight of the first neighbour of `keys[i]`
    /// whose id is `keys[j]`, or zero. Neighbours whose id is not a key are
    /// skipped.
    pub fn full(&self) -> Array2<T> {
        let n = self.keys.len();
        let position: HashMap<&K, usize> = self
            .keys
            .iter()
            .enumerate()
            .rev()
            .map(|(idx, key)| (key, idx))
            .collect();

        let mut dense = Array2::from_elem((n, n), T::zero());
        for (i, key) in self.keys.iter().enumerate() {
            let Some(neighbors) = self.weights.get(key) else {
                continue;
            };

            let mut seen = vec![false; n];
            for neighbor in neighbors {
                match position.get(&neighbor.id) {
                    Some(&j) if !seen[j] => {
                        seen[j] = true;
                        dense[[i, j]] = neighbor.weight;
                    }
                    Some(_) => {}
                    None => log::warn!(
                        "neighbor {:?} of {:?} is not a known key, skipping",
                        neighbor.id,
                        key
                    ),
                }
            }
        }

        dense
    }

    /// Sparse (CSR) representation of [`full`](Self::full)
    pub fn sparse(&self) -> CsrMatrix<T> {
        CsrMatrix::from_dense(&self.full())
    }
}
