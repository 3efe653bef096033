use serde::Serialize;

use crate::graph::node::NodeId;
use crate::regularization::regularization::Regularization;

/// Handle of a link in `Network`'s link arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkId(pub(crate) usize);

impl LinkId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Weighted edge from a node in layer l-1 to a node in layer l.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    /// `"<source.id>-><dest.id>"`
    pub id: String,
    pub source: NodeId,
    pub dest: NodeId,
    pub weight: f64,
    /// Set once L1 regularization has snapped the weight to zero. Never cleared.
    pub is_dead: bool,
    pub error_der: f64,
    pub acc_error_der: f64,
    pub num_accumulated_ders: usize,
    pub regularization: Option<Regularization>,
}

impl Link {
    pub(crate) fn new(
        id: String,
        source: NodeId,
        dest: NodeId,
        weight: f64,
        regularization: Option<Regularization>,
    ) -> Link {
        Link {
            id,
            source,
            dest,
            weight,
            is_dead: false,
            error_der: 0.0,
            acc_error_der: 0.0,
            num_accumulated_ders: 0,
            regularization,
        }
    }

    pub fn is_accumulating(&self) -> bool {
        self.num_accumulated_ders > 0
    }

    pub(crate) fn accumulate(&mut self) {
        self.acc_error_der += self.error_der;
        self.num_accumulated_ders += 1;
    }

    pub(crate) fn reset_accumulator(&mut self) {
        self.acc_error_der = 0.0;
        self.num_accumulated_ders = 0;
    }

    /// Applies the averaged gradient step, then the regularization step.
    ///
    /// Under L1 a sign change across the regularization step kills the link.
    /// Returns true if this call killed it.
    pub(crate) fn apply_update(&mut self, learning_rate: f64, regularization_rate: f64) -> bool {
        if self.num_accumulated_ders == 0 {
            return false;
        }
        if self.is_dead {
            self.reset_accumulator();
            return false;
        }
        self.weight -= (learning_rate / self.num_accumulated_ders as f64) * self.acc_error_der;
        self.reset_accumulator();

        let Some(regularization) = self.regularization else {
            return false;
        };
        let trial = self.weight
            - learning_rate * regularization_rate * regularization.derivative(self.weight);
        if regularization.prunes() && self.weight * trial < 0.0 {
            self.weight = 0.0;
            self.is_dead = true;
            true
        } else {
            self.weight = trial;
            false
        }
    }
}
