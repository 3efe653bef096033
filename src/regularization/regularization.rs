use serde::{Serialize, Deserialize};

/// Weight penalty applied during `Network::update_weights`.
///
/// A network built without regularization stores `None` on every link, which
/// contributes nothing to the update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regularization {
    L1,
    L2,
}

impl Regularization {
    pub fn penalty(&self, w: f64) -> f64 {
        match self {
            Regularization::L1 => w.abs(),
            Regularization::L2 => 0.5 * w * w,
        }
    }

    pub fn derivative(&self, w: f64) -> f64 {
        match self {
            // f64::signum maps 0.0 to 1.0, so compare explicitly.
            Regularization::L1 => {
                if w < 0.0 {
                    -1.0
                } else if w > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Regularization::L2 => w,
        }
    }

    /// Whether a sign flip under this penalty freezes the link at zero.
    pub fn prunes(&self) -> bool {
        matches!(self, Regularization::L1)
    }
}
