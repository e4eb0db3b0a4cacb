// Re-export parry for the f64 build
pub use parry3d_f64 as parry3d;

/// Our Real scalar type.
pub type Real = f64;

/// Internal guard tolerance for degenerate denominators and near-zero
/// vectors. Distinct from [`Precision`]: this is a numerical floor, not the
/// user-facing on-plane band.
pub const EPSILON: Real = 1e-8;

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;
/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;

/// Tolerance ladder for classifying points as on-plane vs. strictly in
/// front of / behind a cutting plane. Selected by the caller and threaded
/// through the clipper and the cap builder's edge collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[default]
    Standard,
    High,
    Ultra,
}

impl Precision {
    /// Half-width of the on-plane band. Vertices within the band count as
    /// kept (front), trading degenerate zero-area slivers for a small bias
    /// toward the front side.
    pub const fn epsilon(self) -> Real {
        match self {
            Precision::Standard => 1e-4,
            Precision::High => 1e-5,
            Precision::Ultra => 1e-6,
        }
    }
}
