//! Bühlmann ZH-L16B-GF / ZH-L16C-GF compartment half-times and M-value
//! coefficients (spec.md §3 "Compartment constants"). Half-times are shared
//! between the B and C variants; the N2 A coefficient is tightened from
//! compartment 5 onward in the C variant (B is unchanged between variants).

use crate::common::ModelVariant;

/// Per-compartment parameters for one inert gas (N2 or He): half-time in
/// minutes plus Bühlmann A (bar) and B (dimensionless) coefficients, with the
/// decay constant `k = ln(2)/half_time` cached at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasCoefficients {
    pub half_time: f64,
    pub a: f64,
    pub b: f64,
    pub k: f64,
}

impl GasCoefficients {
    const fn new(half_time: f64, a: f64, b: f64) -> Self {
        // ln(2) inlined: const fn doesn't allow calling f64::ln.
        const LN_2: f64 = std::f64::consts::LN_2;
        Self {
            half_time,
            a,
            b,
            k: LN_2 / half_time,
        }
    }
}

/// The two gas coefficient sets for one of the sixteen compartments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompartmentParams {
    pub n2: GasCoefficients,
    pub he: GasCoefficients,
}

pub type ZhlTable = [CompartmentParams; 16];

macro_rules! params {
    ($n2_half:expr, $n2_a:expr, $n2_b:expr, $he_half:expr, $he_a:expr, $he_b:expr) => {
        CompartmentParams {
            n2: GasCoefficients::new($n2_half, $n2_a, $n2_b),
            he: GasCoefficients::new($he_half, $he_a, $he_b),
        }
    };
}

/// ZH-L16B-GF table.
pub const ZHL_16B: ZhlTable = [
    params!(5.0, 1.2599, 0.5050, 1.88, 1.6189, 0.4770),
    params!(8.0, 1.0000, 0.6514, 3.02, 1.3830, 0.5747),
    params!(12.5, 0.8618, 0.7222, 4.72, 1.1919, 0.6527),
    params!(18.5, 0.7562, 0.7825, 6.99, 1.0458, 0.7223),
    params!(27.0, 0.6667, 0.8126, 10.21, 0.9220, 0.7582),
    params!(38.3, 0.5933, 0.8434, 14.48, 0.8205, 0.7957),
    params!(54.3, 0.5282, 0.8693, 20.53, 0.7305, 0.8279),
    params!(77.0, 0.4701, 0.8910, 29.11, 0.6502, 0.8553),
    params!(109.0, 0.4187, 0.9092, 41.20, 0.5950, 0.8757),
    params!(146.0, 0.3798, 0.9222, 55.19, 0.5545, 0.8903),
    params!(187.0, 0.3497, 0.9319, 70.69, 0.5333, 0.8997),
    params!(239.0, 0.3223, 0.9403, 90.34, 0.5189, 0.9073),
    params!(305.0, 0.2850, 0.9477, 115.29, 0.5181, 0.9122),
    params!(390.0, 0.2737, 0.9544, 147.42, 0.5176, 0.9171),
    params!(498.0, 0.2523, 0.9602, 188.24, 0.5172, 0.9217),
    params!(635.0, 0.2327, 0.9653, 240.03, 0.5119, 0.9267),
];

/// ZH-L16C-GF table — identical half-times and He coefficients, but N2 A is
/// tightened from compartment 5 onward.
pub const ZHL_16C: ZhlTable = [
    params!(5.0, 1.2599, 0.5050, 1.88, 1.6189, 0.4770),
    params!(8.0, 1.0000, 0.6514, 3.02, 1.3830, 0.5747),
    params!(12.5, 0.8618, 0.7222, 4.72, 1.1919, 0.6527),
    params!(18.5, 0.7562, 0.7825, 6.99, 1.0458, 0.7223),
    params!(27.0, 0.6200, 0.8126, 10.21, 0.9220, 0.7582),
    params!(38.3, 0.5043, 0.8434, 14.48, 0.8205, 0.7957),
    params!(54.3, 0.4410, 0.8693, 20.53, 0.7305, 0.8279),
    params!(77.0, 0.4000, 0.8910, 29.11, 0.6502, 0.8553),
    params!(109.0, 0.3750, 0.9092, 41.20, 0.5950, 0.8757),
    params!(146.0, 0.3500, 0.9222, 55.19, 0.5545, 0.8903),
    params!(187.0, 0.3295, 0.9319, 70.69, 0.5333, 0.8997),
    params!(239.0, 0.3065, 0.9403, 90.34, 0.5189, 0.9073),
    params!(305.0, 0.2835, 0.9477, 115.29, 0.5181, 0.9122),
    params!(390.0, 0.2610, 0.9544, 147.42, 0.5176, 0.9171),
    params!(498.0, 0.2480, 0.9602, 188.24, 0.5172, 0.9217),
    params!(635.0, 0.2327, 0.9653, 240.03, 0.5119, 0.9267),
];

impl ModelVariant {
    pub fn table(&self) -> &'static ZhlTable {
        match self {
            ModelVariant::ZhlB => &ZHL_16B,
            ModelVariant::ZhlC => &ZHL_16C,
        }
    }
}
