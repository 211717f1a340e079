//! C2 — decompression model (spec.md §4.2): tissue state plus the ZH-L16B/C
//! coefficient tables it is parameterized over.

pub mod tissue;
pub mod zhl_values;

pub use tissue::{ceiling_limit, init, load, TissueState, COMPARTMENT_COUNT};
pub use zhl_values::{CompartmentParams, GasCoefficients, ZhlTable, ZHL_16B, ZHL_16C};
