//! Base Energy object (class code 0x4E)
//!
//! Implements the energy-metering device object: three odometer-style
//! energy counters with a segmented base-1000 wire encoding, the
//! permission-checked attribute handlers, and the cyclic metering state
//! machine that feeds measured deltas into the counters.

pub mod base_energy;
pub mod metering;
pub mod odometer;

pub use base_energy::{BASE_ENERGY_CLASS_CODE, BASE_ENERGY_REVISION, BaseEnergyObject};
pub use metering::{
    DATA_STATUS_METERING, DATA_STATUS_NOT_METERING, EnergySource, MeteringCycle, MeteringState,
};
pub use odometer::{
    EnergyOdometers, ODOMETER_MAX_WH, ODOMETER_MIN_WH, ODOMETER_POSITIONS, WrapMode,
    encode_signed_odometer, encode_unsigned_odometer, signed_digit_groups, unsigned_digit_groups,
};
