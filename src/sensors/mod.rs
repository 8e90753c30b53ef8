//! Sensor drivers.  Both read through the hw_init helpers, so on the host
//! they return whatever the `sim_*` injectors last stored.

pub mod analog;
pub mod temperature;
