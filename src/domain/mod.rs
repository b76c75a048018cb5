// Domain layer: dataset model, ports (interfaces), and pure statistics.

pub mod model;
pub mod ports;
pub mod stats;
