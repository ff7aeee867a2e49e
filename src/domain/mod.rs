// Domain layer: data types and the ports the core consumes. No I/O here.

pub mod model;
pub mod ports;
