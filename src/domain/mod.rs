// Domain layer: card and draw models plus the ports the core talks through.

pub mod model;
pub mod ports;
