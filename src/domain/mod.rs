// Domain layer: the portfolio data model and the ports the pipeline talks through.

pub mod model;
pub mod ports;
