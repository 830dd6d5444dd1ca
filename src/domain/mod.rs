// Domain layer: mark model, ports, and the parsing / geometry rules.

pub mod model;
pub mod neighbor;
pub mod parser;
pub mod ports;
