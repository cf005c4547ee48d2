// Domain layer: value types and the ports the page collaborators implement.

pub mod model;
pub mod ports;
