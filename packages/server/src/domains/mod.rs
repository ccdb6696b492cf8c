// Domain modules

pub mod members;
