mod release_parameters;

pub use release_parameters::ReleaseParameters;
