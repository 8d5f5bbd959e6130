pub mod estimate;
pub mod input_sample;
pub mod project;
pub mod roadmap;
pub mod roadmap_configuration;
pub mod throughput;
