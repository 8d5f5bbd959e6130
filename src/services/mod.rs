pub mod estimations_collection;
pub mod estimations_export;
pub mod forecast;
pub mod forecast_types;
pub mod histogram;
pub mod monte_carlo;
pub mod percentiles;
pub mod random_index;
pub mod roadmap_yaml;
pub mod throughput_yaml;
pub mod time_till_completion;
