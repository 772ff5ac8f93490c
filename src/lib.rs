pub mod api;
pub mod config;
pub mod store;
pub mod telemetry;

pub mod util {
    pub mod env;
}
