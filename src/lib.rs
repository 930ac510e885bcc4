pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod graphs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod series;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
