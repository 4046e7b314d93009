#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod error;
pub mod game_service;
pub mod seed;

pub use app_services::AppServices;
pub use catalog::load_catalog;
pub use error::{AppServicesError, GameError, SeedError};
pub use game_service::GameService;
pub use seed::{import_levels, load_connection_fixture};
