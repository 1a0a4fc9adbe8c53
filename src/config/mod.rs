pub mod app_config;
pub mod dotenv;
pub mod settings;
