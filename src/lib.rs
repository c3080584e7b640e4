pub mod aggregate;
pub mod config;
pub mod data_source;
pub mod dates;
pub mod http_client;
pub mod league;
pub mod model;
pub mod provider;
pub mod slug;
pub mod state;
pub mod view;
