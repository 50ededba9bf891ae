pub mod app;
pub mod config;
pub mod error;
pub mod kakao;
pub mod meals;
pub mod menu;
pub mod state;
