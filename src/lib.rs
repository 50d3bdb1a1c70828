pub mod animation;
pub mod application;
pub mod config;
pub mod graphics;
pub mod logging;
pub mod math;
pub mod particles;
pub mod timing;
