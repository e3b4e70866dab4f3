pub mod artifact;
pub mod config;
pub mod html;
pub mod logging;
pub mod nav;
pub mod page;
pub mod render;
pub mod server;
