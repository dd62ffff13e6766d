pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod guide;
pub mod host;
pub mod interaction;
pub mod io;
pub mod markers;
pub mod render;
pub mod session;
pub mod workspace;
