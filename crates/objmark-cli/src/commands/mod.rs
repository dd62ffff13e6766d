pub mod config;
pub mod crop;
pub mod export;
pub mod info;
pub mod run;
