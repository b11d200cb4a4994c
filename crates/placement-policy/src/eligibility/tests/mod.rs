mod common;
mod config;
mod service;
