//! bookcheck - test-client core for the fakerestapi bookstore service.
//!
//! Layers, bottom up:
//! - `config`: layered settings (TOML file + env overrides) with typed defaults
//! - `http`: shared request template and synchronous client core
//! - `models` / `services`: typed CRUD façades for Books and Authors
//! - `generator`: randomized and edge-case fixtures with unique ids
//! - `poll`: bounded retry-until-true waiting for eventually-consistent reads
//!
//! The test suites in `tests/` consume these layers; nothing here asserts
//! business expectations on its own.

pub mod config;
pub mod error;
pub mod generator;
pub mod http;
pub mod logger;
pub mod models;
pub mod poll;
pub mod services;
