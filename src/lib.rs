//! Client library for a football tournament backend.
//!
//! [`TorneoClient`] talks to the REST API, [`Repository`] caches what it
//! fetched, and the [`standings`] functions rank teams, order fixtures and
//! compute dashboard figures over those snapshots.

pub use client::TorneoClient;
pub use config::ClientConfig;
pub use error::{Result, TorneoError};
pub use model::*;
pub use repository::{Mutation, Repository, Resource, ResourceKey, ResourceSource};
pub use standings::*;

mod api;
mod client;
mod config;
mod error;
pub mod model;
pub mod repository;
pub mod standings;
