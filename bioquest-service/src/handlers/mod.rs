//! HTTP handlers for the BioQuest API.

pub mod app;
pub mod chat;
pub mod health;
pub mod media;
pub mod metrics;
pub mod quiz;
