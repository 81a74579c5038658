//! Gentle Birth - Health and Pregnancy Assessment
//!
//! This crate implements the onboarding questionnaire that collects a user's
//! age, conditions, pregnancy status and medications, persists the finished
//! answers, and personalizes the assistant and the downloadable report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
