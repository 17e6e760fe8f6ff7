//! Core types for classtree.
//!
//! Provides the class entity model ([`entity::ClassEntity`]), the inheritance
//! forest ([`hierarchy::Forest`]) built from a flat entity list, aggregate
//! tree statistics, and configuration loading.

pub mod config;
pub mod entity;
pub mod hierarchy;
pub mod stats;
