//! Domain Layer
//!
//! Pure logic without process or network I/O.
//!
//! ## Structure
//!
//! - `entities/` - Workspace descriptor, server, clone plans
//! - `value_objects/` - Exclude lists, validated paths, shell quoting
//! - `services/` - Clone script rendering and output parsing
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
