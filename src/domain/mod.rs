//! Domain Layer
//!
//! The deploy engine's core types and rules.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (FileEntry, DeployCache)
//! - `value_objects/` - Immutable value types (ContentHash, ExclusionRule, RemotePath)
//! - `services/` - Domain services (FileCollector, ChangeDetector)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **Remote I/O only through ports** - services may read the local tree,
//!    everything that touches the destination goes through `RemoteSession`
//! 2. **Stateless services** - results are returned, never stored globally
//! 3. **Ports & Adapters** - persistence, prompts and transport are traits

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
