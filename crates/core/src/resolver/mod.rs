//! Dependency resolver: makes sure ffmpeg is available before converting.
//!
//! The encoder is looked up on disk first (bundled copy, search path,
//! well-known install locations). Only if that fails is the host package
//! manager run, once, blocking until it exits.

mod config;
mod dependency;
mod error;
mod host_os;

pub use config::ResolverConfig;
pub use dependency::DependencyResolver;
pub use error::InstallError;
pub use host_os::HostOs;
