//! VoidRay - a tile-based first-person ray-casting engine.
//!
//! The core turns a player pose plus a 2-D grid of typed tiles into one
//! shaded wall column per screen column.  Everything around it (window,
//! input decoding, map files) lives in the binaries and the `map` module;
//! the core itself never touches a pixel buffer.

pub mod config;
pub mod engine;
pub mod map;
pub mod sim;
pub mod world;
