//! Infinite Cosmos library
//!
//! A procedurally generated, chunk-streamed 2D space to fly through: stars,
//! planets, nebulae and black holes around a ship that discovers whatever it
//! passes close to.

pub mod camera;
pub mod chunk;
pub mod config;
pub mod constants;
pub mod cosmos;
pub mod error;
pub mod hud;
pub mod menu;
pub mod objects;
pub mod player;
pub mod proximity;
pub mod render;
pub mod simulation;
pub mod stats;
