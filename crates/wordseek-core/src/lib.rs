#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

//! Board-agnostic logic for the WordSeek guessing game.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod graphics;
pub mod input;
pub mod service;
pub mod symbols;

pub use error::Error;
