#![cfg_attr(not(test), no_std)]

//! Board adapters binding the WordSeek core to ESP32-S3 peripherals.

pub mod input;
pub mod network;
pub mod platform;
