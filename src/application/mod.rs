//! Application layer - Use case orchestration over domain logic

pub mod dto;
pub mod ports;
pub mod services;
