/// Application layer - Use cases, DTOs and read models
///
/// This layer contains the application logic that orchestrates
/// catalog services and coordinates with infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod state;
pub mod use_cases;
