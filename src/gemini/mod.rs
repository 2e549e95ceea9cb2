// Gemini API client module

mod client;

pub use client::{GeminiClient, API_KEY_ENV};
