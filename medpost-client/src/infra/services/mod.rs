// Service abstractions the domains talk to instead of the concrete client.

pub mod api;

pub use api::ApiService;
