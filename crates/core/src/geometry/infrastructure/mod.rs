pub mod centered_provider;
