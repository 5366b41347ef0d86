pub mod infrastructure;
pub mod landmarks;
pub mod pose;
pub mod provider;
pub mod validator;
