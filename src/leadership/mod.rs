pub mod backoff;
pub mod dispatcher;
pub mod engine;
pub mod registrar;
pub mod resolver;
pub mod status;
