pub mod fixed_backoff;
pub mod randomized_backoff;
