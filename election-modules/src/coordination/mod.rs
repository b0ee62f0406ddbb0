pub mod memory_service;
