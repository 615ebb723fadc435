pub mod enumeration;
pub mod partition;
pub mod pool;
