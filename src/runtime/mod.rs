//! 运行时生命周期管理

pub mod lifetime;
