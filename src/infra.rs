//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Matrix Harness:
//! the host sub-test scheduler and i18n support.
//!
//! 此模块为 Matrix Harness 提供基础设施服务：
//! 宿主子测试调度器和国际化支持。

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod host;

// Re-export i18n functions for easier access
pub use rust_i18n::t;

/// Locks `mutex`, recovering the data if a previous holder panicked.
/// No user code ever runs while one of the harness locks is held.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
