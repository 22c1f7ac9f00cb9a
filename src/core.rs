//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Matrix Harness:
//! the dimension model, the Cartesian-product matrix engine, scenarios,
//! fixtures, the per-test runner and the process-wide supervisor.
//!
//! 此模块包含 Matrix Harness 的核心功能：
//! 维度模型、笛卡尔积矩阵引擎、场景、夹具、单测试运行器以及进程级监督器。

pub mod config;
pub mod dimension;
pub mod fixture;
pub mod matrix;
pub mod models;
pub mod runner;
pub mod scenario;
pub mod supervisor;

// Re-exports
pub use matrix::Matrix;
pub use models::Summary;
pub use supervisor::Supervisor;
