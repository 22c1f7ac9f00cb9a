//! # Demo Module / 演示模块
//!
//! A deliberately small example domain used to show the harness in action,
//! and run by the `fib-matrix` binary. Not meant for anything else.
//!
//! 用于演示测试工具的刻意精简的示例领域，由 `fib-matrix` 可执行文件运行。不适用于其他用途。

pub mod fibonacci;
