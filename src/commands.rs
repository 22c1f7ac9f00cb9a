//! # Commands Module / 命令模块
//!
//! Entry points that tie configuration, the supervisor, the host and the
//! reports together into one suite run.
//!
//! 将配置、监督器、宿主和报告串联为一次完整套件运行的入口。

pub mod run;
