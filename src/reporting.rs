//! # Reporting Module / 报告模块
//!
//! This module handles the display and export of harness results: coloured
//! console summaries, matrix and scenario listings, and HTML/JSON summary
//! reports.
//!
//! 此模块处理测试结果的显示和导出：彩色控制台摘要、矩阵和场景列表，以及 HTML/JSON 摘要报告。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_dimensions, print_scenario_paths, print_summary};
pub use html::generate_html_report;
pub use json::write_json_report;
