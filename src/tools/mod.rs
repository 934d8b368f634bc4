//! 工具模块集合
//!
//! 包含CLI、片段扫描、解码累加、导出和运行日志，支持main.rs的流程控制。

pub mod cli;
pub mod constants;
pub mod exporter;
pub mod merger;
pub mod processor;
pub mod run_log;
pub mod scanner;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{AppConfig, parse_args, parse_args_from, show_completion_info, show_startup_info};
pub use exporter::{export_merged, generate_output_path};
pub use merger::{FailedFragment, MergeSummary, merge_fragments};
pub use processor::{RunReport, check_tools, process_directory};
pub use run_log::{LogLevel, RunLog};
pub use scanner::{scan_fragments, show_scan_results};
