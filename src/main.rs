//! MemoFusion - 主程序入口
//!
//! 纯流程控制器，负责协调各个工具模块完成片段合并任务。

use memofusion::{
    audio::{FFMPEG_INSTALL_GUIDE, FfmpegCodec},
    error::{ErrorCategory, MergeError},
    tools::{self, AppConfig, LogLevel, RunLog},
};
use std::process;

/// 错误退出码定义
mod exit_codes {
    /// 通用错误
    pub const GENERAL_ERROR: i32 = 1;
    /// 输入目录错误
    pub const INPUT_ERROR: i32 = 2;
    /// FFmpeg缺失或不可用
    pub const TOOL_ERROR: i32 = 3;
    /// 没有找到片段
    pub const NO_FRAGMENTS: i32 = 4;
    /// 导出失败
    pub const EXPORT_ERROR: i32 = 5;
}

/// 获取错误建议文本
fn get_error_suggestion(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Input => {
            "检查目录路径是否正确，使用 --help 查看完整用法 / Check the directory path, use --help to see full usage"
        }
        ErrorCategory::Tool => {
            "安装FFmpeg并加入PATH，或通过 --ffmpeg 指定可执行文件 / Install ffmpeg and add it to PATH, or pass its path with --ffmpeg"
        }
        ErrorCategory::NoFragments => {
            "确认目录中包含导出的 .dat 语音片段 / Make sure the directory contains exported .dat voice memo files"
        }
        ErrorCategory::Decoding | ErrorCategory::Export => {
            "检查输出目录是否可写，FFmpeg是否支持MP3编码 / Check that the directory is writable and ffmpeg supports MP3 encoding"
        }
        ErrorCategory::Other => "请检查输入目录和参数设置 / Please check the input directory and options",
    }
}

/// 致命错误处理：提示、记录日志并退出
fn handle_error(error: MergeError, log: &RunLog) -> ! {
    let category = ErrorCategory::from_merge_error(&error);
    println!("[ERROR] 错误 / Error: {error}");
    println!("[INFO] 类别 / Category: {}", category.display_name());
    println!("[INFO] 建议 / Suggestion: {}", get_error_suggestion(category));

    if matches!(category, ErrorCategory::Tool) {
        println!("{FFMPEG_INSTALL_GUIDE}");
    }

    // 日志写入失败不影响退出
    if let Err(e) = log.record(LogLevel::Error, &error.to_string()) {
        eprintln!("[WARNING] 日志写入失败 / Failed to write log record: {e}");
    }

    let exit_code = match category {
        ErrorCategory::Input => exit_codes::INPUT_ERROR,
        ErrorCategory::Tool => exit_codes::TOOL_ERROR,
        ErrorCategory::NoFragments => exit_codes::NO_FRAGMENTS,
        ErrorCategory::Export => exit_codes::EXPORT_ERROR,
        ErrorCategory::Decoding | ErrorCategory::Other => exit_codes::GENERAL_ERROR,
    };

    process::exit(exit_code);
}

/// 应用程序主逻辑（目录已验证、日志已就绪）
fn run(config: &AppConfig, log: &RunLog) -> Result<(), MergeError> {
    // 1. 工具检查
    let tool_paths = tools::check_tools(config, log)?;

    // 2. 扫描、解码累加、导出
    let codec = FfmpegCodec::new(tool_paths);
    let report = tools::process_directory(config, &codec, log)?;

    log.info(format!(
        "结束 / Ended: {} of {} fragment(s) merged into {}",
        report.summary.merged.len(),
        report.summary.total,
        report.output.display()
    ));
    Ok(())
}

fn main() {
    // 1. 解析命令行参数
    let config = tools::parse_args();

    // 2. 显示启动信息
    tools::show_startup_info(&config);

    // 3. 目录验证（此时日志文件尚不存在，只输出到控制台）
    if let Err(error) = config.validate_input_dir() {
        handle_error(error, &RunLog::console_only());
    }

    let log = RunLog::new(config.log_destination());
    if let Some(path) = log.path() {
        println!("📝 日志文件 / Log file: {}", path.display());
    }
    log.info(format!(
        "开始 / Started: merging fragments in {}",
        config.input_dir.display()
    ));

    // 4. 执行主逻辑，统一处理错误
    if let Err(error) = run(&config, &log) {
        handle_error(error, &log);
    }

    tools::show_completion_info(&config);
}
