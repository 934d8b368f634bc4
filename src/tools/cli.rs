//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use super::constants::{formats, naming};
use super::utils;
use crate::error::{MergeError, MergeResult};
use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 应用程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 片段所在目录（输出文件也写在这里）
    pub input_dir: PathBuf,

    /// FFmpeg可执行文件路径（未指定时从PATH解析）
    pub ffmpeg_path: Option<PathBuf>,

    /// 日志文件路径（未指定时在输入目录中自动生成）
    pub log_path: Option<PathBuf>,

    /// 是否写日志文件
    pub log_enabled: bool,

    /// 解码片段时假定的源格式
    pub source_format: String,

    /// 是否显示详细信息
    pub verbose: bool,
}

impl AppConfig {
    /// 使用默认选项创建配置
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ffmpeg_path: None,
            log_path: None,
            log_enabled: true,
            source_format: formats::DEFAULT_SOURCE_FORMAT.to_string(),
            verbose: false,
        }
    }

    /// 验证输入目录存在且确实是目录
    pub fn validate_input_dir(&self) -> MergeResult<()> {
        if !self.input_dir.is_dir() {
            return Err(MergeError::InvalidInput(format!(
                "目录不存在 / The directory {} does not exist.",
                self.input_dir.display()
            )));
        }
        Ok(())
    }

    /// 解析日志文件位置
    ///
    /// 显式路径优先；否则在输入目录中生成带时间戳和随机后缀的文件名。
    /// 禁用日志时返回 `None`。
    pub fn log_destination(&self) -> Option<PathBuf> {
        if !self.log_enabled {
            return None;
        }
        Some(self.log_path.clone().unwrap_or_else(|| {
            let name = utils::timestamped_file_name(
                naming::LOG_PREFIX,
                &chrono::Local::now(),
                &utils::random_suffix(),
                naming::LOG_EXTENSION,
            );
            self.input_dir.join(name)
        }))
    }
}

fn build_command() -> Command {
    Command::new("memofusion")
        .version(VERSION)
        .about(DESCRIPTION)
        .author("MemoFusion Team")
        .arg(
            Arg::new("DIRECTORY")
                .help("包含 .dat 语音备忘录片段的目录 / Path to the directory containing .dat voice memo files")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("ffmpeg")
                .long("ffmpeg")
                .help("FFmpeg可执行文件路径，未指定时需在PATH中 / Path to the ffmpeg executable (e.g. C:\\ffmpeg\\bin\\ffmpeg.exe); if omitted, ffmpeg must be in PATH")
                .value_name("PATH"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .help("日志文件路径，未指定时在输入目录中自动生成 / Log file path; defaults to an auto-named file in the input directory")
                .value_name("FILE")
                .conflicts_with("no-log"),
        )
        .arg(
            Arg::new("no-log")
                .long("no-log")
                .help("不写日志文件 / Do not write a log file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("片段的源音频格式 / Source format assumed when decoding fragments")
                .value_name("FMT")
                .default_value(formats::DEFAULT_SOURCE_FORMAT),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息 / Show detailed progress")
                .action(clap::ArgAction::SetTrue),
        )
}

fn config_from_matches(matches: &ArgMatches) -> AppConfig {
    let input_dir = matches
        .get_one::<String>("DIRECTORY")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    AppConfig {
        ffmpeg_path: matches.get_one::<String>("ffmpeg").map(PathBuf::from),
        log_path: matches.get_one::<String>("log").map(PathBuf::from),
        log_enabled: !matches.get_flag("no-log"),
        source_format: matches
            .get_one::<String>("format")
            .cloned()
            .unwrap_or_else(|| formats::DEFAULT_SOURCE_FORMAT.to_string()),
        verbose: matches.get_flag("verbose"),
        ..AppConfig::new(input_dir)
    }
}

/// 解析命令行参数并创建配置
pub fn parse_args() -> AppConfig {
    config_from_matches(&build_command().get_matches())
}

/// 从给定参数列表解析配置（第一个元素为程序名）
pub fn parse_args_from<I, T>(args: I) -> Result<AppConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    build_command()
        .try_get_matches_from(args)
        .map(|matches| config_from_matches(&matches))
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    println!("🚀 MemoFusion v{VERSION} 启动");
    println!("📝 {DESCRIPTION}");
    if config.verbose {
        println!("📁 输入目录 / Input directory: {}", config.input_dir.display());
        println!("🎧 源格式 / Source format: {}", config.source_format);
    }
    println!();
}

/// 显示程序完成信息
pub fn show_completion_info(config: &AppConfig) {
    if config.verbose {
        println!("✅ 所有任务处理完成！/ All done!");
    }
}
