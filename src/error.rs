//! 统一错误处理框架
//!
//! 区分两类失败：致命错误（终止整个运行）与可恢复错误（单个片段解码失败，跳过继续）。

use std::fmt;
use std::io;
use std::path::PathBuf;

/// 合并流程相关的统一错误类型
#[derive(Debug)]
pub enum MergeError {
    /// 输入验证错误（目录不存在、不是目录等）
    InvalidInput(String),

    /// 文件I/O错误
    IoError(io::Error),

    /// 显式指定的FFmpeg路径不存在或不可执行
    ToolNotFound(PathBuf),

    /// FFmpeg无法调用（版本探测失败）
    ToolUnavailable(String),

    /// 目录中没有 .dat 片段
    NoFragmentsFound(PathBuf),

    /// 单个片段解码失败（可恢复）
    DecodingError(String),

    /// 合并结果编码/写出失败
    ExportFailed(String),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::InvalidInput(msg) => write!(f, "输入验证失败 / Invalid input: {msg}"),
            MergeError::IoError(err) => write!(f, "文件I/O错误 / I/O error: {err}"),
            MergeError::ToolNotFound(path) => write!(
                f,
                "找不到FFmpeg可执行文件 / ffmpeg executable not found: {}",
                path.display()
            ),
            MergeError::ToolUnavailable(msg) => {
                write!(f, "FFmpeg不可用 / ffmpeg is not available: {msg}")
            }
            MergeError::NoFragmentsFound(dir) => write!(
                f,
                "目录中没有 .dat 文件 / No .dat files found in the specified directory: {}",
                dir.display()
            ),
            MergeError::DecodingError(msg) => write!(f, "音频解码失败 / Decoding failed: {msg}"),
            MergeError::ExportFailed(msg) => {
                write!(f, "导出合并音频失败 / Failed to export merged audio: {msg}")
            }
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MergeError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MergeError {
    fn from(err: io::Error) -> Self {
        MergeError::IoError(err)
    }
}

/// 合并操作的标准Result类型
pub type MergeResult<T> = Result<T, MergeError>;

// ==================== 错误转换Helper函数 ====================

/// 创建解码错误的helper函数
#[inline]
pub fn decoding_error<E: fmt::Display>(context: &str, err: E) -> MergeError {
    MergeError::DecodingError(format!("{context}: {err}"))
}

/// 创建导出错误的helper函数
#[inline]
pub fn export_error<E: fmt::Display>(context: &str, err: E) -> MergeError {
    MergeError::ExportFailed(format!("{context}: {err}"))
}

// ==================== 错误分类系统 ====================

/// 错误类别枚举（决定退出码和建议文本）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ErrorCategory {
    /// 输入目录无效
    Input,
    /// FFmpeg缺失或不可调用
    Tool,
    /// 没有可合并的片段
    NoFragments,
    /// 解码相关错误
    Decoding,
    /// 导出相关错误
    Export,
    /// I/O及其他错误
    Other,
}

impl ErrorCategory {
    /// 从MergeError提取错误类别
    pub fn from_merge_error(e: &MergeError) -> Self {
        match e {
            MergeError::InvalidInput(_) => Self::Input,
            MergeError::ToolNotFound(_) | MergeError::ToolUnavailable(_) => Self::Tool,
            MergeError::NoFragmentsFound(_) => Self::NoFragments,
            MergeError::DecodingError(_) => Self::Decoding,
            MergeError::ExportFailed(_) => Self::Export,
            MergeError::IoError(_) => Self::Other,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Input => "输入错误",
            Self::Tool => "工具错误",
            Self::NoFragments => "无片段",
            Self::Decoding => "解码错误",
            Self::Export => "导出错误",
            Self::Other => "其他错误",
        }
    }
}
