//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 片段与输出文件命名
pub mod naming {
    /// 片段文件名后缀（大小写不敏感匹配）
    pub const FRAGMENT_SUFFIX: &str = ".dat";

    /// 输出文件名前缀
    pub const OUTPUT_PREFIX: &str = "merged_audio";

    /// 自动生成的日志文件名前缀
    pub const LOG_PREFIX: &str = "merge_log";

    /// 自动生成的日志文件扩展名
    pub const LOG_EXTENSION: &str = "log";

    /// 文件名中的时间戳格式（秒级精度）
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// 随机后缀长度（十六进制字符）
    pub const RANDOM_SUFFIX_LEN: usize = 6;

    /// 输出文件名冲突时重新生成后缀的最大次数
    pub const MAX_NAME_ATTEMPTS: usize = 16;
}

/// 音频格式
pub mod formats {
    /// 默认假定的片段源格式
    pub const DEFAULT_SOURCE_FORMAT: &str = "m4a";

    /// 固定的输出格式（同时作为输出扩展名）
    pub const OUTPUT_FORMAT: &str = "mp3";
}

/// 日志
pub mod logging {
    /// 日志行时间戳格式（毫秒精度）
    pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";
}
