//! 工具函数模块
//!
//! 提供文件路径处理、带时间戳和随机后缀的文件命名等通用工具函数。

/// 文件路径处理工具函数
pub mod path {
    use std::path::Path;

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 判断文件名是否以指定后缀结尾（大小写不敏感）
    ///
    /// 按文件名整体匹配而非 `Path::extension`，因此 `.dat` 这样的隐藏文件名也会匹配。
    #[inline]
    pub fn name_ends_with_ignore_case(path: &Path, suffix: &str) -> bool {
        path.file_name()
            .map(|name| {
                name.to_string_lossy()
                    .to_lowercase()
                    .ends_with(&suffix.to_lowercase())
            })
            .unwrap_or(false)
    }
}

/// 文件命名工具函数
pub mod naming {
    use crate::tools::constants::naming::{RANDOM_SUFFIX_LEN, TIMESTAMP_FORMAT};
    use chrono::{DateTime, TimeZone};

    /// 生成随机十六进制后缀（取随机UUID的前6位）
    pub fn random_suffix() -> String {
        let mut hex = uuid::Uuid::new_v4().simple().to_string();
        hex.truncate(RANDOM_SUFFIX_LEN);
        hex
    }

    /// 生成 `<prefix>_<YYYYMMDD_HHMMSS>_<suffix>.<ext>` 格式的文件名
    pub fn timestamped_file_name<Tz: TimeZone>(
        prefix: &str,
        time: &DateTime<Tz>,
        suffix: &str,
        extension: &str,
    ) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!(
            "{prefix}_{}_{suffix}.{extension}",
            time.format(TIMESTAMP_FORMAT)
        )
    }
}

// 重新导出为平级函数
pub use naming::{random_suffix, timestamped_file_name};
pub use path::{extract_filename_lossy, name_ends_with_ignore_case};
