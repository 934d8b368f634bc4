//! 片段扫描模块
//!
//! 列出目录中的 `.dat` 片段文件并确定拼接顺序。

use super::cli::AppConfig;
use super::constants::naming::FRAGMENT_SUFFIX;
use super::utils;
use crate::error::{MergeError, MergeResult};
use std::path::{Path, PathBuf};

/// 扫描目录中的片段文件（不递归子目录）
///
/// 按文件名排序：先比较小写形式，相同时再按原始字符串比较。
/// 这一顺序就是最终的拼接顺序。
pub fn scan_fragments(dir_path: &Path) -> MergeResult<Vec<PathBuf>> {
    if !dir_path.is_dir() {
        return Err(MergeError::InvalidInput(format!(
            "路径不是目录 / Not a directory: {}",
            dir_path.display()
        )));
    }

    let mut fragments = Vec::new();
    for entry in std::fs::read_dir(dir_path)? {
        let path = entry?.path();

        // 只处理文件，跳过目录
        if !path.is_file() {
            continue;
        }

        if utils::name_ends_with_ignore_case(&path, FRAGMENT_SUFFIX) {
            fragments.push(path);
        }
    }

    if fragments.is_empty() {
        return Err(MergeError::NoFragmentsFound(dir_path.to_path_buf()));
    }

    sort_fragments(&mut fragments);
    Ok(fragments)
}

/// 按拼接顺序排序片段
pub fn sort_fragments(fragments: &mut [PathBuf]) {
    fragments.sort_by_cached_key(|path| {
        let name = utils::extract_filename_lossy(path);
        (name.to_lowercase(), name)
    });
}

/// 显示文件扫描结果
pub fn show_scan_results(config: &AppConfig, fragments: &[PathBuf]) {
    println!("📁 扫描目录 / Scanned directory: {}", config.input_dir.display());
    println!(
        "🎵 找到 {} 个片段 / Found {} fragment file(s)",
        fragments.len(),
        fragments.len()
    );

    if config.verbose {
        for (i, file) in fragments.iter().enumerate() {
            println!("   {}. {}", i + 1, utils::extract_filename_lossy(file));
        }
    }
    println!();
}
