//! 合并流程集成测试
//!
//! 使用WAV测试编解码器驱动完整的扫描 → 解码累加 → 导出流程。


use fragment_fixtures::{
    FIXTURE_RATE, ReadOnlyDiskCodec, WavCodec, merged_outputs, read_output, write_corrupt_fragment,
    write_fragment, write_fragment_with_channels,
};
use memofusion::audio::AudioCodec;
use memofusion::error::MergeError;
use memofusion::tools::{self, AppConfig, RunLog};
use std::path::Path;

fn config_for(dir: &Path) -> AppConfig {
    AppConfig::new(dir)
}

fn log_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

// ========== 测试固件 ==========

#[test]
fn test_fixture_decodes_to_written_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fragment(dir.path(), "one.dat", 42, 1.0);

    let buffer = WavCodec.decode(&path, "m4a").unwrap();
    assert_eq!(buffer.frames(), FIXTURE_RATE as u64);
    assert!(buffer.samples().iter().all(|&s| s == 42));
}

#[test]
fn test_corrupt_fixture_fails_to_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corrupt_fragment(dir.path(), "broken.dat");
    assert!(matches!(
        WavCodec.decode(&path, "m4a"),
        Err(MergeError::DecodingError(_))
    ));
}

// ========== 端到端 ==========

/// b.dat 与 a.dat 各1秒，输出2秒且 a 在前
#[test]
fn test_two_fragments_merge_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(dir.path(), "b.dat", 2_000, 1.0);
    write_fragment(dir.path(), "a.dat", 1_000, 1.0);

    let report =
        tools::process_directory(&config_for(dir.path()), &WavCodec, &RunLog::console_only())
            .unwrap();

    assert_eq!(report.summary.merged, ["a.dat", "b.dat"]);
    assert!(report.summary.failed.is_empty());

    let (spec, samples) = read_output(&report.output);
    let frames = FIXTURE_RATE as usize;
    assert_eq!(spec.sample_rate, FIXTURE_RATE);
    assert_eq!(samples.len(), 2 * frames);
    assert!(samples[..frames].iter().all(|&s| s == 1_000));
    assert!(samples[frames..].iter().all(|&s| s == 2_000));
    println!("  ✓ 输出时长2秒，a 在 b 之前");
}

/// 拼接顺序按文件名大小写不敏感排序
#[test]
fn test_order_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(dir.path(), "B.dat", 2, 0.5);
    write_fragment(dir.path(), "a.DAT", 1, 0.5);
    write_fragment(dir.path(), "c.dat", 3, 0.5);

    let report =
        tools::process_directory(&config_for(dir.path()), &WavCodec, &RunLog::console_only())
            .unwrap();

    assert_eq!(report.summary.merged, ["a.DAT", "B.dat", "c.dat"]);

    let (_, samples) = read_output(&report.output);
    let half = FIXTURE_RATE as usize / 2;
    assert_eq!(samples[0], 1);
    assert_eq!(samples[half], 2);
    assert_eq!(samples[2 * half], 3);
}

/// 输出文件写在输入目录中，名称符合固定格式
#[test]
fn test_output_name_layout() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(dir.path(), "a.dat", 1, 0.1);

    let report =
        tools::process_directory(&config_for(dir.path()), &WavCodec, &RunLog::console_only())
            .unwrap();

    assert_eq!(report.output.parent(), Some(dir.path()));
    let name = report.output.file_name().unwrap().to_str().unwrap();
    // merged_audio_YYYYMMDD_HHMMSS_xxxxxx.mp3
    assert!(name.starts_with("merged_audio_"));
    assert!(name.ends_with(".mp3"));
    assert_eq!(name.len(), "merged_audio_".len() + 15 + 1 + 6 + ".mp3".len());
}

// ========== 可恢复错误 ==========

/// 损坏片段被跳过，且只记录一条引用该文件名的ERROR
#[test]
fn test_corrupt_fragment_skipped_with_single_error_record() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(dir.path(), "1.dat", 10, 1.0);
    write_corrupt_fragment(dir.path(), "2.dat");
    write_fragment(dir.path(), "3.dat", 30, 1.0);

    let log_path = dir.path().join("run.log");
    let log = RunLog::new(Some(log_path.clone()));

    let report = tools::process_directory(&config_for(dir.path()), &WavCodec, &log).unwrap();

    assert_eq!(report.summary.merged, ["1.dat", "3.dat"]);
    assert_eq!(report.summary.failed.len(), 1);
    assert_eq!(report.summary.failed[0].name, "2.dat");

    let (_, samples) = read_output(&report.output);
    assert_eq!(samples.len(), 2 * FIXTURE_RATE as usize);
    assert!(samples.iter().all(|&s| s == 10 || s == 30));

    let errors: Vec<String> = log_lines(&log_path)
        .into_iter()
        .filter(|line| line.contains(" - ERROR - "))
        .collect();
    assert_eq!(errors.len(), 1, "应该只有一条ERROR记录: {errors:?}");
    assert!(errors[0].contains("2.dat"));
}

/// 声道数与累加器不一致的片段视为解码失败
#[test]
fn test_mismatched_layout_fragment_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(dir.path(), "a.dat", 5, 0.5);
    write_fragment_with_channels(dir.path(), "b.dat", 6, 0.5, 2);

    let report =
        tools::process_directory(&config_for(dir.path()), &WavCodec, &RunLog::console_only())
            .unwrap();

    assert_eq!(report.summary.merged, ["a.dat"]);
    assert_eq!(report.summary.failed[0].name, "b.dat");
    let (_, samples) = read_output(&report.output);
    assert_eq!(samples.len(), FIXTURE_RATE as usize / 2);
}

/// 全部片段失败时仍导出空音频，并记录警告
#[test]
fn test_all_failed_still_exports_empty_audio() {
    let dir = tempfile::tempdir().unwrap();
    write_corrupt_fragment(dir.path(), "a.dat");
    write_corrupt_fragment(dir.path(), "b.dat");

    let log_path = dir.path().join("run.log");
    let log = RunLog::new(Some(log_path.clone()));
    let report = tools::process_directory(&config_for(dir.path()), &WavCodec, &log).unwrap();

    assert!(report.summary.all_failed());
    let (_, samples) = read_output(&report.output);
    assert!(samples.is_empty());

    let lines = log_lines(&log_path);
    assert_eq!(lines.iter().filter(|l| l.contains(" - ERROR - ")).count(), 2);
    assert!(lines.iter().any(|l| l.contains(" - WARNING - ")));
}

// ========== 致命错误 ==========

/// 只有非 .dat 文件时失败，且不产生输出文件
#[test]
fn test_directory_without_fragments_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
    std::fs::write(dir.path().join("voice.m4a"), b"not a dat").unwrap();

    let result =
        tools::process_directory(&config_for(dir.path()), &WavCodec, &RunLog::console_only());

    assert!(matches!(result, Err(MergeError::NoFragmentsFound(_))));
    assert!(merged_outputs(dir.path()).is_empty());
}

/// 导出失败返回 ExportFailed
#[test]
fn test_export_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(dir.path(), "a.dat", 1, 0.1);

    let result = tools::process_directory(
        &config_for(dir.path()),
        &ReadOnlyDiskCodec,
        &RunLog::console_only(),
    );

    match result {
        Err(MergeError::ExportFailed(msg)) => assert!(msg.contains("No space left")),
        other => panic!("期望 ExportFailed，实际: {other:?}"),
    }
    assert!(merged_outputs(dir.path()).is_empty());
}

// ========== 唯一性 ==========

/// 同一目录连续两次运行产生不同的输出文件
#[test]
fn test_repeated_runs_never_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(dir.path(), "a.dat", 1, 0.1);

    let config = config_for(dir.path());
    let first = tools::process_directory(&config, &WavCodec, &RunLog::console_only()).unwrap();
    let second = tools::process_directory(&config, &WavCodec, &RunLog::console_only()).unwrap();

    assert_ne!(first.output, second.output);
    assert_eq!(merged_outputs(dir.path()).len(), 2);
}

/// 输出时长探测结果写入日志
#[test]
fn test_output_duration_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    write_fragment(dir.path(), "a.dat", 1, 1.0);
    write_fragment(dir.path(), "b.dat", 1, 0.5);

    let log_path = dir.path().join("run.log");
    tools::process_directory(
        &config_for(dir.path()),
        &WavCodec,
        &RunLog::new(Some(log_path.clone())),
    )
    .unwrap();

    let lines = log_lines(&log_path);
    assert!(lines.iter().any(|l| l.contains("Output duration: 1.50 s")));
    assert!(lines.iter().any(|l| l.contains("Merged audio exported to")));
}
