use crate::common::WriteMode;
use crate::error::AppError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// 汎用ヘッダー生成
pub fn make_header(now_str: &str, title: &str, summary: &str) -> String {
    format!(
        "# Generated at: {}\n# Report: {}\n# {}\n\n",
        now_str, title, summary
    )
}

/// レポート本文をファイルへ書き出す。append なら末尾に追記する。
pub fn write_report<P: AsRef<Path>>(
    path: P,
    content: &str,
    mode: WriteMode,
) -> Result<(), AppError> {
    match mode {
        WriteMode::Append => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            file.write_all(content.as_bytes())?;
        }
        WriteMode::Overwrite => {
            // まるごと書き込む場合
            fs::write(path, content)?;
        }
    }
    Ok(())
}

/// 出力先が指定されていればファイルへ、なければ標準出力へ
pub fn emit<P: AsRef<Path>>(
    path: Option<P>,
    content: &str,
    mode: WriteMode,
) -> Result<(), AppError> {
    match path {
        Some(p) => {
            write_report(&p, content, mode)?;
            println!("[output] Wrote report to: {}", p.as_ref().display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
