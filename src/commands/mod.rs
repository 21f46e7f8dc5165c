pub mod handle_add;
pub mod handle_list;
pub mod handle_lookup;
pub mod handle_remove;

use crate::cli::InputArgs;
use crate::constants::TIMESTAMP_FORMAT;
use crate::error::AppError;
use chrono::Local;
use std::fs;

/// 位置引数とファイル内容を改行でつなぎ、そのままパーサに渡せる形にする
pub fn collect_input_text(input: &InputArgs) -> Result<String, AppError> {
    let mut parts: Vec<String> = input.inputs.clone();
    if let Some(path) = &input.file {
        parts.push(fs::read_to_string(path)?);
    }
    let text = parts.join("\n");
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "no input given (pass IPs as arguments or use --file)".into(),
        ));
    }
    Ok(text)
}

pub(crate) fn now_str() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
