use crate::error::AppError;
use crate::ipv4_codec::{encode, encode_addr};
use crate::ipv4_utils::IpInterval;
use serde::Serialize;
use std::fmt;

/// 入力チャンクの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Single,
    Range,
    Cidr,
    Invalid,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Single => "single",
            TokenKind::Range => "range",
            TokenKind::Cidr => "cidr",
            TokenKind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析結果の本体。種別ごとに持つデータが異なる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    Single(IpInterval),
    Range(IpInterval),
    Cidr { interval: IpInterval, prefix: u8 },
    Invalid { error: String },
}

/// ユーザー入力の1チャンクと、その解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    pub original_text: String,
    pub parsed: ParsedInput,
}

impl ParsedToken {
    pub fn kind(&self) -> TokenKind {
        match self.parsed {
            ParsedInput::Single(_) => TokenKind::Single,
            ParsedInput::Range(_) => TokenKind::Range,
            ParsedInput::Cidr { .. } => TokenKind::Cidr,
            ParsedInput::Invalid { .. } => TokenKind::Invalid,
        }
    }

    pub fn interval(&self) -> Option<IpInterval> {
        match &self.parsed {
            ParsedInput::Single(iv) | ParsedInput::Range(iv) => Some(*iv),
            ParsedInput::Cidr { interval, .. } => Some(*interval),
            ParsedInput::Invalid { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.parsed {
            ParsedInput::Invalid { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.parsed, ParsedInput::Invalid { .. })
    }
}

/// 空白・カンマ・改行区切りの自由入力をトークン列に分解する。
/// 失敗はすべて Invalid トークンになり、この関数自体はエラーを返さない。
pub fn parse_input(raw_text: &str) -> Vec<ParsedToken> {
    split_chunks(raw_text).map(parse_token).collect()
}

fn split_chunks(raw_text: &str) -> impl Iterator<Item = &str> {
    raw_text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|chunk| !chunk.is_empty())
}

/// 1チャンクを分類する。判定順は CIDR → 範囲 → 単一IP。
pub fn parse_token(chunk: &str) -> ParsedToken {
    let parsed = if chunk.contains('/') {
        parse_cidr(chunk)
    } else if chunk.contains('-') {
        parse_range(chunk)
    } else {
        encode(chunk).map(|ip| ParsedInput::Single(IpInterval::single(ip)))
    };

    ParsedToken {
        original_text: chunk.to_string(),
        parsed: parsed.unwrap_or_else(|e| ParsedInput::Invalid {
            error: e.to_string(),
        }),
    }
}

fn parse_cidr(chunk: &str) -> Result<ParsedInput, AppError> {
    let (base, prefix) = chunk
        .split_once('/')
        .ok_or_else(|| AppError::InvalidCidr(chunk.to_string()))?;

    // 先に prefix を検証する（"/abc" や "/33" はここで落ちる）
    let prefix = parse_prefix_len(prefix)
        .ok_or_else(|| AppError::InvalidCidr(format!("invalid prefix 0-32: {}", prefix)))?;
    let base = encode_addr(base)
        .map_err(|_| AppError::InvalidCidr(format!("invalid base address: {}", base)))?;

    let interval = IpInterval::from_cidr(base, prefix)?;
    Ok(ParsedInput::Cidr { interval, prefix })
}

fn parse_range(chunk: &str) -> Result<ParsedInput, AppError> {
    let (start, end) = chunk
        .split_once('-')
        .ok_or_else(|| AppError::InvalidFormat(chunk.to_string()))?;
    let start = encode(start)?;
    let end = encode(end)?;
    Ok(ParsedInput::Range(IpInterval::new(start, end)?))
}

// 符号・先頭ゼロは受け付けない（オクテット側の規則に合わせる）
fn parse_prefix_len(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse::<u8>().ok().filter(|p| *p <= 32)
}
