//! 토큰화 및 토큰 분류
//!
//! 메시지 본문을 공백과 고정 구두점 집합으로 분할하고,
//! 각 토큰을 템플릿 텍스트(stable) 또는 값 데이터(variable)로 분류합니다.

use serde::{Deserialize, Serialize};

/// 토큰 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// 템플릿 텍스트 -- 패턴 지문에 포함됨
    Stable,
    /// 값 데이터 (숫자, 식별자, 경로 등) -- 지문에서 제외됨
    Variable,
}

/// 분류된 토큰
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 토큰 텍스트
    pub text: String,
    /// 분류 결과
    pub kind: TokenKind,
}

impl Token {
    /// stable 토큰인지 확인합니다.
    pub fn is_stable(&self) -> bool {
        self.kind == TokenKind::Stable
    }
}

/// 토큰 구분에 사용하는 구두점 집합 (구분자 자체는 토큰에서 제외됨)
const DELIMITERS: &[char] = &[
    ',', ';', ':', '|', '(', ')', '[', ']', '{', '}', '=', '"',
];

/// 이 길이를 넘는 토큰은 값 데이터로 간주합니다
const MAX_STABLE_LEN: usize = 64;

/// 전부 대문자여도 템플릿 텍스트로 유지되는 키워드
///
/// 로그 레벨 태그, HTTP 메서드/프로토콜, 흔한 약어가 여기에 속합니다.
/// 목록 밖의 전대문자 토큰(`USJOT` 같은 코드 값)은 값 데이터로 분류됩니다.
const STABLE_KEYWORDS: &[&str] = &[
    "ERROR", "WARN", "WARNING", "INFO", "DEBUG", "TRACE", "FATAL", "CRITICAL", "PANIC",
    "EXCEPTION", "FAILED", "FAILURE", "TIMEOUT", "DENIED", "OK",
    "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS",
    "HTTP", "HTTPS", "TCP", "UDP", "TLS", "SSL", "DNS", "IP", "API", "URL", "URI",
    "ID", "UUID", "JSON", "XML", "YAML", "SQL", "CPU", "RAM", "IO",
    "NULL", "NONE", "TRUE", "FALSE", "NOT", "AND", "OR",
];

/// 본문을 토큰열로 분할하고 분류합니다.
///
/// 공백 단위로 나눈 뒤 각 구간을 구두점 집합으로 다시 분할합니다.
pub fn tokenize(content: &str) -> Vec<Token> {
    content
        .split_whitespace()
        .flat_map(|span| span.split(DELIMITERS))
        .filter(|text| !text.is_empty())
        .map(|text| Token {
            text: text.to_owned(),
            kind: classify(text),
        })
        .collect()
}

/// 단일 토큰을 분류합니다.
///
/// 숫자를 포함하는 형태(IPv4, ISO-8601 단편, 대부분의 UUID/hex)는
/// 숫자 검사 하나로 걸러집니다. 나머지 검사는 숫자 없이도 값 데이터일 수
/// 있는 형태를 잡습니다.
pub fn classify(text: &str) -> TokenKind {
    if text.len() > MAX_STABLE_LEN
        || text.chars().any(|c| c.is_ascii_digit())
        || is_code_word(text)
        || is_uuid(text)
        || is_hex_run(text)
        || is_absolute_path(text)
        || is_url(text)
        || is_email(text)
    {
        TokenKind::Variable
    } else {
        TokenKind::Stable
    }
}

/// 키워드 목록에 없는 전대문자 코드 토큰인지 확인합니다.
///
/// `USJOT`, `USCVG` 같은 지역/식별 코드가 여기에 해당합니다.
fn is_code_word(text: &str) -> bool {
    text.len() >= 2
        && text.chars().all(|c| c.is_ascii_uppercase())
        && !STABLE_KEYWORDS.contains(&text)
}

/// 8-4-4-4-12 hex 형태의 UUID인지 확인합니다.
fn is_uuid(text: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let mut parts = text.split('-');
    for expected_len in GROUPS {
        match parts.next() {
            Some(part)
                if part.len() == expected_len
                    && part.chars().all(|c| c.is_ascii_hexdigit()) => {}
            _ => return false,
        }
    }
    parts.next().is_none()
}

/// 8자 이상의 순수 hex 토큰인지 확인합니다.
fn is_hex_run(text: &str) -> bool {
    text.len() >= 8 && text.chars().all(|c| c.is_ascii_hexdigit())
}

/// 절대 파일 경로인지 확인합니다.
fn is_absolute_path(text: &str) -> bool {
    text.len() > 1
        && text.starts_with('/')
        && text[1..].chars().any(|c| c.is_ascii_alphanumeric())
}

/// URL 형태인지 확인합니다.
///
/// `:`가 구분자이므로 분할 후의 토큰은 보통 `//host/...` 꼴로 남습니다.
fn is_url(text: &str) -> bool {
    text.contains("://") || text.starts_with("//")
}

/// 이메일 주소 형태인지 확인합니다.
fn is_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
