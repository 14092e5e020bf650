//! 도메인 타입 -- 시스템 전역에서 사용되는 공통 타입
//!
//! 로그 집계 파이프라인의 모든 크레이트가 공유하는 데이터 구조를 정의합니다.
//! 입력(`LogEntry`), 멀티라인 수집 결과(`Message`), 스냅샷 출력
//! (`LogCounter`, `SensitiveLogCounter`)이 여기에 속합니다.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// 로그 레벨
///
/// `Ord` 구현은 표시 우선순위를 따릅니다
/// (`Critical < Error < Warning < Info < Debug < Unknown`).
/// 오름차순 정렬 시 심각한 레벨이 먼저 옵니다.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Level {
    /// 치명적 이벤트
    Critical,
    /// 에러
    Error,
    /// 경고
    Warning,
    /// 정보성 이벤트
    Info,
    /// 디버그
    Debug,
    /// 레벨을 판별할 수 없음 (기본값)
    #[default]
    Unknown,
}

impl Level {
    /// 저신호 레벨인지 확인합니다.
    ///
    /// 저신호 레벨(`Unknown`, `Debug`, `Info`)의 메시지는 패턴으로
    /// 토큰화되지 않고 레벨당 단일 버킷으로 집계됩니다.
    pub fn is_low_signal(&self) -> bool {
        matches!(self, Self::Unknown | Self::Debug | Self::Info)
    }

    /// 문자열에서 레벨을 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다. 알 수 없는 태그는 `None`을 반환합니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" | "crit" | "fatal" => Some(Self::Critical),
            "error" | "err" => Some(Self::Error),
            "warning" | "warn" | "wrn" => Some(Self::Warning),
            "info" | "informational" | "inf" => Some(Self::Info),
            "debug" | "dbg" | "trace" | "trc" => Some(Self::Debug),
            _ => None,
        }
    }

    /// 로그 라인의 선두 태그에서 레벨을 추정합니다.
    ///
    /// `ERROR: ...`, `[warn] ...`, `Info | ...` 형태의 선두 태그를
    /// 인식합니다. 태그가 없거나 알 수 없는 태그면 `Unknown`을 반환합니다.
    pub fn detect(line: &str) -> Self {
        let trimmed = line.trim_start();
        let bare = trimmed.strip_prefix('[').unwrap_or(trimmed);

        let tag: String = bare
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if tag.is_empty() {
            return Self::Unknown;
        }

        // 태그 뒤에 구분자가 없으면 일반 단어로 간주합니다
        let rest = &bare[tag.len()..];
        if !rest.is_empty() && !rest.starts_with([':', ' ', ']', '|', '=']) {
            return Self::Unknown;
        }

        Self::from_str_loose(&tag).unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::Error => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
            Self::Info => write!(f, "Info"),
            Self::Debug => write!(f, "Debug"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// 로그 엔트리
///
/// 집계 파이프라인으로 유입되는 원시 로그 한 줄을 나타냅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// 수집 시각
    pub timestamp: SystemTime,
    /// 로그 본문
    pub content: String,
    /// 로그 레벨
    pub level: Level,
}

impl LogEntry {
    /// 현재 시각으로 새 엔트리를 생성합니다.
    pub fn new(content: impl Into<String>, level: Level) -> Self {
        Self {
            timestamp: SystemTime::now(),
            content: content.into(),
            level,
        }
    }

    /// 타임스탬프를 지정합니다.
    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.content)
    }
}

/// 논리 메시지
///
/// 멀티라인 수집기가 헤더와 연속 라인을 합쳐 만든 하나의 논리적 메시지입니다.
/// `content`에는 줄바꿈이 포함될 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// 헤더 라인의 수집 시각
    pub timestamp: SystemTime,
    /// 헤더와 연속 라인을 `\n`으로 이은 본문
    pub content: String,
    /// 헤더 라인의 레벨
    pub level: Level,
}

impl Message {
    /// 단일 라인 엔트리를 메시지로 변환합니다.
    pub fn from_entry(entry: LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            content: entry.content,
            level: entry.level,
        }
    }
}

/// 패턴 카운터 스냅샷
///
/// `get_counters()`가 반환하는 한 행입니다. `hash`가 빈 문자열이면
/// 저신호 버킷, `__unclassified__`면 카디널리티 초과 버킷입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogCounter {
    /// 로그 레벨
    pub level: Level,
    /// 패턴 해시 (예약 값: `""`, `__unclassified__`)
    pub hash: String,
    /// 버킷에 처음 배정된 원본 본문
    pub sample: String,
    /// 누적 메시지 수
    pub messages: u64,
}

impl fmt::Display for LogCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first_line = self.sample.lines().next().unwrap_or("");
        write!(f, "[{}] {} {}", self.level, self.messages, first_line)
    }
}

/// 민감 데이터 카운터 스냅샷
///
/// `get_sensitive_counters()`가 반환하는 한 행입니다.
/// 동일한 민감 문자열이라도 서로 다른 로그 패턴에서 발견되면
/// `hash`가 달라 별도 행으로 집계됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveLogCounter {
    /// 매칭된 민감 문자열 (정규식이 실제로 잡아낸 부분)
    pub pattern: String,
    /// 누적 발견 횟수
    pub messages: u64,
    /// 처음 발견된 메시지의 원본 본문
    pub sample: String,
    /// 매칭에 사용된 정규식 원본
    pub regex: String,
    /// 카탈로그 항목 이름
    pub name: String,
    /// 발견 지점을 둘러싼 로그 패턴의 해시
    pub hash: String,
}
