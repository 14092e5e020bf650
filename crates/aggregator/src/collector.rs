//! 멀티라인 수집기 -- 연속 라인을 하나의 논리 메시지로 조립합니다.
//!
//! 스택 트레이스처럼 여러 라인에 걸친 로그를 타임아웃 기반 상태 머신으로
//! 병합합니다. 헤더 라인이 도착하면 누적 중이던 메시지를 방출하고 새로
//! 누적을 시작하며, 타임아웃이 지나면 누적분을 방출하고 대기 상태로
//! 돌아갑니다.
//!
//! # 상태 머신
//! ```text
//! Idle --header--> Accumulating --header--> (emit) Accumulating
//!                       |    \--timeout--> (emit) Idle
//!                       \--continuation--> parts에 추가, deadline 연장
//! ```
//!
//! 입력 채널이 닫히면 누적 중인 메시지를 플러시하고 종료합니다.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use logsift_core::{Level, LogEntry, Message};

/// 누적 중인 멀티라인 메시지
struct Accumulator {
    header: LogEntry,
    parts: Vec<String>,
    deadline: Instant,
}

impl Accumulator {
    fn new(header: LogEntry, deadline: Instant) -> Self {
        Self {
            header,
            parts: Vec::new(),
            deadline,
        }
    }

    /// 헤더와 연속 라인을 `\n`으로 이어 메시지로 변환합니다.
    fn into_message(self) -> Message {
        let content = if self.parts.is_empty() {
            self.header.content
        } else {
            let mut content = self.header.content;
            for part in &self.parts {
                content.push('\n');
                content.push_str(part);
            }
            content
        };
        Message {
            timestamp: self.header.timestamp,
            content,
            level: self.header.level,
        }
    }
}

/// 멀티라인 수집기
///
/// 자체 tokio 태스크에서 실행되며, 입력 채널의 `LogEntry`를 논리
/// `Message`로 병합하여 출력 채널로 전달합니다.
pub struct MultilineCollector {
    entry_rx: mpsc::Receiver<LogEntry>,
    message_tx: mpsc::Sender<Message>,
    timeout: Duration,
    limit: usize,
    truncated_lines: Arc<AtomicU64>,
}

impl MultilineCollector {
    /// 새 수집기를 생성합니다.
    ///
    /// # Arguments
    /// - `entry_rx`: 디코딩된 엔트리 수신 채널
    /// - `message_tx`: 조립된 메시지 전송 채널
    /// - `timeout`: 연속 라인 대기 타임아웃
    /// - `limit`: 메시지당 최대 연속 라인 수 (초과분은 드롭 후 카운트)
    /// - `truncated_lines`: 드롭된 연속 라인 공유 카운터
    pub fn new(
        entry_rx: mpsc::Receiver<LogEntry>,
        message_tx: mpsc::Sender<Message>,
        timeout: Duration,
        limit: usize,
        truncated_lines: Arc<AtomicU64>,
    ) -> Self {
        Self {
            entry_rx,
            message_tx,
            timeout,
            limit,
            truncated_lines,
        }
    }

    /// 라인이 새 레코드의 시작(헤더)인지 판별합니다.
    ///
    /// 레벨이 판별된 라인은 항상 헤더입니다. 레벨 미상인 라인은
    /// 들여쓰기나 스택 프레임 마커(`at `, `Caused by`) 없이
    /// 알파벳으로 시작할 때만 헤더로 간주합니다.
    fn is_header(entry: &LogEntry) -> bool {
        if entry.level != Level::Unknown {
            return true;
        }
        let content = &entry.content;
        if content.starts_with([' ', '\t']) {
            return false;
        }
        if content.starts_with("at ") || content.starts_with("Caused by") {
            return false;
        }
        content.chars().next().is_some_and(|c| c.is_alphabetic())
    }

    /// 수집 루프를 실행합니다.
    ///
    /// 입력 채널이 닫히면 누적 중인 메시지를 플러시하고 반환합니다.
    /// 출력 채널(`message_tx`)은 반환 시 함께 드롭되어 다운스트림에
    /// 종료가 전파됩니다.
    pub async fn run(mut self) {
        let mut pending: Option<Accumulator> = None;

        loop {
            let received = match pending.as_ref().map(|acc| acc.deadline) {
                Some(deadline) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => {
                            if let Some(acc) = pending.take() {
                                self.emit(acc.into_message()).await;
                            }
                            continue;
                        }
                        received = self.entry_rx.recv() => received,
                    }
                }
                None => self.entry_rx.recv().await,
            };

            let Some(entry) = received else { break };
            self.accept(entry, &mut pending).await;
        }

        // 종료 시 누적분 플러시
        if let Some(acc) = pending.take() {
            self.emit(acc.into_message()).await;
        }
        tracing::debug!("multiline collector stopped");
    }

    async fn accept(&mut self, entry: LogEntry, pending: &mut Option<Accumulator>) {
        if Self::is_header(&entry) {
            if let Some(acc) = pending.take() {
                self.emit(acc.into_message()).await;
            }
            let deadline = Instant::now() + self.timeout;
            *pending = Some(Accumulator::new(entry, deadline));
            return;
        }

        match pending.as_mut() {
            Some(acc) => {
                if acc.parts.len() < self.limit {
                    acc.parts.push(entry.content);
                    acc.deadline = Instant::now() + self.timeout;
                } else {
                    self.truncated_lines.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        limit = self.limit,
                        "continuation limit reached, dropping line"
                    );
                }
            }
            None => {
                // 헤더 없이 도착한 연속 라인은 독립 Unknown 메시지로 방출
                self.emit(Message {
                    timestamp: entry.timestamp,
                    content: entry.content,
                    level: Level::Unknown,
                })
                .await;
            }
        }
    }

    async fn emit(&self, message: Message) {
        if self.message_tx.send(message).await.is_err() {
            tracing::error!("message channel closed, dropping assembled message");
        }
    }
}
