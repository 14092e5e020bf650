//! 패턴 지문 -- 메시지를 토큰 값만 다른 동치류로 묶습니다.
//!
//! [`Pattern`]은 하나의 메시지 본문에서 파생되는 불변 값입니다.
//! stable 토큰열에 대한 고정 다이제스트(`hash`)로 1차 병합하고,
//! 해시가 다른 경우 [`Pattern::weak_equal`]로 구조적 동치를 판정하여
//! 2차 병합합니다.
//!
//! # 아키텍처
//! - [`token`]: 토큰화 및 stable/variable 분류
//! - [`Pattern`]: 지문 계산 및 약한 동치 판정

pub mod token;

pub use token::{Token, TokenKind};

/// FNV-1a 64비트 오프셋 베이시스
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a 64비트 소수
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64비트 다이제스트 누산기
///
/// 프로세스 실행 간에도 동일한 입력에 동일한 해시를 보장해야 하므로
/// 시드가 고정된 다이제스트를 사용합니다 (std `DefaultHasher`는
/// 실행마다 시드가 달라 사용할 수 없음).
struct Fnv1a {
    state: u64,
}

impl Fnv1a {
    fn new() -> Self {
        Self { state: FNV_OFFSET }
    }

    fn update(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= u64::from(b);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.state
    }
}

/// 로그 패턴 -- 메시지 하나에서 파생되는 불변 지문
///
/// `hash`는 `"{토큰 수}:" + stable 토큰들을 공백으로 이은 문자열`에 대한
/// FNV-1a 64비트 다이제스트의 16자리 소문자 hex 표현입니다.
/// stable 토큰열이 같은 두 메시지는 항상 같은 해시를 가집니다.
#[derive(Debug, Clone)]
pub struct Pattern {
    tokens: Vec<Token>,
    hash: String,
}

impl Pattern {
    /// 본문을 토큰화하여 패턴을 생성합니다.
    pub fn new(content: &str) -> Self {
        let tokens = token::tokenize(content);

        let mut digest = Fnv1a::new();
        digest.update(tokens.len().to_string().as_bytes());
        digest.update(b":");
        let mut first = true;
        for t in &tokens {
            if !t.is_stable() {
                continue;
            }
            if !first {
                digest.update(b" ");
            }
            digest.update(t.text.as_bytes());
            first = false;
        }

        Self {
            tokens,
            hash: format!("{:016x}", digest.finish()),
        }
    }

    /// 패턴 해시를 반환합니다.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// 토큰열을 반환합니다.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// 두 패턴이 구조적으로 동치인지 판정합니다.
    ///
    /// 토큰 수가 같고, 모든 위치에서 분류가 일치하며,
    /// stable 위치의 텍스트가 전부 같으면 참입니다.
    /// 고정 길이 토큰열 위에서 반사/대칭/추이 관계입니다.
    pub fn weak_equal(&self, other: &Self) -> bool {
        if self.tokens.len() != other.tokens.len() {
            return false;
        }
        self.tokens.iter().zip(&other.tokens).all(|(a, b)| {
            a.kind == b.kind && (a.kind == TokenKind::Variable || a.text == b.text)
        })
    }
}
