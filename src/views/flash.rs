//! 세션 기반 플래시 메시지
//!
//! 쌓인 메시지는 다음 [`super::render`] 호출에서 한 번 읽히고 지워집니다.
//! 리다이렉트 응답은 렌더링하지 않으므로 메시지가 그대로 다음 요청까지 전달됩니다.

use actix_session::Session;
use crate::domain::models::flash::{FlashBag, FlashLevel};

const FLASH_SESSION_KEY: &str = "_flash";

fn peek(session: &Session) -> FlashBag {
    session
        .get::<FlashBag>(FLASH_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// 플래시 저장 실패는 요청을 실패시키지 않습니다.
pub fn push(session: &Session, level: FlashLevel, message: impl Into<String>) {
    let mut bag = peek(session);
    bag.push(level, message);

    if let Err(e) = session.insert(FLASH_SESSION_KEY, &bag) {
        log::warn!("⚠️ 플래시 메시지 저장 실패: {}", e);
    }
}

pub fn success(session: &Session, message: impl Into<String>) {
    push(session, FlashLevel::Success, message);
}

pub fn error(session: &Session, message: impl Into<String>) {
    push(session, FlashLevel::Error, message);
}

pub fn info(session: &Session, message: impl Into<String>) {
    push(session, FlashLevel::Info, message);
}

/// 쌓인 메시지를 꺼내고 세션에서 지웁니다.
pub fn take(session: &Session) -> FlashBag {
    match session.remove_as::<FlashBag>(FLASH_SESSION_KEY) {
        Some(Ok(bag)) => bag,
        Some(Err(raw)) => {
            log::warn!("⚠️ 손상된 플래시 메시지 폐기: {}", raw);
            FlashBag::default()
        }
        None => FlashBag::default(),
    }
}
