//! 송신기
//!
//! - 전송당 싱크 1회 획득, 모든 경로에서 해제
//! - 플러시 후 고정 대기 (UART 드레인)
//! - 응답 채널 없음: 성공은 바이트가 송신기를 떠났다는 의미일 뿐

use std::io::Write;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::TransmissionError;
use crate::packet::Frame;
use crate::sink::{SerialOpener, SinkOpener};

/// 전송 상태
///
/// Idle -> Open -> Writing -> Settling -> Closed, 에러 시 중간에서 바로 Closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitState {
    Idle,
    Open,
    Writing,
    Settling,
    Closed,
}

/// 송신기
pub struct Transmitter<O: SinkOpener> {
    /// 싱크 오프너
    opener: O,

    /// 포트 이름
    port: String,

    /// 설정
    config: Config,

    /// 현재 상태
    state: TransmitState,
}

impl Transmitter<SerialOpener> {
    /// 실제 시리얼 포트용 송신기
    pub fn serial(port: impl Into<String>, config: Config) -> Self {
        Self::new(SerialOpener, port, config)
    }
}

impl<O: SinkOpener> Transmitter<O> {
    /// 새 송신기 생성
    pub fn new(opener: O, port: impl Into<String>, config: Config) -> Self {
        Self {
            opener,
            port: port.into(),
            config,
            state: TransmitState::Idle,
        }
    }

    pub fn state(&self) -> TransmitState {
        self.state
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 프레임 전송
    ///
    /// 성공/실패와 관계없이 반환 시점에 싱크는 해제되어 있고 상태는 Closed
    pub fn send(&mut self, frame: &Frame) -> Result<(), TransmissionError> {
        self.transition(TransmitState::Idle);
        let result = self.drive(frame.as_bytes());
        self.transition(TransmitState::Closed);
        result
    }

    fn drive(&mut self, bytes: &[u8]) -> Result<(), TransmissionError> {
        let mut sink = self
            .opener
            .open(&self.port, &self.config.line)
            .map_err(|source| TransmissionError::Open {
                port: self.port.clone(),
                source,
            })?;
        self.transition(TransmitState::Open);

        self.transition(TransmitState::Writing);
        sink.write_all(bytes).map_err(TransmissionError::Write)?;
        sink.flush().map_err(TransmissionError::Flush)?;

        // flush 반환이 실제 송출 완료를 의미하지 않음
        self.transition(TransmitState::Settling);
        let delay = self.config.pacing.settle_delay(bytes.len());
        info!(
            "{} 바이트 송출, {:.2}초 대기 후 포트 해제",
            bytes.len(),
            delay.as_secs_f64()
        );
        let started = Instant::now();
        std::thread::sleep(delay);
        debug!("대기 완료: {:?}", started.elapsed());

        drop(sink);
        Ok(())
    }

    fn transition(&mut self, next: TransmitState) {
        debug!("전송 상태: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
