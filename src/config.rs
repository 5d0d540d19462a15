//! 전송 설정
//!
//! 기본값은 워치의 IrDA 수신부 기준 (900 baud, 8N1)

use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, StopBits};

/// 기본 보율
pub const IRDA_BAUD_RATE: u32 = 900;

/// 포트 읽기 타임아웃
pub const IRDA_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// 시리얼 라인 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,

    /// 읽기 타임아웃 (송신 전용이지만 포트가 무한 대기하지 않도록)
    pub timeout: Duration,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            baud_rate: IRDA_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            timeout: IRDA_READ_TIMEOUT,
        }
    }
}

/// 플러시 후 포트를 닫기 전 대기 시간 파라미터
///
/// 일부 시리얼 스택은 UART 시프트 레지스터가 비기 전에 flush에서 반환함.
/// 900 baud에서 그 전에 포트를 닫으면 전송이 잘림
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// 가정 처리량 (바이트/초)
    pub bytes_per_sec: f64,

    /// 추가 여유 시간
    pub guard: Duration,
}

impl Pacing {
    /// 900 baud 8N1 = 약 90 바이트/초, 여유 0.5초
    pub const IRDA: Pacing = Pacing {
        bytes_per_sec: 90.0,
        guard: Duration::from_millis(500),
    };

    /// 대기 없음 (테스트/루프백용)
    pub const NONE: Pacing = Pacing {
        bytes_per_sec: f64::INFINITY,
        guard: Duration::ZERO,
    };

    /// 프레임 길이에 대한 대기 시간: len / bytes_per_sec + guard
    pub fn settle_delay(&self, frame_len: usize) -> Duration {
        let drain = if self.bytes_per_sec.is_finite() && self.bytes_per_sec > 0.0 {
            Duration::from_secs_f64(frame_len as f64 / self.bytes_per_sec)
        } else {
            Duration::ZERO
        };
        drain + self.guard
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::IRDA
    }
}

/// 전송기 설정
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Config {
    /// 라인 설정
    pub line: LineConfig,

    /// 대기 파라미터
    pub pacing: Pacing,
}

impl Config {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 워치 IrDA 업로드용 설정 (기본값과 동일)
    pub fn irda() -> Self {
        Self::default()
    }

    /// 유선 UART 루프백 등 대기가 필요 없는 환경용 설정
    pub fn no_pacing() -> Self {
        Self {
            pacing: Pacing::NONE,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_is_900_8n1() {
        let line = LineConfig::default();
        assert_eq!(line.baud_rate, 900);
        assert_eq!(line.data_bits, DataBits::Eight);
        assert_eq!(line.parity, Parity::None);
        assert_eq!(line.stop_bits, StopBits::One);
        assert_eq!(line.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_irda_settle_delay() {
        let delay = Pacing::IRDA.settle_delay(21);
        let expected = 21.0 / 90.0 + 0.5;
        assert!((delay.as_secs_f64() - expected).abs() < 1e-6);

        assert_eq!(Pacing::IRDA.settle_delay(0), Duration::from_millis(500));
        assert_eq!(Pacing::IRDA.settle_delay(90), Duration::from_millis(1500));
    }

    #[test]
    fn test_no_pacing() {
        assert_eq!(Pacing::NONE.settle_delay(65553), Duration::ZERO);
        assert_eq!(Config::no_pacing().line, LineConfig::default());
    }
}
