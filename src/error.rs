//! 에러 타입 정의

use thiserror::Error;

/// 시리얼 전송 단계 에러
///
/// 모든 경우 싱크는 이미 해제된 상태로 반환됨
#[derive(Error, Debug)]
pub enum TransmissionError {
    #[error("포트 열기 실패: {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: std::io::Error,
    },

    #[error("쓰기 실패: {0}")]
    Write(#[source] std::io::Error),

    #[error("플러시 실패: {0}")]
    Flush(#[source] std::io::Error),
}

/// 수신측 관점의 프레임 검증 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("프레임 길이 부족: 최소 {expected} 바이트 필요, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("프레임 뒤에 불필요한 바이트: expected {expected} 바이트, got {got}")]
    TrailingBytes { expected: usize, got: usize },

    #[error("헤더 체크섬 불일치: expected {expected:04X}, got {got:04X}")]
    HeaderChecksum { expected: u16, got: u16 },

    #[error("데이터 체크섬 불일치: expected {expected:04X}, got {got:04X}")]
    DataChecksum { expected: u16, got: u16 },
}

/// IrDA 전송기 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("파일 이름이 ASCII가 아님: {name:?}")]
    Encoding { name: String },

    #[error("파일이 너무 큼: {size} 바이트 (최대 {max})")]
    FileTooLarge { size: usize, max: usize },

    #[error("전송 에러: {0}")]
    Transmission(#[from] TransmissionError),

    #[error("IO 에러: {0}")]
    Io(#[from] std::io::Error),

    #[error("잘못된 프레임: {0}")]
    MalformedFrame(#[from] FrameError),
}

impl Error {
    /// 프로세스 종료 코드 (0과 사용법 에러용 2는 제외)
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Encoding { .. } => 3,
            Error::FileTooLarge { .. } => 4,
            Error::Transmission(TransmissionError::Open { .. }) => 5,
            Error::Transmission(TransmissionError::Write(_))
            | Error::Transmission(TransmissionError::Flush(_)) => 6,
            Error::Io(_) => 7,
            Error::MalformedFrame(_) => 8,
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let errors = [
            Error::Encoding { name: "é".into() },
            Error::FileTooLarge { size: 65536, max: 65535 },
            Error::Transmission(TransmissionError::Open {
                port: "/dev/null".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Error::Transmission(TransmissionError::Write(std::io::Error::from(
                std::io::ErrorKind::BrokenPipe,
            ))),
            Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound)),
            Error::MalformedFrame(FrameError::Truncated { expected: 16, got: 3 }),
        ];

        let mut codes: Vec<u8> = errors.iter().map(Error::exit_code).collect();
        assert!(codes.iter().all(|&c| c != 0 && c != 2));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_transmission_error_converts() {
        let err: Error = TransmissionError::Flush(std::io::Error::from(
            std::io::ErrorKind::TimedOut,
        ))
        .into();
        assert!(matches!(err, Error::Transmission(TransmissionError::Flush(_))));
        assert_eq!(err.exit_code(), 6);
    }
}
