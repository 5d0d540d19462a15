//! # irda-tx
//!
//! 900 baud IrDA 시리얼 링크로 워치에 파일 업로드/삭제 요청을 보내는 전송기
//!
//! ## 핵심 특징
//! - **고정 프레임**: Size(2) + FileName(12) + HeaderChecksum(2) [+ Data + DataChecksum(2)]
//! - **합산 체크섬**: 바이트 합 mod 65536, little-endian
//! - **단방향 전송**: ACK/재전송 없음, 성공은 송출 완료만 의미
//! - **드레인 대기**: flush 후 `len / 90 + 0.5`초 대기 뒤 포트 해제

pub mod checksum;
pub mod config;
pub mod error;
pub mod packet;
pub mod sink;
pub mod transmitter;

pub use checksum::checksum;
pub use config::{Config, LineConfig, Pacing};
pub use error::{Error, FrameError, Result, TransmissionError};
pub use packet::{build_delete, build_upload, FileName, Frame, FrameKind, Header, Request};
pub use sink::{list_ports, SerialOpener, SerialSink, SinkOpener};
pub use transmitter::{TransmitState, Transmitter};

/// Size 필드 길이 (바이트)
pub const SIZE_LEN: usize = 2;

/// 파일 이름 필드 길이 (바이트)
pub const FILENAME_LEN: usize = 12;

/// 체크섬 필드 길이 (바이트)
pub const CHECKSUM_LEN: usize = 2;

/// 헤더 전체 길이 (바이트)
pub const HEADER_LEN: usize = SIZE_LEN + FILENAME_LEN + CHECKSUM_LEN;

/// Size 필드로 표현 가능한 최대 데이터 길이
pub const MAX_DATA_LEN: usize = u16::MAX as usize;
