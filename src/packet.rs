//! 업로드/삭제 프레임 정의
//!
//! - Header: Size(2) + FileName(12) + HeaderChecksum(2)
//! - Frame: Header 단독 (삭제) 또는 Header + Data + DataChecksum (업로드)
//!
//! 모든 정수는 little-endian

use std::fmt;
use std::path::Path;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, warn};

use crate::checksum::{checksum, checksum_le};
use crate::error::FrameError;
use crate::{Error, Result, CHECKSUM_LEN, FILENAME_LEN, HEADER_LEN, MAX_DATA_LEN, SIZE_LEN};

/// 12바이트 고정 길이 파일 이름 (ASCII, null 패딩)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileName {
    bytes: [u8; FILENAME_LEN],

    /// 원본 이름이 12바이트를 넘어 잘렸는지
    truncated: bool,
}

impl FileName {
    /// 이름 인코딩
    ///
    /// 7비트 ASCII가 아닌 문자가 하나라도 있으면 치환하지 않고 실패함.
    /// 12바이트를 넘으면 앞 12바이트만 사용, 짧으면 0으로 채움
    pub fn encode(name: &str) -> Result<Self> {
        if !name.is_ascii() {
            return Err(Error::Encoding {
                name: name.to_string(),
            });
        }

        let raw = name.as_bytes();
        let len = raw.len().min(FILENAME_LEN);
        let mut bytes = [0u8; FILENAME_LEN];
        bytes[..len].copy_from_slice(&raw[..len]);

        Ok(Self {
            bytes,
            truncated: raw.len() > FILENAME_LEN,
        })
    }

    /// 와이어에서 읽은 바이트 그대로 (검증 없음)
    pub fn from_raw(bytes: [u8; FILENAME_LEN]) -> Self {
        Self {
            bytes,
            truncated: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8; FILENAME_LEN] {
        &self.bytes
    }

    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// null 패딩을 제외한 부분
    pub fn trimmed(&self) -> &[u8] {
        let end = self
            .bytes
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        &self.bytes[..end]
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.trimmed()))
    }
}

/// 프레임 헤더 (16바이트)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// 데이터 길이 (삭제 시 0)
    pub size: u16,

    /// 파일 이름
    pub file_name: FileName,

    /// Size + FileName 14바이트의 체크섬
    pub checksum: u16,
}

impl Header {
    /// 새 헤더 생성 (체크섬 계산 포함)
    pub fn new(size: u16, file_name: FileName) -> Self {
        let checksum = checksum(&Self::covered_bytes(size, &file_name));
        Self {
            size,
            file_name,
            checksum,
        }
    }

    /// 헤더 체크섬이 덮는 앞 14바이트
    fn covered_bytes(size: u16, file_name: &FileName) -> [u8; SIZE_LEN + FILENAME_LEN] {
        let mut buf = [0u8; SIZE_LEN + FILENAME_LEN];
        buf[..SIZE_LEN].copy_from_slice(&size.to_le_bytes());
        buf[SIZE_LEN..].copy_from_slice(file_name.as_bytes());
        buf
    }

    /// 헤더를 바이트로 직렬화
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[..SIZE_LEN + FILENAME_LEN]
            .copy_from_slice(&Self::covered_bytes(self.size, &self.file_name));
        buf[SIZE_LEN + FILENAME_LEN..].copy_from_slice(&self.checksum.to_le_bytes());
        buf
    }
}

/// 프레임 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// 헤더 + 데이터 + 데이터 체크섬
    Upload,

    /// 헤더 단독 (Size = 0)
    Delete,
}

/// 전송 단위 프레임
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: Header,
    bytes: Bytes,
}

impl Frame {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn kind(&self) -> FrameKind {
        if self.header.size == 0 {
            FrameKind::Delete
        } else {
            FrameKind::Upload
        }
    }

    /// 와이어 바이트 전체
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 헤더는 항상 존재하므로 항상 false
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn data_len(&self) -> usize {
        self.header.size as usize
    }

    /// 페이로드 (삭제 프레임이면 빈 슬라이스)
    pub fn data(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..HEADER_LEN + self.data_len()]
    }

    /// 공백 구분 대문자 16진수 (dry-run 출력용)
    pub fn to_hex(&self) -> String {
        self.bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 수신측과 같은 방식으로 프레임 검증 후 역직렬화
    pub fn parse(bytes: &[u8]) -> std::result::Result<Self, FrameError> {
        if bytes.len() < HEADER_LEN {
            return Err(FrameError::Truncated {
                expected: HEADER_LEN,
                got: bytes.len(),
            });
        }

        let size = u16::from_le_bytes([bytes[0], bytes[1]]);
        let mut name = [0u8; FILENAME_LEN];
        name.copy_from_slice(&bytes[SIZE_LEN..SIZE_LEN + FILENAME_LEN]);
        let stored = u16::from_le_bytes([bytes[HEADER_LEN - 2], bytes[HEADER_LEN - 1]]);

        let header = Header::new(size, FileName::from_raw(name));
        if header.checksum != stored {
            return Err(FrameError::HeaderChecksum {
                expected: header.checksum,
                got: stored,
            });
        }

        let expected_len = frame_len(size as usize);
        if bytes.len() < expected_len {
            return Err(FrameError::Truncated {
                expected: expected_len,
                got: bytes.len(),
            });
        }
        if bytes.len() > expected_len {
            return Err(FrameError::TrailingBytes {
                expected: expected_len,
                got: bytes.len(),
            });
        }

        if size > 0 {
            let data = &bytes[HEADER_LEN..HEADER_LEN + size as usize];
            let stored = u16::from_le_bytes([bytes[expected_len - 2], bytes[expected_len - 1]]);
            let computed = checksum(data);
            if computed != stored {
                return Err(FrameError::DataChecksum {
                    expected: computed,
                    got: stored,
                });
            }
        }

        Ok(Self {
            header,
            bytes: Bytes::copy_from_slice(bytes),
        })
    }
}

/// 데이터 길이에 대한 전체 프레임 길이
pub fn frame_len(data_len: usize) -> usize {
    if data_len == 0 {
        HEADER_LEN
    } else {
        HEADER_LEN + data_len + CHECKSUM_LEN
    }
}

/// 업로드 프레임 생성
///
/// 데이터가 비어 있으면 헤더만 있는 프레임 (삭제와 동일)
pub fn build_upload(name: &str, data: &[u8]) -> Result<Frame> {
    // Size 필드는 2바이트, 넘치면 잘라내지 않고 거부
    let size = u16::try_from(data.len()).map_err(|_| Error::FileTooLarge {
        size: data.len(),
        max: MAX_DATA_LEN,
    })?;

    let file_name = FileName::encode(name)?;
    if file_name.was_truncated() {
        warn!(
            "파일 이름이 {}바이트를 넘어 잘림: {:?} -> {:?}",
            FILENAME_LEN,
            name,
            file_name.to_string()
        );
    }

    let header = Header::new(size, file_name);

    let mut buf = BytesMut::with_capacity(frame_len(data.len()));
    buf.put_slice(&header.to_bytes());
    if !data.is_empty() {
        buf.put_slice(data);
        buf.put_slice(&checksum_le(data));
    }

    debug!(
        "프레임 생성: name={}, size={}, header_checksum={:04X}, frame_len={}",
        file_name,
        size,
        header.checksum,
        buf.len()
    );

    Ok(Frame {
        header,
        bytes: buf.freeze(),
    })
}

/// 삭제 프레임 생성
pub fn build_delete(name: &str) -> Result<Frame> {
    build_upload(name, &[])
}

/// 호출자 수준의 요청
#[derive(Debug, Clone)]
pub enum Request {
    Upload { name: String, data: Bytes },
    Delete { name: String },
}

impl Request {
    /// 데이터 유무로 요청 종류 결정
    pub fn new(name: impl Into<String>, data: Option<Bytes>) -> Self {
        let name = name.into();
        match data {
            Some(data) => Request::Upload { name, data },
            None => Request::Delete { name },
        }
    }

    /// 데이터 파일이 있으면 읽어서 업로드, 없으면 삭제
    pub fn load(name: impl Into<String>, data_file: Option<&Path>) -> Result<Self> {
        let data = match data_file {
            Some(path) => Some(Bytes::from(std::fs::read(path)?)),
            None => None,
        };
        Ok(Self::new(name, data))
    }

    pub fn name(&self) -> &str {
        match self {
            Request::Upload { name, .. } | Request::Delete { name } => name,
        }
    }

    pub fn into_frame(self) -> Result<Frame> {
        match self {
            Request::Upload { name, data } => {
                if data.is_empty() {
                    warn!("빈 파일 업로드는 삭제 요청과 같은 프레임으로 전송됨: {}", name);
                }
                build_upload(&name, &data)
            }
            Request::Delete { name } => build_delete(&name),
        }
    }
}
