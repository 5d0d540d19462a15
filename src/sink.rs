//! 바이트 싱크
//!
//! 전송기는 포트를 직접 다루지 않고 `SinkOpener`를 통해 싱크를 얻음.
//! 싱크는 `io::Write`이고, drop 시점에 해제됨

use std::io::{self, Write};

use serialport::SerialPort;
use tracing::debug;

use crate::config::LineConfig;

/// 싱크 획득 능력
pub trait SinkOpener {
    type Sink: Write;

    /// 주어진 라인 설정으로 싱크 열기
    fn open(&self, port: &str, line: &LineConfig) -> io::Result<Self::Sink>;
}

/// 실제 시리얼 포트 싱크
pub struct SerialSink {
    name: String,
    port: Box<dyn SerialPort>,
}

impl SerialSink {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Write for SerialSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

impl Drop for SerialSink {
    fn drop(&mut self) {
        debug!("포트 닫힘: {}", self.name);
    }
}

/// `serialport` 기반 오프너
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialOpener;

impl SinkOpener for SerialOpener {
    type Sink = SerialSink;

    fn open(&self, port: &str, line: &LineConfig) -> io::Result<SerialSink> {
        let handle = serialport::new(port, line.baud_rate)
            .data_bits(line.data_bits)
            .parity(line.parity)
            .stop_bits(line.stop_bits)
            .flow_control(line.flow_control)
            .timeout(line.timeout)
            .open()
            .map_err(io::Error::from)?;

        debug!("포트 열림: {} ({} baud)", port, line.baud_rate);

        Ok(SerialSink {
            name: port.to_string(),
            port: handle,
        })
    }
}

/// 사용 가능한 시리얼 포트 이름 목록
pub fn list_ports() -> Vec<String> {
    serialport::available_ports()
        .map(|v| v.into_iter().map(|p| p.port_name).collect())
        .unwrap_or_default()
}
