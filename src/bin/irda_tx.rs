//! irda-tx - 워치 IrDA 파일 전송기
//!
//! 900 baud 8N1 시리얼 포트로 업로드/삭제 프레임 1개를 보내고 종료
//!
//! 사용법:
//!   cargo run --release --bin irda-tx -- [OPTIONS] <port> <filename> [data_file]
//!
//! 예시:
//!   # 업로드
//!   cargo run --release --bin irda-tx -- /dev/ttyUSB0 myfile.txt data.txt
//!
//!   # 삭제
//!   cargo run --release --bin irda-tx -- /dev/ttyUSB0 myfile.txt

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use irda_tx::{list_ports, Config, Error, Request, Transmitter};

const USAGE: &str = "사용법: irda-tx [OPTIONS] <port> <filename> [data_file]";

const HELP: &str = r#"irda-tx - 워치 IrDA 파일 전송기

900 baud IrDA 링크로 파일 업로드/삭제 요청 전송
- data_file이 있으면 업로드, 없으면 삭제
- 수신 확인 없음: 성공은 송출 완료만 의미

사용법:
  irda-tx [OPTIONS] <port> <filename> [data_file]

인자:
  <port>                 시리얼 포트 (예: /dev/ttyUSB0, COM3)
  <filename>             워치에 저장될 이름 (ASCII, 최대 12자)
  [data_file]            업로드할 파일 (생략 시 삭제)

옵션:
  -n, --dry-run          프레임만 생성해서 16진수로 출력 (포트 열지 않음)
  -l, --list-ports       사용 가능한 시리얼 포트 출력
  -v, --verbose          디버그 로그 출력
  -h, --help             이 도움말 출력

예시:
  # 업로드
  irda-tx /dev/ttyUSB0 myfile.txt data.txt

  # 삭제
  irda-tx /dev/ttyUSB0 myfile.txt

  # 전송 없이 프레임 확인
  irda-tx -n /dev/ttyUSB0 myfile.txt data.txt
"#;

/// 실행할 명령
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    ListPorts,
    Send {
        port: String,
        file_name: String,
        data_file: Option<PathBuf>,
    },
}

/// CLI 설정
#[derive(Debug)]
struct CliConfig {
    command: Command,
    dry_run: bool,
    verbose: bool,
    config: Config,
}

fn parse_args<I>(args: I) -> Result<CliConfig, String>
where
    I: IntoIterator<Item = String>,
{
    let mut positional = Vec::new();
    let mut dry_run = false;
    let mut verbose = false;
    let mut list = false;

    for arg in args {
        match arg.as_str() {
            "--dry-run" | "-n" => dry_run = true,
            "--verbose" | "-v" => verbose = true,
            "--list-ports" | "-l" => list = true,
            "--help" | "-h" => {
                return Ok(CliConfig {
                    command: Command::Help,
                    dry_run,
                    verbose,
                    config: Config::irda(),
                })
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(format!("알 수 없는 옵션: {}", s));
            }
            _ => positional.push(arg),
        }
    }

    let command = if list {
        if !positional.is_empty() {
            return Err("--list-ports는 다른 인자와 함께 쓸 수 없음".to_string());
        }
        Command::ListPorts
    } else {
        let mut positional = positional.into_iter();
        match (positional.next(), positional.next(), positional.next()) {
            (Some(port), Some(file_name), data_file) => {
                if positional.next().is_some() {
                    return Err("인자가 너무 많음".to_string());
                }
                Command::Send {
                    port,
                    file_name,
                    data_file: data_file.map(PathBuf::from),
                }
            }
            _ => return Err("<port>와 <filename>이 필요함".to_string()),
        }
    };

    Ok(CliConfig {
        command,
        dry_run,
        verbose,
        config: Config::irda(),
    })
}

fn run(cli: CliConfig) -> Result<(), Error> {
    let (port, file_name, data_file) = match cli.command {
        Command::Send {
            port,
            file_name,
            data_file,
        } => (port, file_name, data_file),
        Command::ListPorts => {
            let ports = list_ports();
            if ports.is_empty() {
                warn!("사용 가능한 시리얼 포트 없음");
            }
            for name in ports {
                println!("{}", name);
            }
            return Ok(());
        }
        Command::Help => {
            println!("{}", HELP);
            return Ok(());
        }
    };

    let request = Request::load(file_name, data_file.as_deref())?;
    match &request {
        Request::Upload { name, data } => {
            info!("Uploading '{}' ({} bytes) to watch...", name, data.len())
        }
        Request::Delete { name } => info!("Deleting '{}' from watch...", name),
    }

    let frame = request.into_frame()?;
    info!("Packet size: {} bytes ({:?})", frame.len(), frame.kind());

    if cli.dry_run {
        println!("{}", frame.to_hex());
        return Ok(());
    }

    let mut tx = Transmitter::serial(port, cli.config);
    info!(
        "Opening {} at {} baud, expected wait {:.2}s",
        tx.port(),
        tx.config().line.baud_rate,
        tx.config().pacing.settle_delay(frame.len()).as_secs_f64()
    );
    tx.send(&frame)?;
    info!("Transmission complete!");

    Ok(())
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };

    // 로깅 설정 (RUST_LOG가 있으면 우선)
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
