use lorigate::agent::{GatewayAgent, PollOutcome};
use lorigate::classifier::{PacketDirection, SignalMeta};
use lorigate::config::Config;
use lorigate::sim::SimBoard;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::time;
use tracing::{error, info, warn};

const TCP_PORT: u16 = 8073;
const POLL_INTERVAL_MS: u64 = 1_000;

/// Signal figures attached to injected packets. The simulated radio has no
/// real RF front end, so every packet arrives with the same plausible ones.
const INJECTED_RSSI_DBM: i16 = -90;
const INJECTED_SNR_DB: f32 = 7.25;
const INJECTED_FREQ_ERROR_HZ: i32 = 1_200;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("LoRa APRS Station Simulator");
    println!("===========================");

    let config = match Config::load(Path::new("config.json")) {
        Ok(config) => config,
        Err(e) => {
            warn!("config.json not loaded ({}), using defaults", e);
            Config::default()
        }
    };

    let board = SimBoard::new();
    let state = board.state();
    let agent = Arc::new(Mutex::new(GatewayAgent::new(config, board.links())));

    let epoch = Instant::now();
    {
        let mut agent_guard = agent.lock().await;
        agent_guard.start(0);
    }

    let tcp_agent = Arc::clone(&agent);
    let tcp_server = tokio::spawn(async move {
        if let Err(e) = start_tcp_server(tcp_agent).await {
            error!("TCP server error: {}", e);
        }
    });

    let mut interval = time::interval(Duration::from_millis(POLL_INTERVAL_MS));
    loop {
        interval.tick().await;
        let now_ms = epoch.elapsed().as_millis() as u32;

        let outcome = {
            let mut agent_guard = agent.lock().await;
            agent_guard.poll(now_ms)
        };

        match outcome {
            PollOutcome::Running => {}
            PollOutcome::Restarting => {
                info!("reboot requested, stopping simulator");
                break;
            }
            PollOutcome::Sleeping => {
                info!("deep sleep requested, stopping simulator");
                break;
            }
        }

        let snapshot = state.lock().unwrap().last_shown.clone();
        if !snapshot.is_empty() {
            info!("display: {}", snapshot.join(" | "));
        }
    }

    tcp_server.abort();
    println!("Station simulator stopped");

    Ok(())
}

async fn start_tcp_server(
    agent: Arc<Mutex<GatewayAgent>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", TCP_PORT)).await?;
    info!("packet injection port listening on {}", TCP_PORT);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("client connected: {}", addr);
                let client_agent = Arc::clone(&agent);
                tokio::spawn(async move {
                    if let Err(e) = handle_client(stream, client_agent).await {
                        warn!("client {} error: {}", addr, e);
                    }
                    info!("client {} disconnected", addr);
                });
            }
            Err(e) => {
                error!("failed to accept connection: {}", e);
            }
        }
    }
}

/// One line per packet: the raw APRS frame text. The classification label
/// is echoed back.
async fn handle_client(
    stream: TcpStream,
    agent: Arc<Mutex<GatewayAgent>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (reader, mut writer) = stream.into_split();
    let mut buf_reader = BufReader::new(reader);

    let mut line = String::new();
    loop {
        line.clear();
        match buf_reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                info!("injected packet: {}", trimmed);
                let signal = SignalMeta {
                    rssi_dbm: INJECTED_RSSI_DBM,
                    snr_db: INJECTED_SNR_DB,
                    freq_error_hz: INJECTED_FREQ_ERROR_HZ,
                };
                let kind = {
                    let mut agent_guard = agent.lock().await;
                    agent_guard.handle_packet(trimmed, PacketDirection::RadioToInternet, signal)
                };

                writer.write_all(kind.label().as_bytes()).await?;
                writer.write_all(b"\n").await?;
            }
            Err(e) => {
                warn!("read error: {}", e);
                break;
            }
        }
    }

    Ok(())
}
