use clap::{App, Arg, ArgMatches, SubCommand};
use colored::*;
use lorigate::classifier::{PacketClassifier, PacketDirection, SignalMeta};
use lorigate::config::Config;
use lorigate::freq::FreqAction;
use lorigate::links::{PositionInfo, PositionLookup};
use lorigate::{is_valid_callsign, FrequencyGuard, FIRMWARE_VERSION};
use std::path::Path;

/// Offline lookup stand-in: the CLI has no station directory to resolve
/// distances from.
struct NoLookup;

impl PositionLookup for NoLookup {
    fn resolve(&mut self, _packet: &str) -> PositionInfo {
        PositionInfo::default()
    }
}

fn main() {
    let matches = App::new("igate")
        .version(FIRMWARE_VERSION)
        .about("LoRa APRS gateway - offline validation and classification tooling")
        .subcommand(
            SubCommand::with_name("callsign")
                .about("Validate an amateur-radio callsign with optional SSID")
                .arg(
                    Arg::with_name("CALL")
                        .help("Callsign to validate, e.g. CA2RXU-15")
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("classify")
                .about("Classify a raw APRS packet and print the display lines")
                .arg(
                    Arg::with_name("PACKET")
                        .help("Raw packet text, e.g. 'CALL>APRS::CALL-2   :hello'")
                        .required(true),
                )
                .arg(
                    Arg::with_name("rssi")
                        .long("rssi")
                        .value_name("DBM")
                        .help("Received signal strength in dBm")
                        .takes_value(true)
                        .default_value("-90")
                        .validator(|v| {
                            v.parse::<i16>().map(|_| ()).map_err(|_| "RSSI must be an integer".into())
                        }),
                )
                .arg(
                    Arg::with_name("snr")
                        .long("snr")
                        .value_name("DB")
                        .help("Signal-to-noise ratio in dB")
                        .takes_value(true)
                        .default_value("7.25")
                        .validator(|v| {
                            v.parse::<f32>().map(|_| ()).map_err(|_| "SNR must be a number".into())
                        }),
                ),
        )
        .subcommand(
            SubCommand::with_name("freqcheck")
                .about("Check a transmit/receive frequency plan against the guard band")
                .arg(
                    Arg::with_name("TX_HZ")
                        .help("Transmit frequency in Hz")
                        .required(true)
                        .validator(|v| {
                            v.parse::<u32>().map(|_| ()).map_err(|_| "frequency must be in Hz".into())
                        }),
                )
                .arg(
                    Arg::with_name("RX_HZ")
                        .help("Receive frequency in Hz")
                        .required(true)
                        .validator(|v| {
                            v.parse::<u32>().map(|_| ()).map_err(|_| "frequency must be in Hz".into())
                        }),
                ),
        )
        .subcommand(
            SubCommand::with_name("config-check")
                .about("Load a config file and validate its callsign and frequency plan")
                .arg(
                    Arg::with_name("PATH")
                        .help("Path to the JSON config file")
                        .required(true),
                ),
        )
        .get_matches();

    let code = match matches.subcommand() {
        ("callsign", Some(sub)) => run_callsign(sub),
        ("classify", Some(sub)) => run_classify(sub),
        ("freqcheck", Some(sub)) => run_freqcheck(sub),
        ("config-check", Some(sub)) => run_config_check(sub),
        _ => {
            println!(
                "{}",
                "No command specified. Use --help for usage information.".yellow()
            );
            1
        }
    };
    std::process::exit(code);
}

fn run_callsign(matches: &ArgMatches) -> i32 {
    let call = matches.value_of("CALL").unwrap();
    if is_valid_callsign(call) {
        println!("{} {}", "✔".green(), format!("{} is valid", call).bright_green());
        0
    } else {
        println!("{} {}", "✘".red(), format!("{} is not valid", call).bright_red());
        1
    }
}

fn run_classify(matches: &ArgMatches) -> i32 {
    let packet = matches.value_of("PACKET").unwrap();
    let rssi_dbm = matches.value_of("rssi").unwrap().parse().unwrap();
    let snr_db = matches.value_of("snr").unwrap().parse().unwrap();

    let signal = SignalMeta {
        rssi_dbm,
        snr_db,
        freq_error_hz: 0,
    };
    // Log-only mode: nothing to resolve a distance against.
    let mut classifier = PacketClassifier::new(true);
    let update = classifier.classify(packet, PacketDirection::RadioToInternet, signal, &mut NoLookup);

    println!("{} {}", "Kind:".bright_white(), update.kind.label().bright_cyan());
    println!("{} {}", "Line 4:".bright_white(), update.direction_line.as_str());
    println!("{} {}", "Line 5:".bright_white(), update.packet_line.as_str());
    println!("{} {}", "Line 6:".bright_white(), update.signal_line.as_str());
    0
}

fn run_freqcheck(matches: &ArgMatches) -> i32 {
    let tx_hz: u32 = matches.value_of("TX_HZ").unwrap().parse().unwrap();
    let rx_hz: u32 = matches.value_of("RX_HZ").unwrap().parse().unwrap();

    match FrequencyGuard::check(tx_hz, rx_hz) {
        FreqAction::None => {
            println!("{} {}", "✔".green(), "frequency plan ok".bright_green());
            0
        }
        FreqAction::CorrectAndRestart { corrected_tx_hz } => {
            println!(
                "{} {}",
                "✘".red(),
                "tx freq is less than 125 kHz from rx freq".bright_red()
            );
            println!(
                "{} {} Hz",
                "device would autofix tx to".bright_white(),
                corrected_tx_hz
            );
            1
        }
    }
}

fn run_config_check(matches: &ArgMatches) -> i32 {
    let path = matches.value_of("PATH").unwrap();
    let config = match Config::load(Path::new(path)) {
        Ok(config) => config,
        Err(e) => {
            println!("{} {}", "✘".red(), format!("{}: {}", path, e).bright_red());
            return 1;
        }
    };

    let mut code = 0;

    if is_valid_callsign(&config.callsign) {
        println!("{} callsign {}", "✔".green(), config.callsign.bright_green());
    } else {
        println!("{} callsign {}", "✘".red(), config.callsign.bright_red());
        code = 1;
    }

    match FrequencyGuard::check(config.lora.tx_freq_hz, config.lora.rx_freq_hz) {
        FreqAction::None => {
            println!(
                "{} frequency plan tx={} rx={}",
                "✔".green(),
                config.lora.tx_freq_hz,
                config.lora.rx_freq_hz
            );
        }
        FreqAction::CorrectAndRestart { corrected_tx_hz } => {
            println!(
                "{} frequency plan tx={} rx={} (would autofix tx to {})",
                "✘".red(),
                config.lora.tx_freq_hz,
                config.lora.rx_freq_hz,
                corrected_tx_hz
            );
            code = 1;
        }
    }

    println!(
        "{} beacon every {} min, path {:?}, comment {:?}",
        "·".bright_white(),
        config.beacon.interval_minutes,
        config.beacon.path,
        config.beacon.comment
    );

    code
}
