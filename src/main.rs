use prop_imitation::config::DEFAULT_CONFIG_PATH;
use prop_imitation::logger::parse_level;
use prop_imitation::{
    log_error, log_info, log_warn, ExporterType, LogConfig, Logger, MetricsExporter,
    PolicyEngine, PropKey, PropStore, SpoofConfig,
};

struct Args {
    log_config: LogConfig,
    config_path: String,
    package_name: Option<String>,
    process_name: Option<String>,
    attestation_frames: Vec<String>,
    attestation_marker: Option<bool>,
    features: Vec<String>,
    exporter: Option<ExporterType>,
}

fn print_help(program: &str) {
    println!("prop-imitation - device identity spoofing policy dry run");
    println!();
    println!("Usage: {} --package NAME [OPTIONS]", program);
    println!();
    println!("Options:");
    println!("  --config FILE            Spoof config file (default: {})", DEFAULT_CONFIG_PATH);
    println!("  --package NAME           Caller package name");
    println!("  --process NAME           Caller process name (default: package name)");
    println!("  --attest                 Evaluate an attestation request without a stack marker");
    println!("  --attest-marker          Evaluate an attestation request from the attestation library");
    println!("  --stack-frame CLASS      Add a call stack frame to the attestation request");
    println!("  --feature NAME           Query a system feature (repeatable)");
    println!("  --metrics FORMAT         Export metrics: prometheus, json, log");
    println!("  --log-level LEVEL        Log level: error, warn, info, debug, trace");
    println!("  --log-file               Enable file logging");
    println!("  --log-file-path FILE     Log file path (default: prop-imitation.log)");
    println!("  --log-json               Enable JSON logging format");
    println!("  --no-color               Disable ANSI colors in console output");
    println!("  -h, --help               Show this help message");
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        log_config: LogConfig::default(),
        config_path: DEFAULT_CONFIG_PATH.to_string(),
        package_name: None,
        process_name: None,
        attestation_frames: Vec::new(),
        attestation_marker: None,
        features: Vec::new(),
        exporter: None,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--config" => {
                if let Some(v) = value {
                    parsed.config_path = v;
                    i += 1;
                }
            }
            "--package" => {
                if let Some(v) = value {
                    parsed.package_name = Some(v);
                    i += 1;
                }
            }
            "--process" => {
                if let Some(v) = value {
                    parsed.process_name = Some(v);
                    i += 1;
                }
            }
            "--attest" => {
                parsed.attestation_marker.get_or_insert(false);
            }
            "--attest-marker" => {
                parsed.attestation_marker = Some(true);
            }
            "--stack-frame" => {
                if let Some(v) = value {
                    parsed.attestation_frames.push(v);
                    i += 1;
                }
            }
            "--feature" => {
                if let Some(v) = value {
                    parsed.features.push(v);
                    i += 1;
                }
            }
            "--metrics" => {
                if let Some(v) = value {
                    parsed.exporter = match v.to_lowercase().as_str() {
                        "prometheus" => Some(ExporterType::Prometheus),
                        "json" => Some(ExporterType::Json),
                        _ => Some(ExporterType::Logging),
                    };
                    i += 1;
                }
            }
            "--log-level" => {
                if let Some(v) = value {
                    parsed.log_config.level = parse_level(&v);
                    i += 1;
                }
            }
            "--log-file" => {
                parsed.log_config.enable_file = true;
            }
            "--log-file-path" => {
                if let Some(v) = value {
                    parsed.log_config.file_path = v;
                    i += 1;
                }
            }
            "--log-json" => {
                parsed.log_config.enable_json = true;
            }
            "--no-color" => {
                parsed.log_config.enable_ansi = false;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                std::process::exit(0);
            }
            other => {
                if other.starts_with('-') {
                    eprintln!("Unknown option: {}", other);
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    parsed
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args();

    Logger::init(args.log_config.clone())?;

    let config = match SpoofConfig::load_or_default(&args.config_path) {
        Ok(config) => {
            log_info!("✅ Loaded spoof configuration from {}", args.config_path);
            log_info!("   Certified fingerprint: {}", config.has_certified_fingerprint());
            log_info!("   Stock fingerprint: {}", config.has_stock_fingerprint());
            log_info!("   Spoof Google apps: {}", config.spoof_google_apps);
            config
        }
        Err(e) => {
            log_error!("❌ Failed to load configuration {}: {}", args.config_path, e);
            return Err(e.into());
        }
    };

    let engine = PolicyEngine::new(config);
    engine.debug_rules();

    // Stands in for the process's real build fields.
    let props = PropStore::with_props([
        (PropKey::Brand, "generic"),
        (PropKey::Manufacturer, "unknown"),
        (PropKey::Device, "generic"),
        (PropKey::Product, "generic"),
        (PropKey::Model, "generic"),
        (PropKey::Fingerprint, "generic/generic/generic:14/UNKNOWN/0:user/test-keys"),
    ]);

    let process_name = args.process_name.as_deref().or(args.package_name.as_deref());
    match engine.on_process_identity_established(args.package_name.as_deref(), process_name, &props) {
        Some(report) => {
            log_info!(
                "Applied {} ({}/{} props)",
                report.profile,
                report.applied_count(),
                report.outcomes.len()
            );
        }
        None => log_info!("No profile applied"),
    }

    println!("state: {:?}", engine.state());
    println!("{}", serde_yaml::to_string(&props.snapshot())?);

    if args.attestation_marker.is_some() || !args.attestation_frames.is_empty() {
        let result = if args.attestation_frames.is_empty() {
            engine.on_attestation_requested(args.attestation_marker.unwrap_or(false))
        } else {
            engine.on_attestation_requested_with_stack(&args.attestation_frames)
        };
        match result {
            Ok(()) => println!("attestation: allowed"),
            Err(e) => {
                log_warn!("{}", e);
                println!("attestation: blocked");
            }
        }
    }

    for feature in &args.features {
        println!("feature {}: {}", feature, engine.on_feature_queried(feature, true));
    }

    if let Some(exporter_type) = args.exporter {
        let exporter = MetricsExporter::new(engine.metrics().clone(), exporter_type);
        println!("{}", exporter.export_metrics()?);
    }

    Ok(())
}
