#[cfg(test)]
mod logger_tests {
    use std::fs;
    use tracing::Level;

    use prop_imitation::logger::{parse_level, LogConfig, Logger};

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();

        assert_eq!(config.level, Level::INFO);
        assert!(config.enable_console);
        assert!(!config.enable_file);
        assert_eq!(config.file_path, "prop-imitation.log");
        assert!(!config.enable_json);
        assert!(config.enable_ansi);
    }

    #[test]
    fn test_log_config_debug() {
        let config = LogConfig::default();
        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains("LogConfig"));
        assert!(debug_output.contains("level: INFO"));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    // The only test in this binary that installs a subscriber.
    #[test]
    fn test_logger_init_once() {
        let path = "test_logger_init.log";
        let _ = fs::remove_file(path);

        let config = LogConfig {
            level: Level::DEBUG,
            enable_console: false,
            enable_file: true,
            file_path: path.to_string(),
            enable_json: true,
            enable_ansi: false,
        };

        assert!(Logger::init(config).is_ok());
        prop_imitation::log_info!("Logger initialized for test");
        prop_imitation::log_debug!(profile = "PixelXL", "Structured debug message");

        assert!(fs::metadata(path).is_ok());

        // A second subscriber is refused rather than panicking.
        assert!(Logger::init_with_defaults().is_err());

        let _ = fs::remove_file(path);
    }
}
