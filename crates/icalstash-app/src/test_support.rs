use icalstash_core::config::{
    LoggingConfig, RetryConfig, ServerConfig, Settings, StorageBackend, StorageConfig,
};

pub fn memory_settings(request_timeout_secs: u64) -> Settings {
    Settings {
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            bucket: "calendars".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key: String::new(),
            secret_key: String::new(),
            use_https: true,
            force_path_style: false,
        },
        retry: RetryConfig {
            max_retries: 3,
            base_delay_ms: 1000,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}
