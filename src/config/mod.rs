mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, EmailConfig, LinksConfig, LogFormat, LoggingConfig, INSECURE_DEV_SECRET,
};
