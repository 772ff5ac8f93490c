// Access logging and response compression

use actix_web::middleware::{Compress, Logger};

/// Access-log format; `%r` includes the query string, which carries no credentials here.
pub const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b %Dms"#;

pub fn setup_middleware() -> (Logger, Compress) {
    let logger = Logger::new(ACCESS_LOG_FORMAT).log_target("provider_update::access");
    let compress = Compress::default();
    (logger, compress)
}
