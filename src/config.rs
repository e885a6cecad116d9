use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "login-gateway")]
#[command(about = "Brute force detection and adaptive blocking for a login endpoint")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Block duration in seconds, also used as the failed-attempt window
    #[arg(long, default_value_t = 900)]
    pub block_time: u64,

    // Failed attempts before an identity is blocked outright
    #[arg(long, default_value_t = 50)]
    pub failed_attempts_limit: u64,

    // Failed attempts before responses degrade to 429
    #[arg(long, default_value_t = 5)]
    pub soft_limit: u64,

    // Login requests allowed per rate window, regardless of outcome
    #[arg(long, default_value_t = 50)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Timeout for a single store operation, in seconds
    #[arg(long, default_value_t = 5)]
    pub store_timeout: u64,

    // Credentials accepted by the built-in authenticator
    #[arg(long, default_value = "admin")]
    pub admin_user: String,

    #[arg(long, default_value = "supersecret123")]
    pub admin_password: String,
}
