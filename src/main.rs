use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use warden::config::WardenConfig;
use warden::crypto::{self, DigestAlgorithm};
use warden::ratelimit::{spawn_sweeper, LimitPolicy, RateLimiter};
use warden::sanitize;

#[derive(Parser, Debug)]
#[command(name = "warden", version)]
#[command(about = "Security hardening helpers: rate limiting, tokens, digests, signatures")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random hex token
    Token {
        /// Token length in bytes
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Print the hex digest of DATA
    Hash {
        data: String,
        /// sha256 or sha512
        #[arg(short, long, default_value = "sha256")]
        algorithm: DigestAlgorithm,
    },
    /// Print the HMAC-SHA256 signature of DATA
    Sign {
        data: String,
        #[arg(short, long)]
        secret: String,
    },
    /// Check an HMAC-SHA256 signature; exits 1 on mismatch
    Verify {
        data: String,
        #[arg(short, long)]
        secret: String,
        #[arg(long)]
        signature: String,
    },
    /// Hash a password as salt$hash
    HashPassword { password: String },
    /// Check a password against salt$hash; exits 1 on mismatch
    VerifyPassword { password: String, stored: String },
    /// Strip markup and injection characters from INPUT
    Sanitize {
        input: String,
        #[arg(long)]
        max_length: Option<usize>,
    },
    /// Check an email address format; exits 1 when invalid
    ValidateEmail { email: String },
    /// Replay back-to-back requests through a rate limiter
    Simulate {
        #[arg(long, default_value = "demo")]
        identifier: String,
        /// Number of requests to send
        #[arg(short = 'n', long)]
        requests: u32,
        #[arg(long)]
        max_requests: Option<u32>,
        #[arg(long)]
        window_ms: Option<u64>,
        /// Pause between requests
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = WardenConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    let outcome = match cli.command {
        Command::Token { length } => {
            let length = length.unwrap_or(config.security.token_length);
            println!("{}", crypto::generate_secure_token(length));
            true
        }
        Command::Hash { data, algorithm } => {
            println!("{}", crypto::hash(data.as_bytes(), algorithm));
            true
        }
        Command::Sign { data, secret } => {
            println!(
                "{}",
                crypto::create_signature(data.as_bytes(), secret.as_bytes())?
            );
            true
        }
        Command::Verify {
            data,
            secret,
            signature,
        } => report(crypto::verify_signature(
            data.as_bytes(),
            secret.as_bytes(),
            &signature,
        )),
        Command::HashPassword { password } => {
            println!(
                "{}",
                crypto::hash_password_with_iterations(
                    &password,
                    config.security.pbkdf2_iterations
                )
            );
            true
        }
        Command::VerifyPassword { password, stored } => {
            report(crypto::verify_password_with_iterations(
                &password,
                &stored,
                config.security.pbkdf2_iterations,
            ))
        }
        Command::Sanitize { input, max_length } => {
            let max_length = max_length.unwrap_or(config.security.sanitize_max_length);
            println!("{}", sanitize::sanitize_input(&input, max_length));
            true
        }
        Command::ValidateEmail { email } => report(sanitize::validate_email(&email)),
        Command::Simulate {
            identifier,
            requests,
            max_requests,
            window_ms,
            delay_ms,
        } => {
            let policy = LimitPolicy::from_millis(
                max_requests.unwrap_or(config.rate_limiting.max_requests),
                window_ms.unwrap_or(config.rate_limiting.window_ms),
            )?;
            simulate(&config, policy, &identifier, requests, delay_ms).await;
            true
        }
    };

    Ok(if outcome {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn report(ok: bool) -> bool {
    println!("{}", if ok { "valid" } else { "invalid" });
    ok
}

async fn simulate(
    config: &WardenConfig,
    policy: LimitPolicy,
    identifier: &str,
    requests: u32,
    delay_ms: u64,
) {
    let limiter = Arc::new(RateLimiter::with_policy(policy));
    let sweeper = spawn_sweeper(limiter.clone(), config.rate_limiting.sweep_interval());

    info!(
        identifier = %identifier,
        max_requests = policy.max_requests(),
        window_ms = policy.window().as_millis() as u64,
        "Simulating requests"
    );

    let mut admitted = 0u32;
    for i in 1..=requests {
        let allowed = limiter.check(identifier);
        if allowed {
            admitted += 1;
        }
        println!("request {}: {}", i, if allowed { "allowed" } else { "denied" });

        if delay_ms > 0 && i < requests {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    println!("{} of {} requests admitted", admitted, requests);
    sweeper.shutdown().await;
}
