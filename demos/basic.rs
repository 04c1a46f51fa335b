//! Basic example: issue a token, inspect its header, decode and validate it
//!
//! Run with `RUST_LOG=jwtcraft=debug` to see why tokens are rejected.

use jwtcraft::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "basic=info,jwtcraft=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== jwtcraft - Basic Example ===\n");

    let now = SystemClock.unix_timestamp();
    let builder = JwtBuilder::new()
        .with_algorithm(AlgorithmId::HS256)
        .with_secret("your-256-bit-secret-key-here!")
        .with_validation_parameters(ValidationParameters::default().time_margin(60));

    // Step 1: Issue a token that expires in one hour
    let token = builder
        .clone()
        .key_id("demo-key")
        .add_claim("iss", "https://example.com")
        .add_claim("sub", "user123")
        .add_claim("iat", now)
        .add_claim("exp", now + 3600)
        .encode()?;
    println!("Token: {}\n", token);

    // Step 2: Look at the header without verifying anything
    let header = builder.decode_header(&token)?;
    println!("Algorithm: {:?}", header.algorithm());
    println!("Key ID: {:?}\n", header.key_id());

    // Step 3: Verify the signature and validate the claims
    let claims = builder.decode(&token)?;
    println!("Issuer: {:?}", claims.issuer());
    println!("Subject: {:?}", claims.subject());
    println!("Expires at: {:?}", claims.expiration()?);

    // Step 4: The same token fails with another secret
    let rejected = builder
        .with_secret("a-different-secret")
        .decode(&token)
        .unwrap_err();
    println!("\nWith the wrong secret: {}", rejected);

    Ok(())
}
