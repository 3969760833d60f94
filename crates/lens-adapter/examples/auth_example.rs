/*
[INPUT]:  Wallet private key (LENS_PRIVATE_KEY) and Lens API endpoints
[OUTPUT]: Authenticated session with resolved profile
[POS]:    Examples - authentication flow demonstration
[UPDATE]: When auth flow changes
*/

use std::sync::Arc;

use lens_adapter::*;

/// Example: Authentication flow
///
/// This example walks the handshake one state at a time:
/// 1. Derive the wallet address from the private key
/// 2. Request a challenge for that address
/// 3. Sign the challenge text
/// 4. Exchange the signature for an access token
/// 5. Resolve the profile owned by the address
#[tokio::main]
async fn main() {
    println!("=== Lens Authentication Example ===\n");

    let Ok(private_key) = std::env::var("LENS_PRIVATE_KEY") else {
        eprintln!("Set LENS_PRIVATE_KEY to a hex-encoded wallet key");
        return;
    };

    let wallet = match EvmWalletSigner::new(&private_key) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Invalid key: {}", e);
            return;
        }
    };
    println!("✓ Wallet address: {}", wallet.address());

    let client = match LensClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    let mut auth = AuthSession::new(client, Arc::new(wallet));
    while !auth.state().is_ready() {
        match auth.step().await {
            Ok(state) => println!("✓ {}", state.name()),
            Err(e) => {
                eprintln!("✗ Handshake failed: {}", e);
                return;
            }
        }
    }

    if let Some((_, profile)) = auth.into_ready() {
        println!(
            "\n✓ Authenticated as {} ({}), {} followers",
            profile.handle, profile.profile_id, profile.follower_count
        );
    }
}
