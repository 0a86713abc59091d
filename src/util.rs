/// Process-level helpers shared by `main` and tests.
///
/// IMPORTANT:
/// - No exchange-specific logic should live here.
///

use rustls::crypto::{CryptoProvider, ring};

/// Installs the `ring` rustls CryptoProvider as process default.
///
/// rustls >= 0.23 requires an explicit provider. Calling this
/// more than once is harmless: later calls find the provider
/// already installed and leave it in place.
pub fn install_crypto_provider() {
    let _ = CryptoProvider::install_default(ring::default_provider());
}
