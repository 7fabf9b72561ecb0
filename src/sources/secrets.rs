//! The external secrets-store collaborator contract.

/// Single-method contract for an external secrets store.
///
/// The crate depends only on this lookup; the transport used to reach the
/// store (vault, cloud secret manager, an encrypted file) is the
/// implementor's concern. Absence is `None`, never an error — a missing
/// secret falls through the retriever chain like any other missing key.
pub trait SecretStore: Send + Sync {
    /// Look up a secret by key.
    fn get(&self, key: &str) -> Option<String>;
}
