//! User-supplied provider credentials.
//!
//! The pool keeps credentials in insertion order and hands out the secrets
//! of the enabled ones. It never validates a secret; a bad key only shows up
//! when a stage's remote call fails.

mod pool;

pub use pool::{fingerprint, Credential, CredentialPool};
