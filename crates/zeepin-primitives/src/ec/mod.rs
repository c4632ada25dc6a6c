/// Key model: private keys, public keys and signatures.
///
/// Keys are polymorphic over the supported algorithms (ECDSA on P-256 and
/// P-384, EdDSA on Ed25519). The variant is fixed at construction and
/// matched exhaustively at every signing or encoding site. SM2 and the
/// remaining NIST curves are recognised by the parameter tables but rejected
/// with `UnsupportedAlgorithm` when key material is built for them.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
