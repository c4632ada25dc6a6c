//! Objects whose canonical bytes can be signed.

/// Implemented by anything a `PrivateKey` can sign without the caller first
/// extracting the content, transactions in particular.
pub trait Signable {
    /// The bytes that are actually signed (for transactions, the double
    /// SHA-256 of the unsigned serialization).
    fn get_sign_content(&self) -> Vec<u8>;

    /// The raw unsigned serialization, before any hashing.
    fn serialize_unsigned_data(&self) -> Vec<u8>;
}
