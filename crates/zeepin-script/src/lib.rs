/// Zeepin SDK - NeoVM programs, contract-call argument encoding and addresses.
///
/// Provides the push builder, single- and multi-signature verification
/// programs with their parser, the native-contract argument encoder and the
/// program-hash `Address`.

pub mod opcodes;
pub mod builder;
pub mod program;
pub mod native;
pub mod address;

mod error;
pub use error::ScriptError;
pub use address::Address;
pub use builder::ProgramBuilder;
pub use native::NativeArg;
pub use program::ProgramInfo;
