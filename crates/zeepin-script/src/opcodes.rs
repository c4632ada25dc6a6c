//! NeoVM opcode constants used by the program codec.
//!
//! Only the subset needed for verification programs and contract-call
//! argument packing is listed.

pub const OP_PUSH0: u8 = 0x00;
pub const OP_PUSHF: u8 = OP_PUSH0;
pub const OP_PUSHBYTES1: u8 = 0x01;
pub const OP_PUSHBYTES75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_PUSHM1: u8 = 0x4f;
pub const OP_PUSH1: u8 = 0x51;
pub const OP_PUSHT: u8 = OP_PUSH1;
pub const OP_PUSH16: u8 = 0x60;

// Flow control
pub const OP_NOP: u8 = 0x61;
pub const OP_APPCALL: u8 = 0x67;
pub const OP_SYSCALL: u8 = 0x68;

// Stack
pub const OP_DUPFROMALTSTACK: u8 = 0x6a;
pub const OP_TOALTSTACK: u8 = 0x6b;
pub const OP_FROMALTSTACK: u8 = 0x6c;
pub const OP_SWAP: u8 = 0x7c;

// Crypto
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKMULTISIG: u8 = 0xae;

// Collections
pub const OP_PACK: u8 = 0xc1;
pub const OP_NEWSTRUCT: u8 = 0xc6;
pub const OP_APPEND: u8 = 0xc8;

/// Human-readable name of an opcode, for error messages.
pub fn opcode_to_string(op: u8) -> &'static str {
    match op {
        OP_PUSH0 => "PUSH0",
        OP_PUSHBYTES1..=OP_PUSHBYTES75 => "PUSHBYTES",
        OP_PUSHDATA1 => "PUSHDATA1",
        OP_PUSHDATA2 => "PUSHDATA2",
        OP_PUSHDATA4 => "PUSHDATA4",
        OP_PUSHM1 => "PUSHM1",
        OP_PUSH1..=OP_PUSH16 => "PUSHN",
        OP_NOP => "NOP",
        OP_APPCALL => "APPCALL",
        OP_SYSCALL => "SYSCALL",
        OP_DUPFROMALTSTACK => "DUPFROMALTSTACK",
        OP_TOALTSTACK => "TOALTSTACK",
        OP_FROMALTSTACK => "FROMALTSTACK",
        OP_SWAP => "SWAP",
        OP_CHECKSIG => "CHECKSIG",
        OP_CHECKMULTISIG => "CHECKMULTISIG",
        OP_PACK => "PACK",
        OP_NEWSTRUCT => "NEWSTRUCT",
        OP_APPEND => "APPEND",
        _ => "UNKNOWN",
    }
}
