//! pass_persist command words and fixed replies.

/// Reply to `ping`.
pub const PONG: &str = "PONG";
/// Reply when `get`/`getnext` finds nothing.
pub const NONE: &str = "NONE";
/// Reply to every `set`.
pub const NOT_WRITABLE: &str = "not-writable";
/// Reply to `exit`/`quit`.
pub const BYE: &str = "BYE";
/// Reply to anything unrecognised.
pub const UNKNOWN_COMMAND: &str = "unknown-command";
/// Terminates a `dump` listing.
pub const END_OF_DUMP: &str = ".";

/// First line of a request.
///
/// snmpd only ever sends lowercase `ping`, `get`, `getnext` and `set`;
/// matching ignores case so the agent is easy to drive by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Liveness check.
    Ping,
    /// Exact lookup; one OID line follows.
    Get,
    /// Next-greater lookup; one OID line follows.
    GetNext,
    /// Write request; OID and `TYPE VALUE` lines follow. Always refused.
    Set,
    /// List every triple (diagnostic, not used by snmpd).
    Dump,
    /// `exit` or `quit`.
    Quit,
    /// Anything else.
    Unknown,
}

impl Command {
    /// Classify a command line. Surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Self {
        let word = line.trim();
        if word.eq_ignore_ascii_case("ping") {
            Self::Ping
        } else if word.eq_ignore_ascii_case("get") {
            Self::Get
        } else if word.eq_ignore_ascii_case("getnext") {
            Self::GetNext
        } else if word.eq_ignore_ascii_case("set") {
            Self::Set
        } else if word.eq_ignore_ascii_case("dump") {
            Self::Dump
        } else if word.eq_ignore_ascii_case("exit") || word.eq_ignore_ascii_case("quit") {
            Self::Quit
        } else {
            Self::Unknown
        }
    }
}
