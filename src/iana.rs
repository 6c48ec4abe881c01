//! Code tables: record types, classes, opcodes and response codes.
//!
//! Every table maps codes to mnemonics in both directions. Codes without a
//! mnemonic are kept as raw numbers rather than rejected, so a decoded
//! message always re-encodes to the same codes.

use std::fmt;

/// Error for a string that is neither a known mnemonic nor a number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FromStrError {
    kind: &'static str,
    input: String,
}

impl FromStrError {
    pub(crate) fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.input)
    }
}

impl std::error::Error for FromStrError {}

int_enum! {
    /// DNS resource record types.
    ///
    /// See [RFC 1035 section 3.2.2](https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.2)
    /// and the IANA "Resource Record (RR) TYPEs" registry. Values without
    /// a mnemonic display as `TYPE<n>` (RFC 3597).
    =>
    RecordType, u16, "TYPE";

    /// IPv4 host address.
    (A => 1, "A")
    /// Authoritative name server.
    (NS => 2, "NS")
    (MD => 3, "MD")
    (MF => 4, "MF")
    /// Canonical name for an alias.
    (CNAME => 5, "CNAME")
    /// Start of a zone of authority.
    (SOA => 6, "SOA")
    (MB => 7, "MB")
    (MG => 8, "MG")
    (MR => 9, "MR")
    (NULL => 10, "NULL")
    (WKS => 11, "WKS")
    /// Domain name pointer.
    (PTR => 12, "PTR")
    (HINFO => 13, "HINFO")
    (MINFO => 14, "MINFO")
    /// Mail exchange.
    (MX => 15, "MX")
    /// Text strings.
    (TXT => 16, "TXT")
    (RP => 17, "RP")
    (AFSDB => 18, "AFSDB")
    (X25 => 19, "X25")
    (ISDN => 20, "ISDN")
    (RT => 21, "RT")
    (NSAP => 22, "NSAP")
    (NSAP_PTR => 23, "NSAP-PTR")
    (SIG => 24, "SIG")
    (KEY => 25, "KEY")
    (PX => 26, "PX")
    (GPOS => 27, "GPOS")
    /// IPv6 host address.
    (AAAA => 28, "AAAA")
    (LOC => 29, "LOC")
    (NXT => 30, "NXT")
    (EID => 31, "EID")
    (NIMLOC => 32, "NIMLOC")
    (SRV => 33, "SRV")
    (ATMA => 34, "ATMA")
    (NAPTR => 35, "NAPTR")
    (KX => 36, "KX")
    (CERT => 37, "CERT")
    (A6 => 38, "A6")
    (DNAME => 39, "DNAME")
    (SINK => 40, "SINK")
    (OPT => 41, "OPT")
    (APL => 42, "APL")
    (DS => 43, "DS")
    (SSHFP => 44, "SSHFP")
    (IPSECKEY => 45, "IPSECKEY")
    (RRSIG => 46, "RRSIG")
    (NSEC => 47, "NSEC")
    (DNSKEY => 48, "DNSKEY")
    (DHCID => 49, "DHCID")
    (NSEC3 => 50, "NSEC3")
    (NSEC3PARAM => 51, "NSEC3PARAM")
    (TLSA => 52, "TLSA")
    (HIP => 55, "HIP")
    (NINFO => 56, "NINFO")
    (RKEY => 57, "RKEY")
    (TALINK => 58, "TALINK")
    (CDS => 59, "CDS")
    (CDNSKEY => 60, "CDNSKEY")
    (OPENPGPKEY => 61, "OPENPGPKEY")
    (CSYNC => 62, "CSYNC")
    (SPF => 99, "SPF")
    (UINFO => 100, "UINFO")
    (UID => 101, "UID")
    (GID => 102, "GID")
    (UNSPEC => 103, "UNSPEC")
    (NID => 104, "NID")
    (L32 => 105, "L32")
    (L64 => 106, "L64")
    (LP => 107, "LP")
    (EUI48 => 108, "EUI48")
    (EUI64 => 109, "EUI64")
    (TKEY => 249, "TKEY")
    (TSIG => 250, "TSIG")
    /// Incremental zone transfer (query only).
    (IXFR => 251, "IXFR")
    /// Full zone transfer (query only).
    (AXFR => 252, "AXFR")
    (MAILB => 253, "MAILB")
    (MAILA => 254, "MAILA")
    /// All records (query only).
    (ANY => 255, "ANY")
    (URI => 256, "URI")
    (CAA => 257, "CAA")
    (TA => 32768, "TA")
    (DLV => 32769, "DLV")
}

int_enum! {
    /// DNS classes.
    ///
    /// Values without a mnemonic display as `CLASS<n>` (RFC 3597).
    =>
    Class, u16, "CLASS";

    /// Internet.
    (IN => 1, "IN")
    /// Chaos.
    (CH => 3, "CH")
    /// Hesiod.
    (HS => 4, "HS")
    /// Any class (query only).
    (ANY => 255, "ANY")
}

int_enum! {
    /// Header opcode: the kind of query, a 4-bit field.
    =>
    Opcode, u8, "", 0x0F;

    (QUERY => 0, "QUERY")
    (IQUERY => 1, "IQUERY")
    (STATUS => 2, "STATUS")
    (NOTIFY => 4, "NOTIFY")
    (UPDATE => 5, "UPDATE")
}

int_enum! {
    /// Header response code, a 4-bit field.
    =>
    Rcode, u8, "", 0x0F;

    (NOERROR => 0, "NOERROR")
    (FORMERR => 1, "FORMERR")
    (SERVFAIL => 2, "SERVFAIL")
    (NXDOMAIN => 3, "NXDOMAIN")
    (NOTIMP => 4, "NOTIMP")
    (REFUSED => 5, "REFUSED")
    (YXDOMAIN => 6, "YXDOMAIN")
    (YXRRSET => 7, "YXRRSET")
    (NXRRSET => 8, "NXRRSET")
    (NOTAUTH => 9, "NOTAUTH")
    (NOTZONE => 10, "NOTZONE")
}

impl Default for Opcode {
    fn default() -> Self {
        Self::QUERY
    }
}

impl Default for Rcode {
    fn default() -> Self {
        Self::NOERROR
    }
}

impl Default for Class {
    fn default() -> Self {
        Self::IN
    }
}
