//! UN/ECE Recommendation 20 unit codes accepted for `Quantity/@Unit`.
//!
//! Only the codes that show up on invoices are listed; anything else is
//! passed through with an `UNKNOWN_UNIT_CODE` warning.

/// Unit used when a line carries no unit code ("one", i.e. piece).
pub const DEFAULT_UNIT_CODE: &str = "C62";

/// Check whether `code` is a known unit code. Codes are case-sensitive.
pub fn is_known_unit_code(code: &str) -> bool {
    matches!(
        code,
        // pieces and packaging
        "C62" | "H87" | "EA" | "PR" | "SET" | "DZN" | "LS"
            | "XBG" | "XBX" | "XCT" | "XPA" | "XPK" | "XPX" | "XRO" | "XSA"
        // time
            | "SEC" | "MIN" | "HUR" | "DAY" | "WEE" | "MON" | "ANN"
        // length, area, volume
            | "MMT" | "CMT" | "MTR" | "KMT" | "MTK" | "MTQ" | "MLT" | "LTR"
        // mass
            | "GRM" | "KGM" | "TNE"
        // energy and power
            | "KWH" | "MWH" | "KWT"
        // ratios
            | "P1"
    )
}
