//! ISO 4217 currency codes accepted as ebInterface `InvoiceCurrency`.

/// Check whether `code` is a supported ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// Sorted for binary search.
static CURRENCY_CODES: &[&str] = &[
    "AED", // UAE Dirham
    "ALL", // Albanian Lek
    "AMD", // Armenian Dram
    "AUD", // Australian Dollar
    "BAM", // Convertible Mark
    "BGN", // Bulgarian Lev
    "BRL", // Brazilian Real
    "BYN", // Belarusian Ruble
    "CAD", // Canadian Dollar
    "CHF", // Swiss Franc
    "CNY", // Chinese Yuan
    "CZK", // Czech Koruna
    "DKK", // Danish Krone
    "EGP", // Egyptian Pound
    "EUR", // Euro
    "GBP", // Pound Sterling
    "GEL", // Georgian Lari
    "HKD", // Hong Kong Dollar
    "HUF", // Hungarian Forint
    "IDR", // Indonesian Rupiah
    "ILS", // Israeli Shekel
    "INR", // Indian Rupee
    "ISK", // Icelandic Krona
    "JPY", // Japanese Yen
    "KRW", // South Korean Won
    "KZT", // Kazakhstani Tenge
    "MDL", // Moldovan Leu
    "MKD", // Macedonian Denar
    "MXN", // Mexican Peso
    "NOK", // Norwegian Krone
    "NZD", // New Zealand Dollar
    "PLN", // Polish Zloty
    "RON", // Romanian Leu
    "RSD", // Serbian Dinar
    "SEK", // Swedish Krona
    "SGD", // Singapore Dollar
    "THB", // Thai Baht
    "TRY", // Turkish Lira
    "UAH", // Ukrainian Hryvnia
    "USD", // US Dollar
    "ZAR", // South African Rand
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_currencies() {
        assert!(is_known_currency_code("EUR"));
        assert!(is_known_currency_code("CHF"));
        assert!(is_known_currency_code("HUF"));
        assert!(is_known_currency_code("RSD"));
    }

    #[test]
    fn unknown_currencies() {
        assert!(!is_known_currency_code("ATS"));
        assert!(!is_known_currency_code(""));
        assert!(!is_known_currency_code("eur"));
    }

    #[test]
    fn list_is_sorted() {
        for window in CURRENCY_CODES.windows(2) {
            assert!(window[0] < window[1], "{} >= {}", window[0], window[1]);
        }
    }
}
