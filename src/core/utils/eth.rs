use alloy_primitives::{Address, U256, utils::format_units};
use anyhow::anyhow;
use std::str::FromStr;

/// Decimals of the native currency
pub const NATIVE_DECIMALS: u8 = 18;

/// Parse an address in any letter case and return its EIP-55 checksummed form
pub fn checksum_address(address: &str) -> Result<String, anyhow::Error> {
   let address = address.trim();
   let parsed = Address::from_str(address)
      .map_err(|e| anyhow!("Invalid address {}: {}", address, e))?;
   Ok(parsed.to_checksum(None))
}

/// Parse a balance string, decimal or `0x` prefixed hex
pub fn parse_wei(amount: &str) -> Result<U256, anyhow::Error> {
   let amount = amount.trim();
   if amount.is_empty() {
      return Ok(U256::ZERO);
   }
   U256::from_str(amount).map_err(|e| anyhow!("Invalid amount {}: {}", amount, e))
}

/// Convert a wei amount to a float in units of `decimals`
pub fn wei_to_f64(amount: &str, decimals: u8) -> Result<f64, anyhow::Error> {
   let wei = parse_wei(amount)?;
   let units = format_units(wei, decimals)?;
   units
      .parse()
      .map_err(|e| anyhow!("Invalid amount {}: {}", units, e))
}

/// Format a float with a fixed number of fraction digits and comma separators
pub fn format_fixed(n: f64, fraction_digits: u8) -> String {
   let s = format!("{:.*}", fraction_digits as usize, n);
   add_comma_separators(&s)
}

fn add_comma_separators(s: &str) -> String {
   let (sign, s) = match s.strip_prefix('-') {
      Some(rest) => ("-", rest),
      None => ("", s),
   };

   let (integer_part, decimal_part) = match s.split_once('.') {
      Some((i, d)) => (i, Some(d)),
      None => (s, None),
   };

   let mut result = String::from(sign);
   let len = integer_part.len();
   for (i, c) in integer_part.chars().enumerate() {
      if i > 0 && (len - i) % 3 == 0 {
         result.push(',');
      }
      result.push(c);
   }

   if let Some(decimal_part) = decimal_part {
      result.push('.');
      result.push_str(decimal_part);
   }

   result
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn checksum_is_case_insensitive() {
      let lower = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
      let upper = "0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED";
      let expected = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

      assert_eq!(checksum_address(lower).unwrap(), expected);
      assert_eq!(checksum_address(upper).unwrap(), expected);
   }

   #[test]
   fn checksum_rejects_garbage() {
      assert!(checksum_address("0x1234").is_err());
      assert!(checksum_address("not an address").is_err());
   }

   #[test]
   fn parses_decimal_and_hex_wei() {
      assert_eq!(parse_wei("1000").unwrap(), U256::from(1000u64));
      assert_eq!(parse_wei("0x3e8").unwrap(), U256::from(1000u64));
      assert_eq!(parse_wei("").unwrap(), U256::ZERO);
      assert!(parse_wei("ten").is_err());
   }

   #[test]
   fn formats_with_fraction_digits() {
      assert_eq!(format_fixed(1234567.891, 2), "1,234,567.89");
      assert_eq!(format_fixed(12.4, 0), "12");
      assert_eq!(format_fixed(0.123456, 4), "0.1235");
      assert_eq!(format_fixed(-1500.0, 1), "-1,500.0");
   }

   #[test]
   fn one_ether_to_f64() {
      let value = wei_to_f64("1000000000000000000", NATIVE_DECIMALS).unwrap();
      assert_eq!(value, 1.0);
   }

   #[test]
   fn bad_amount_is_an_error_not_zero() {
      assert!(wei_to_f64("1.5", NATIVE_DECIMALS).is_err());
      assert!(wei_to_f64("ten", NATIVE_DECIMALS).is_err());
      assert_eq!(wei_to_f64("", NATIVE_DECIMALS).unwrap(), 0.0);
   }
}
