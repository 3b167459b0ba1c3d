use crate::core::utils::{NATIVE_DECIMALS, format_fixed, wei_to_f64};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_FRACTION_DIGITS: u8 = 2;

/// A responsive layout breakpoint reported by the front-end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
   pub code: String,
   pub matches: bool,
}

impl Breakpoint {
   pub fn new(code: impl Into<String>, matches: bool) -> Self {
      Self {
         code: code.into(),
         matches,
      }
   }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
   /// Price of the native token in [Self::currency]
   pub token_price: f64,

   /// Fiat currency code
   pub currency: String,

   /// Digits shown after the decimal point
   pub fraction_digits: u8,

   /// Keyed by breakpoint code, never persisted
   pub breakpoints: HashMap<String, Breakpoint>,
}

impl Default for Preferences {
   fn default() -> Self {
      Self {
         token_price: 0.0,
         currency: DEFAULT_CURRENCY.to_string(),
         fraction_digits: DEFAULT_FRACTION_DIGITS,
         breakpoints: HashMap::new(),
      }
   }
}

impl Preferences {
   /// Insert or replace the breakpoint with the same code
   pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
      self.breakpoints.insert(breakpoint.code.clone(), breakpoint);
   }

   pub fn breakpoint_matches(&self, code: &str) -> bool {
      self.breakpoints.get(code).is_some_and(|b| b.matches)
   }

   /// Native amount in wei formatted with [Self::fraction_digits]
   pub fn format_amount(&self, wei: &str) -> Result<String, anyhow::Error> {
      let amount = wei_to_f64(wei, NATIVE_DECIMALS)?;
      Ok(format_fixed(amount, self.fraction_digits))
   }

   /// Value of a native amount in wei, in [Self::currency]
   pub fn value_in_currency(&self, wei: &str) -> Result<f64, anyhow::Error> {
      let amount = wei_to_f64(wei, NATIVE_DECIMALS)?;
      Ok(amount * self.token_price)
   }

   pub fn format_value(&self, wei: &str) -> Result<String, anyhow::Error> {
      let value = self.value_in_currency(wei)?;
      Ok(format!(
         "{} {}",
         format_fixed(value, self.fraction_digits),
         self.currency
      ))
   }
}
