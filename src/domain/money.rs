use serde::{Deserialize, Deserializer};

/// Whole currency units. There are no fractional amounts anywhere in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(pub i64);

impl Money {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn units(units: i64) -> Self {
        Self(units)
    }

    pub fn as_units(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Cost of `qty` units at this price, or `None` if it does not fit.
    pub fn checked_times(self, qty: u64) -> Option<Money> {
        let wide = i128::from(self.0).checked_mul(i128::from(qty))?;
        i64::try_from(wide).ok().map(Money)
    }

    /// Parses an integer amount. Thousands grouping with `,` or `_` is
    /// accepted when every group after the first has exactly three digits,
    /// so `100,000` and `100_000` both read as one hundred thousand while
    /// `1,0,0` is refused.
    pub fn from_units_str(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('$');
        let (neg, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut groups = body.split([',', '_']);
        let head = groups.next()?;
        if head.is_empty() || (head.len() > 3 && body.len() != head.len()) {
            return None;
        }
        let mut digits = String::from(head);
        for group in groups {
            if group.len() != 3 {
                return None;
            }
            digits.push_str(group);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let value: i64 = digits.parse().ok()?;
        Some(Self(if neg { -value } else { value }))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        if self.is_negative() {
            write!(f, "-${}", grouped)
        } else {
            write!(f, "${}", grouped)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_units_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid Money format: {}", s)))
    }
}
