use crate::constants::PERCENT;
use crate::types::SaleError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fill {
    Full(i128),
    /// Only `tokens` fit under the cap; `excess` tokens could not be minted.
    Partial { tokens: i128, excess: i128 },
}

impl Fill {
    pub fn tokens(&self) -> i128 {
        match *self {
            Fill::Full(tokens) => tokens,
            Fill::Partial { tokens, .. } => tokens,
        }
    }
}

/// Decides how much of `proposed` can be minted on top of `minted`.
/// An exhausted cap is an error, never a zero-token fill.
pub fn enforce(cap: Option<i128>, minted: i128, proposed: i128) -> Result<Fill, SaleError> {
    let cap = match cap {
        Some(cap) => cap,
        None => return Ok(Fill::Full(proposed)),
    };
    if minted >= cap {
        return Err(SaleError::CapExceeded);
    }

    let after = minted.checked_add(proposed).ok_or(SaleError::Overflow)?;
    if after <= cap {
        Ok(Fill::Full(proposed))
    } else {
        Ok(Fill::Partial {
            tokens: cap - minted,
            excess: after - cap,
        })
    }
}

/// Strict variant for private-investor minting: no partial fills.
pub fn enforce_whole(cap: Option<i128>, minted: i128, proposed: i128) -> Result<(), SaleError> {
    match enforce(cap, minted, proposed)? {
        Fill::Full(_) => Ok(()),
        Fill::Partial { .. } => Err(SaleError::CapExceeded),
    }
}

/// Part of `value` that paid for the minted tokens when `excess` tokens did
/// not fit. The refund is priced at the purchase's own rate and bonus and
/// rounds down, so the accepted share never exceeds `value`.
pub fn accepted_value(
    value: i128,
    excess: i128,
    rate: i128,
    bonus_pct: u32,
) -> Result<i128, SaleError> {
    let price = rate
        .checked_mul(PERCENT + bonus_pct as i128)
        .ok_or(SaleError::Overflow)?;
    if price <= 0 {
        return Err(SaleError::ZeroRate);
    }
    let refund = excess.checked_mul(PERCENT).ok_or(SaleError::Overflow)? / price;
    Ok(value - refund.min(value))
}
